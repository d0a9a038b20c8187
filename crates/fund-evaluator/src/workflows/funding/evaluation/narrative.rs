use super::super::domain::ScoreCategory;
use super::policy::{Decision, OverallScore};
use super::{CategoryScore, CategoryScores, STRONG_CATEGORY_SCORE};

const ON_TRACK_RECOMMENDATION: &str =
    "Maintain current momentum: every category meets the fund's benchmark.";

pub(crate) fn justification(
    company_name: &str,
    overall: OverallScore,
    decision: Decision,
    scores: &CategoryScores,
) -> String {
    let company = if company_name.trim().is_empty() {
        "The company"
    } else {
        company_name.trim()
    };
    let strongest = strongest(scores);
    let weakest = weakest(scores);

    format!(
        "{company} scored {overall}/10 in the rule-based assessment. {} \
         Strongest area: {} ({}/10). Weakest area: {} ({}/10).",
        decision_boilerplate(decision),
        strongest.category.label(),
        strongest.raw_score,
        weakest.category.label(),
        weakest.raw_score,
    )
}

pub(crate) fn recommendations(scores: &CategoryScores) -> Vec<String> {
    let recommendations: Vec<String> = scores
        .in_order()
        .iter()
        .filter(|score| score.raw_score < STRONG_CATEGORY_SCORE)
        .map(|score| recommendation_for(score.category).to_string())
        .collect();

    if recommendations.is_empty() {
        vec![ON_TRACK_RECOMMENDATION.to_string()]
    } else {
        recommendations
    }
}

fn decision_boilerplate(decision: Decision) -> &'static str {
    match decision {
        Decision::Approved => {
            "The venture clears the fund's investment bar and is recommended for funding."
        }
        Decision::Conditional => {
            "The venture shows promise; funding should be conditional on closing the gaps below."
        }
        Decision::Rejected => "The venture does not yet meet the minimum bar for funding.",
    }
}

fn recommendation_for(category: ScoreCategory) -> &'static str {
    match category {
        ScoreCategory::Team => "Strengthen the founding team with additional technical members.",
        ScoreCategory::Product => "Advance the product to at least an MVP and protect core IP.",
        ScoreCategory::Market => "Sharpen the market sizing and show evidence of user demand.",
        ScoreCategory::Financial => {
            "Establish a revenue stream and document the path to profitability."
        }
        ScoreCategory::Kpi => "Track users, CAC and LTV and demonstrate early traction.",
    }
}

/// First category holding the maximum, in canonical order.
fn strongest(scores: &CategoryScores) -> &CategoryScore {
    scores
        .in_order()
        .into_iter()
        .reduce(|best, next| if next.raw_score > best.raw_score { next } else { best })
        .unwrap_or(&scores.team)
}

/// First category holding the minimum, in canonical order.
fn weakest(scores: &CategoryScores) -> &CategoryScore {
    scores
        .in_order()
        .into_iter()
        .reduce(|worst, next| if next.raw_score < worst.raw_score { next } else { worst })
        .unwrap_or(&scores.team)
}
