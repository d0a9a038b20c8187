use serde::{Deserialize, Serialize};

use super::super::domain::ScoreCategory;
use super::config::CounterfactualOrdering;
use super::rules::MAX_CATEGORY_SCORE;
use super::{CategoryScores, STRONG_CATEGORY_SCORE};

pub(crate) const MAX_COUNTERFACTUALS: usize = 3;

/// A concrete change the applicant could make and what it would do to the category score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counterfactual {
    pub category: ScoreCategory,
    pub action: String,
    pub impact: String,
    pub probability_increase: String,
    pub score_improvement: String,
}

struct Playbook {
    category: ScoreCategory,
    delta: u8,
    action: &'static str,
    impact: &'static str,
    probability_increase: &'static str,
}

// Market is not listed: a low market score never produces a counterfactual.
const PLAYBOOKS: [Playbook; 4] = [
    Playbook {
        category: ScoreCategory::Team,
        delta: 2,
        action: "Recruit at least two more technical members so engineers make up half the team",
        impact: "A larger, technically balanced team lowers execution risk for reviewers.",
        probability_increase: "+15%",
    },
    Playbook {
        category: ScoreCategory::Product,
        delta: 3,
        action: "Ship a usable product to real users and register the core intellectual property",
        impact: "A launched, protected product shows the idea survives contact with the market.",
        probability_increase: "+20%",
    },
    Playbook {
        category: ScoreCategory::Financial,
        delta: 3,
        action: "Close first paying customers and document recurring revenue",
        impact: "Revenue is the strongest evidence that the business model works.",
        probability_increase: "+25%",
    },
    Playbook {
        category: ScoreCategory::Kpi,
        delta: 2,
        action: "Grow monthly active users past 1,000 and keep LTV at least three times CAC",
        impact: "Measurable traction and healthy unit economics de-risk the funding request.",
        probability_increase: "+15%",
    },
];

pub(crate) fn generate(
    scores: &CategoryScores,
    ordering: CounterfactualOrdering,
) -> Vec<Counterfactual> {
    let mut candidates: Vec<(&Playbook, u8)> = PLAYBOOKS
        .iter()
        .map(|playbook| (playbook, scores.get(playbook.category).raw_score))
        .filter(|(_, raw)| *raw < STRONG_CATEGORY_SCORE)
        .collect();

    if ordering == CounterfactualOrdering::LargestDeficit {
        // stable sort keeps the fixed order for ties
        candidates.sort_by_key(|(_, raw)| *raw);
    }

    candidates
        .into_iter()
        .take(MAX_COUNTERFACTUALS)
        .map(|(playbook, raw)| {
            let projected = raw.saturating_add(playbook.delta).min(MAX_CATEGORY_SCORE);
            Counterfactual {
                category: playbook.category,
                action: playbook.action.to_string(),
                impact: playbook.impact.to_string(),
                probability_increase: playbook.probability_increase.to_string(),
                score_improvement: format!("from {raw} to {projected}"),
            }
        })
        .collect()
}
