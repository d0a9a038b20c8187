use super::super::domain::{EvaluationInput, IpStatus, MarketSize, ProductStage, ScoreCategory};
use super::config::EvaluationConfig;
use super::{CategoryScore, CategoryScores};

pub(crate) const MAX_CATEGORY_SCORE: u8 = 10;

const SMALL_USER_BASE: f64 = 100.0;
const LARGE_USER_BASE: f64 = 1_000.0;
const HEALTHY_LTV_TO_CAC: f64 = 3.0;

/// Additive bonus ladder for one category, clamped when finished.
struct Ladder {
    category: ScoreCategory,
    score: u8,
    notes: Vec<String>,
}

impl Ladder {
    fn new(category: ScoreCategory, base: u8) -> Self {
        Self {
            category,
            score: base,
            notes: vec![format!("base {base}")],
        }
    }

    fn award(&mut self, earned: bool, points: u8, reason: impl FnOnce() -> String) {
        if earned {
            self.score = self.score.saturating_add(points);
            self.notes.push(format!("+{points} {}", reason()));
        }
    }

    fn finish(self) -> CategoryScore {
        CategoryScore::new(
            self.category,
            self.score.min(MAX_CATEGORY_SCORE),
            self.notes,
        )
    }
}

pub(crate) fn score_categories(
    input: &EvaluationInput,
    config: &EvaluationConfig,
) -> CategoryScores {
    CategoryScores {
        team: score_team(input),
        product: score_product(input),
        market: score_market(input),
        financial: score_financial(input, config),
        kpi: score_kpi(input),
    }
}

pub(crate) fn score_team(input: &EvaluationInput) -> CategoryScore {
    let mut ladder = Ladder::new(ScoreCategory::Team, 3);
    let size = input.team_size;
    let technical = input.technical_team;

    ladder.award(size >= 3, 2, || format!("team of {size} (3 or more)"));
    ladder.award(size >= 5, 2, || format!("team of {size} (5 or more)"));
    ladder.award(technical >= 2, 2, || {
        format!("{technical} technical members")
    });
    // technical / size >= 0.5 without float division
    let technical_majority = size > 0 && u64::from(technical) * 2 >= u64::from(size);
    ladder.award(technical_majority, 1, || {
        format!("{technical} of {size} members are technical")
    });

    ladder.finish()
}

pub(crate) fn score_product(input: &EvaluationInput) -> CategoryScore {
    let mut ladder = Ladder::new(ScoreCategory::Product, 3);
    let stage = input.product_stage;

    ladder.award(stage == ProductStage::Mvp, 2, || "MVP built".to_string());
    ladder.award(stage == ProductStage::Launched, 4, || {
        "product launched to users".to_string()
    });
    ladder.award(stage == ProductStage::Revenue, 5, || {
        "product generating revenue".to_string()
    });
    ladder.award(input.ip_status == IpStatus::Registered, 2, || {
        "intellectual property registered".to_string()
    });

    ladder.finish()
}

pub(crate) fn score_market(input: &EvaluationInput) -> CategoryScore {
    let mut ladder = Ladder::new(ScoreCategory::Market, 4);
    let users = input.monthly_users;

    ladder.award(input.market_size == MarketSize::Large, 3, || {
        "large addressable market".to_string()
    });
    ladder.award(input.market_size == MarketSize::Medium, 2, || {
        "medium addressable market".to_string()
    });
    ladder.award(users >= SMALL_USER_BASE, 1, || {
        format!("{users:.0} monthly users (100 or more)")
    });
    ladder.award(users >= LARGE_USER_BASE, 2, || {
        format!("{users:.0} monthly users (1000 or more)")
    });

    ladder.finish()
}

pub(crate) fn score_financial(input: &EvaluationInput, config: &EvaluationConfig) -> CategoryScore {
    let mut ladder = Ladder::new(ScoreCategory::Financial, 3);
    let revenue = input.current_revenue;
    let tiers = config.revenue_tiers;

    ladder.award(revenue > 0.0, 3, || "reporting revenue".to_string());
    ladder.award(revenue >= tiers.first, 2, || {
        format!("revenue at or above {:.0}", tiers.first)
    });
    ladder.award(revenue >= tiers.second, 2, || {
        format!("revenue at or above {:.0}", tiers.second)
    });

    ladder.finish()
}

pub(crate) fn score_kpi(input: &EvaluationInput) -> CategoryScore {
    let mut ladder = Ladder::new(ScoreCategory::Kpi, 3);
    let users = input.monthly_users;

    ladder.award(users >= SMALL_USER_BASE, 2, || {
        format!("{users:.0} monthly users (100 or more)")
    });
    ladder.award(users >= LARGE_USER_BASE, 2, || {
        format!("{users:.0} monthly users (1000 or more)")
    });
    ladder.award(input.traction.is_some(), 2, || {
        "documented traction".to_string()
    });
    // CAC of zero means "not measured", never an infinite ratio
    let healthy_unit_economics = input.cac > 0.0 && input.ltv / input.cac >= HEALTHY_LTV_TO_CAC;
    ladder.award(healthy_unit_economics, 1, || {
        format!("LTV/CAC of {:.1}", input.ltv / input.cac)
    });

    ladder.finish()
}
