mod config;
mod counterfactual;
mod narrative;
mod policy;
mod rules;

pub use config::{CounterfactualOrdering, EvaluationConfig, RevenueTiers};
pub use counterfactual::Counterfactual;
pub use policy::{Decision, OverallScore, RiskLevel};

use super::domain::{EvaluationInput, EvaluationRequest, ScoreCategory};
use serde::{Deserialize, Serialize};

/// Categories at or above this raw score need neither a counterfactual nor a recommendation.
pub(crate) const STRONG_CATEGORY_SCORE: u8 = 7;

/// Stateless rule-based evaluator; the deterministic stand-in for the LLM judgment.
#[derive(Debug, Clone, Default)]
pub struct EvaluationEngine {
    config: EvaluationConfig,
}

impl EvaluationEngine {
    pub fn new(config: EvaluationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Normalize the raw form and evaluate it. Total over any request.
    pub fn evaluate_request(&self, request: &EvaluationRequest) -> EvaluationResult {
        self.evaluate(&EvaluationInput::from(request))
    }

    pub fn evaluate(&self, input: &EvaluationInput) -> EvaluationResult {
        let scores = rules::score_categories(input, &self.config);
        let overall_score = policy::aggregate(&scores);
        let decision = Decision::for_score(overall_score);

        let counterfactuals =
            counterfactual::generate(&scores, self.config.counterfactual_ordering);
        let recommendations = narrative::recommendations(&scores);
        let justification =
            narrative::justification(&input.company_name, overall_score, decision, &scores);

        EvaluationResult {
            company_name: input.company_name.clone(),
            overall_score,
            decision,
            risk_level: decision.risk_level(),
            scores,
            counterfactuals,
            recommendations,
            justification,
            is_rule_based: true,
        }
    }
}

/// One category's raw score and its share of the overall score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: ScoreCategory,
    pub raw_score: u8,
    pub weight: f64,
    pub weighted_contribution: f64,
    /// Audit trail of the bonuses that produced `raw_score`.
    pub notes: Vec<String>,
}

impl CategoryScore {
    pub(crate) fn new(category: ScoreCategory, raw_score: u8, notes: Vec<String>) -> Self {
        let weight = category.weight();
        Self {
            category,
            raw_score,
            weight,
            weighted_contribution: f64::from(raw_score) * weight,
            notes,
        }
    }
}

/// The five category scores of a single evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub team: CategoryScore,
    pub product: CategoryScore,
    pub market: CategoryScore,
    pub financial: CategoryScore,
    pub kpi: CategoryScore,
}

impl CategoryScores {
    /// Scores in canonical category order.
    pub fn in_order(&self) -> [&CategoryScore; 5] {
        [
            &self.team,
            &self.product,
            &self.market,
            &self.financial,
            &self.kpi,
        ]
    }

    pub fn get(&self, category: ScoreCategory) -> &CategoryScore {
        match category {
            ScoreCategory::Team => &self.team,
            ScoreCategory::Product => &self.product,
            ScoreCategory::Market => &self.market,
            ScoreCategory::Financial => &self.financial,
            ScoreCategory::Kpi => &self.kpi,
        }
    }

    pub fn raw(&self) -> [u8; 5] {
        self.in_order().map(|score| score.raw_score)
    }
}

/// Full output of the rule-based engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub company_name: String,
    pub overall_score: OverallScore,
    pub decision: Decision,
    pub risk_level: RiskLevel,
    pub scores: CategoryScores,
    pub counterfactuals: Vec<Counterfactual>,
    pub recommendations: Vec<String>,
    pub justification: String,
    pub is_rule_based: bool,
}
