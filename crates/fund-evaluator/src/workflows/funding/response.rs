use serde::{Deserialize, Serialize};

use super::evaluation::{Counterfactual, Decision, EvaluationResult, RiskLevel};

/// Wire shape shared by the LLM evaluator and the rule-based engine, so callers can treat
/// both paths the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResponse {
    pub decision: Decision,
    pub overall_score: f64,
    pub risk_level: RiskLevel,
    pub justification: String,
    pub team_score: f64,
    pub product_score: f64,
    pub market_score: f64,
    pub financial_score: f64,
    pub kpi_score: f64,
    pub counterfactuals: Vec<CounterfactualView>,
    pub recommendations: Vec<String>,
    pub is_rule_based: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterfactualView {
    pub action: String,
    pub impact: String,
    pub probability_increase: String,
    pub score_improvement: String,
}

impl From<&Counterfactual> for CounterfactualView {
    fn from(counterfactual: &Counterfactual) -> Self {
        Self {
            action: counterfactual.action.clone(),
            impact: counterfactual.impact.clone(),
            probability_increase: counterfactual.probability_increase.clone(),
            score_improvement: counterfactual.score_improvement.clone(),
        }
    }
}

impl From<&EvaluationResult> for EvaluationResponse {
    fn from(result: &EvaluationResult) -> Self {
        let scores = &result.scores;
        Self {
            decision: result.decision,
            overall_score: result.overall_score.value(),
            risk_level: result.risk_level,
            justification: result.justification.clone(),
            team_score: f64::from(scores.team.raw_score),
            product_score: f64::from(scores.product.raw_score),
            market_score: f64::from(scores.market.raw_score),
            financial_score: f64::from(scores.financial.raw_score),
            kpi_score: f64::from(scores.kpi.raw_score),
            counterfactuals: result
                .counterfactuals
                .iter()
                .map(CounterfactualView::from)
                .collect(),
            recommendations: result.recommendations.clone(),
            is_rule_based: result.is_rule_based,
        }
    }
}

impl From<EvaluationResult> for EvaluationResponse {
    fn from(result: EvaluationResult) -> Self {
        Self::from(&result)
    }
}
