//! Startup funding evaluation: request intake, fallback selection between the LLM evaluator
//! and the deterministic rule-based engine, and the HTTP surface for both.

pub mod collaborators;
pub mod domain;
pub mod evaluation;
pub mod fallback;
pub mod import;
pub mod normalizer;
pub mod response;
pub mod router;
pub mod service;
pub mod usage;

#[cfg(test)]
mod tests;

pub use collaborators::{DisabledLlmEvaluator, LlmError, LlmEvaluator, UsageError, UsageMeter};
pub use domain::{
    EvaluationInput, EvaluationRequest, IntakeError, IpStatus, MarketSize, ProductStage,
    ScoreCategory, UserId,
};
pub use evaluation::{
    CategoryScore, CategoryScores, Counterfactual, CounterfactualOrdering, Decision,
    EvaluationConfig, EvaluationEngine, EvaluationResult, OverallScore, RevenueTiers, RiskLevel,
};
pub use fallback::{EvaluationPath, FallbackReason, FallbackSelector};
pub use import::{BatchEntry, BatchImport, BatchImportError, BatchImporter, RejectedRow};
pub use normalizer::parse_numeric;
pub use response::{CounterfactualView, EvaluationResponse};
pub use router::funding_router;
pub use service::{FundingEvaluationService, ServedEvaluation};
pub use usage::DailyUsageMeter;
