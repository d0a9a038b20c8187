use super::domain::{EvaluationRequest, UserId};
use super::response::EvaluationResponse;

/// Per-user daily LLM usage counter, owned outside the engine and injected into the service.
pub trait UsageMeter: Send + Sync {
    fn used_today(&self, user: &UserId) -> Result<u32, UsageError>;
    fn record_use(&self, user: &UserId) -> Result<(), UsageError>;
}

/// Usage metering failure. Treated as "quota unknown" and never fails a request.
#[derive(Debug, thiserror::Error)]
pub enum UsageError {
    #[error("usage store unavailable: {0}")]
    Unavailable(String),
}

/// The model-backed evaluator tried before the rule-based fallback.
pub trait LlmEvaluator: Send + Sync {
    fn evaluate(&self, request: &EvaluationRequest) -> Result<EvaluationResponse, LlmError>;
}

/// Reasons the LLM path could not produce an evaluation.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("LLM evaluator is not configured")]
    NotConfigured,
    #[error("LLM provider quota exceeded")]
    QuotaExceeded,
    #[error("LLM request failed: {0}")]
    Upstream(String),
    #[error("LLM returned an unusable payload: {0}")]
    MalformedResponse(String),
}

/// Stand-in used when no model adapter is wired in; every call falls back.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledLlmEvaluator;

impl LlmEvaluator for DisabledLlmEvaluator {
    fn evaluate(&self, _request: &EvaluationRequest) -> Result<EvaluationResponse, LlmError> {
        Err(LlmError::NotConfigured)
    }
}
