use std::sync::Arc;

use tracing::{debug, info, warn};

use super::collaborators::{LlmError, LlmEvaluator, UsageMeter};
use super::domain::{EvaluationRequest, IntakeError, UserId};
use super::evaluation::{EvaluationConfig, EvaluationEngine};
use super::fallback::{EvaluationPath, FallbackReason, FallbackSelector};
use super::response::EvaluationResponse;

/// Service composing the fallback selector, the injected LLM evaluator, and the rule engine.
pub struct FundingEvaluationService<U, L> {
    usage: Arc<U>,
    llm: Arc<L>,
    selector: FallbackSelector,
    engine: Arc<EvaluationEngine>,
}

/// Response plus the path that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ServedEvaluation {
    pub path: EvaluationPath,
    pub response: EvaluationResponse,
}

impl<U, L> FundingEvaluationService<U, L>
where
    U: UsageMeter + 'static,
    L: LlmEvaluator + 'static,
{
    pub fn new(
        usage: Arc<U>,
        llm: Arc<L>,
        selector: FallbackSelector,
        config: EvaluationConfig,
    ) -> Self {
        Self {
            usage,
            llm,
            selector,
            engine: Arc::new(EvaluationEngine::new(config)),
        }
    }

    pub fn engine(&self) -> &EvaluationEngine {
        &self.engine
    }

    /// Try the LLM evaluator when allowed, otherwise (or on failure) answer with the rules.
    pub fn evaluate(
        &self,
        user: &UserId,
        request: &EvaluationRequest,
    ) -> Result<ServedEvaluation, IntakeError> {
        request.validate()?;

        let used_today = self.usage.used_today(user);
        if let Err(error) = &used_today {
            warn!(user = %user.0, %error, "usage meter unavailable");
        }

        let reason = match self.selector.select(used_today.as_ref().copied()) {
            EvaluationPath::RuleBased(reason) => reason,
            EvaluationPath::Llm => match self.llm.evaluate(request) {
                Ok(response) => {
                    if let Err(error) = self.usage.record_use(user) {
                        warn!(user = %user.0, %error, "failed to record LLM usage");
                    }
                    info!(user = %user.0, company = %request.company_name, "served LLM evaluation");
                    return Ok(ServedEvaluation {
                        path: EvaluationPath::Llm,
                        response,
                    });
                }
                Err(LlmError::NotConfigured) => FallbackReason::MissingCredential,
                Err(LlmError::QuotaExceeded) => FallbackReason::QuotaExhausted,
                Err(error) => {
                    warn!(user = %user.0, %error, "LLM evaluator failed");
                    FallbackReason::UpstreamFailure
                }
            },
        };

        Ok(self.rule_based(request, reason))
    }

    /// Answer with the deterministic engine only; the usage meter is not consulted.
    pub fn evaluate_rule_based(
        &self,
        request: &EvaluationRequest,
    ) -> Result<ServedEvaluation, IntakeError> {
        request.validate()?;
        Ok(self.rule_based(request, FallbackReason::Requested))
    }

    fn rule_based(&self, request: &EvaluationRequest, reason: FallbackReason) -> ServedEvaluation {
        let result = self.engine.evaluate_request(request);
        debug!(
            company = %result.company_name,
            scores = ?result.scores.raw(),
            overall = %result.overall_score,
            "rule-based category scores"
        );
        info!(
            company = %result.company_name,
            decision = result.decision.label(),
            reason = reason.label(),
            "served rule-based evaluation"
        );

        ServedEvaluation {
            path: EvaluationPath::RuleBased(reason),
            response: EvaluationResponse::from(&result),
        }
    }
}
