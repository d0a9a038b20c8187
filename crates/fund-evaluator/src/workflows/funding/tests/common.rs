use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::funding::collaborators::{
    LlmError, LlmEvaluator, UsageError, UsageMeter,
};
use crate::workflows::funding::domain::{EvaluationRequest, UserId};
use crate::workflows::funding::evaluation::{
    CounterfactualOrdering, Decision, EvaluationConfig, EvaluationEngine, RiskLevel,
};
use crate::workflows::funding::fallback::FallbackSelector;
use crate::workflows::funding::response::{CounterfactualView, EvaluationResponse};
use crate::workflows::funding::service::FundingEvaluationService;

/// Only the two mandatory fields plus the "None" traction sentinel.
pub(super) fn empty_request(company: &str) -> EvaluationRequest {
    EvaluationRequest {
        company_name: company.to_string(),
        funding_request: "5,000,000,000".to_string(),
        traction: "None".to_string(),
        ..EvaluationRequest::default()
    }
}

pub(super) fn strong_team_request() -> EvaluationRequest {
    EvaluationRequest {
        team_size: "8".to_string(),
        technical_team: "5".to_string(),
        ..empty_request("Strong Team Labs")
    }
}

/// Every ladder maxed out.
pub(super) fn strong_request() -> EvaluationRequest {
    EvaluationRequest {
        company_name: "Rahyab Analytics".to_string(),
        team_size: "6".to_string(),
        technical_team: "4".to_string(),
        product_stage: "درآمدزا".to_string(),
        ip_status: "Registered".to_string(),
        market_size: "about 2 billion USD".to_string(),
        current_revenue: "2,500,000,000 ریال".to_string(),
        monthly_users: "۵۰۰۰".to_string(),
        cac: "100".to_string(),
        ltv: "900".to_string(),
        funding_request: "8,000,000,000".to_string(),
        traction: "Three enterprise pilots converted to paid plans".to_string(),
    }
}

/// Team 10, Product 10, Market 4, Financial 6, KPI 3: exactly 6.95 before rounding.
pub(super) fn approval_boundary_request() -> EvaluationRequest {
    EvaluationRequest {
        team_size: "5".to_string(),
        technical_team: "3".to_string(),
        product_stage: "revenue".to_string(),
        ip_status: "ثبت شده".to_string(),
        current_revenue: "1000".to_string(),
        ..empty_request("Boundary Co")
    }
}

pub(super) fn engine() -> EvaluationEngine {
    EvaluationEngine::new(EvaluationConfig::default())
}

pub(super) fn engine_with(ordering: CounterfactualOrdering) -> EvaluationEngine {
    EvaluationEngine::new(EvaluationConfig::default().with_ordering(ordering))
}

pub(super) fn llm_response() -> EvaluationResponse {
    EvaluationResponse {
        decision: Decision::Conditional,
        overall_score: 6.4,
        risk_level: RiskLevel::Medium,
        justification: "Model assessment".to_string(),
        team_score: 7.0,
        product_score: 6.5,
        market_score: 6.0,
        financial_score: 5.5,
        kpi_score: 7.0,
        counterfactuals: vec![CounterfactualView {
            action: "Hire a CFO".to_string(),
            impact: "Better financial planning".to_string(),
            probability_increase: "+10%".to_string(),
            score_improvement: "from 5.5 to 7".to_string(),
        }],
        recommendations: vec!["Expand pilots".to_string()],
        is_rule_based: false,
    }
}

#[derive(Default)]
pub(super) struct MemoryUsage {
    counts: Mutex<HashMap<UserId, u32>>,
}

impl MemoryUsage {
    pub(super) fn with_usage(user: &str, used: u32) -> Self {
        let meter = Self::default();
        meter
            .counts
            .lock()
            .expect("usage mutex poisoned")
            .insert(UserId(user.to_string()), used);
        meter
    }

    pub(super) fn count(&self, user: &str) -> u32 {
        self.counts
            .lock()
            .expect("usage mutex poisoned")
            .get(&UserId(user.to_string()))
            .copied()
            .unwrap_or(0)
    }
}

impl UsageMeter for MemoryUsage {
    fn used_today(&self, user: &UserId) -> Result<u32, UsageError> {
        Ok(self
            .counts
            .lock()
            .expect("usage mutex poisoned")
            .get(user)
            .copied()
            .unwrap_or(0))
    }

    fn record_use(&self, user: &UserId) -> Result<(), UsageError> {
        *self
            .counts
            .lock()
            .expect("usage mutex poisoned")
            .entry(user.clone())
            .or_insert(0) += 1;
        Ok(())
    }
}

pub(super) struct OfflineUsage;

impl UsageMeter for OfflineUsage {
    fn used_today(&self, _user: &UserId) -> Result<u32, UsageError> {
        Err(UsageError::Unavailable("redis offline".to_string()))
    }

    fn record_use(&self, _user: &UserId) -> Result<(), UsageError> {
        Err(UsageError::Unavailable("redis offline".to_string()))
    }
}

pub(super) enum LlmBehavior {
    Respond,
    Fail,
    ProviderQuota,
}

pub(super) struct StubLlm {
    behavior: LlmBehavior,
    calls: AtomicUsize,
}

impl StubLlm {
    pub(super) fn new(behavior: LlmBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LlmEvaluator for StubLlm {
    fn evaluate(&self, _request: &EvaluationRequest) -> Result<EvaluationResponse, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            LlmBehavior::Respond => Ok(llm_response()),
            LlmBehavior::Fail => Err(LlmError::Upstream("502 from provider".to_string())),
            LlmBehavior::ProviderQuota => Err(LlmError::QuotaExceeded),
        }
    }
}

pub(super) fn build_service<U, L>(
    usage: Arc<U>,
    llm: Arc<L>,
    credential_present: bool,
) -> FundingEvaluationService<U, L>
where
    U: UsageMeter + 'static,
    L: LlmEvaluator + 'static,
{
    FundingEvaluationService::new(
        usage,
        llm,
        FallbackSelector::new(3, credential_present),
        EvaluationConfig::default(),
    )
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
