use fund_evaluator::config::EvaluationSettings;
use fund_evaluator::workflows::funding::{
    CounterfactualOrdering, DailyUsageMeter, DisabledLlmEvaluator, EvaluationConfig,
    FallbackSelector, FundingEvaluationService,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type FundingService = FundingEvaluationService<DailyUsageMeter, DisabledLlmEvaluator>;

/// Service wired with the in-process meter; no model adapter ships with this binary.
pub(crate) fn build_funding_service(
    settings: &EvaluationSettings,
    usage: Arc<DailyUsageMeter>,
) -> FundingService {
    FundingEvaluationService::new(
        usage,
        Arc::new(DisabledLlmEvaluator),
        FallbackSelector::new(settings.daily_llm_limit, settings.llm_credential_present()),
        EvaluationConfig::default().with_ordering(settings.counterfactual_ordering),
    )
}

const ORDERING_CHOICES: &str = "expected fixed or deficit";

pub(crate) fn parse_ordering(raw: &str) -> Result<CounterfactualOrdering, String> {
    CounterfactualOrdering::from_label(raw).ok_or_else(|| {
        format!("unknown counterfactual ordering '{raw}' ({ORDERING_CHOICES})")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ordering_accepts_both_spellings() {
        assert_eq!(
            parse_ordering("Deficit"),
            Ok(CounterfactualOrdering::LargestDeficit)
        );
        assert_eq!(
            parse_ordering("fixed_order"),
            Ok(CounterfactualOrdering::FixedOrder)
        );
        assert!(parse_ordering("random").is_err());
    }

    #[test]
    fn service_uses_configured_ordering() {
        let settings = EvaluationSettings {
            counterfactual_ordering: CounterfactualOrdering::LargestDeficit,
            daily_llm_limit: 5,
            llm_api_key: None,
        };

        let service = build_funding_service(&settings, Arc::new(DailyUsageMeter::default()));

        assert_eq!(
            service.engine().config().counterfactual_ordering,
            CounterfactualOrdering::LargestDeficit
        );
    }
}
