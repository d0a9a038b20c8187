use crate::cli::ServeArgs;
use crate::infra::{build_funding_service, AppState};
use crate::routes::with_funding_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use fund_evaluator::config::AppConfig;
use fund_evaluator::error::AppError;
use fund_evaluator::telemetry;
use fund_evaluator::workflows::funding::DailyUsageMeter;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

const USAGE_PRUNE_INTERVAL: Duration = Duration::from_secs(60 * 60);

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let usage = Arc::new(DailyUsageMeter::default());
    spawn_usage_pruning(usage.clone());
    let funding_service = Arc::new(build_funding_service(&config.evaluation, usage));

    let app = with_funding_routes(funding_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        ordering = config.evaluation.counterfactual_ordering.label(),
        daily_llm_limit = config.evaluation.daily_llm_limit,
        llm_credential = config.evaluation.llm_credential_present(),
        "funding evaluator ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

fn spawn_usage_pruning(usage: Arc<DailyUsageMeter>) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(USAGE_PRUNE_INTERVAL);
        loop {
            ticker.tick().await;
            match usage.prune() {
                Ok(removed) => debug!(removed, "pruned stale usage counters"),
                Err(error) => warn!(%error, "failed to prune usage counters"),
            }
        }
    });
}
