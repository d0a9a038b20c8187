use crate::infra::{AppState, FundingService};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use fund_evaluator::workflows::funding::funding_router;
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_funding_routes(service: Arc<FundingService>) -> axum::Router {
    funding_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::build_funding_service;
    use axum::body::Body;
    use axum::http::Request;
    use fund_evaluator::config::EvaluationSettings;
    use fund_evaluator::workflows::funding::{CounterfactualOrdering, DailyUsageMeter};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tower::ServiceExt;

    fn test_app(ready: bool) -> (axum::Router, Arc<AtomicBool>) {
        let settings = EvaluationSettings {
            counterfactual_ordering: CounterfactualOrdering::FixedOrder,
            daily_llm_limit: 10,
            llm_api_key: Some("test-key".to_string()),
        };
        let service = Arc::new(build_funding_service(
            &settings,
            Arc::new(DailyUsageMeter::default()),
        ));
        let readiness = Arc::new(AtomicBool::new(ready));
        let state = AppState {
            readiness: readiness.clone(),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };

        (
            with_funding_routes(service).layer(Extension(state)),
            readiness,
        )
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json payload")
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (app, _) = test_app(true);

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn readiness_tracks_the_flag() {
        let (app, readiness) = test_app(false);

        let response = app
            .clone()
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json_body(response).await["status"], "initializing");

        readiness.store(true, Ordering::Release);
        let response = app
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn metrics_render_as_prometheus_text() {
        let (app, _) = test_app(true);

        let response = app
            .oneshot(Request::get("/metrics").body(Body::empty()).expect("request"))
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            Some("text/plain; version=0.0.4")
        );
    }

    #[tokio::test]
    async fn evaluation_falls_back_without_a_model_adapter() {
        let (app, _) = test_app(true);

        let response = app
            .oneshot(
                Request::post("/api/v1/funding/evaluate")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header("x-user-id", "founder-42")
                    .body(Body::from(
                        json!({
                            "companyName": "Strong Team Labs",
                            "fundingRequest": "5000",
                            "teamSize": "8",
                            "technicalTeam": "5"
                        })
                        .to_string(),
                    ))
                    .expect("request"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get("x-evaluation-path")
                .and_then(|v| v.to_str().ok()),
            Some("rule-based")
        );
        let body = json_body(response).await;
        assert_eq!(body["overall_score"], 4.6);
        assert_eq!(body["decision"], "Rejected");
        assert_eq!(body["is_rule_based"], true);
    }
}
