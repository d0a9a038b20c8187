use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};

use super::collaborators::{LlmEvaluator, UsageMeter};
use super::domain::{EvaluationRequest, UserId};
use super::service::{FundingEvaluationService, ServedEvaluation};
use crate::error::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const EVALUATION_PATH_HEADER: &str = "x-evaluation-path";

/// Router builder exposing the evaluation endpoints.
pub fn funding_router<U, L>(service: Arc<FundingEvaluationService<U, L>>) -> Router
where
    U: UsageMeter + 'static,
    L: LlmEvaluator + 'static,
{
    Router::new()
        .route("/api/v1/funding/evaluate", post(evaluate_handler::<U, L>))
        .route(
            "/api/v1/funding/evaluate/rule-based",
            post(rule_based_handler::<U, L>),
        )
        .with_state(service)
}

pub(crate) async fn evaluate_handler<U, L>(
    State(service): State<Arc<FundingEvaluationService<U, L>>>,
    headers: HeaderMap,
    axum::Json(request): axum::Json<EvaluationRequest>,
) -> Result<Response, AppError>
where
    U: UsageMeter + 'static,
    L: LlmEvaluator + 'static,
{
    let user = user_from_headers(&headers);
    let served = service.evaluate(&user, &request)?;
    Ok(respond(served))
}

pub(crate) async fn rule_based_handler<U, L>(
    State(service): State<Arc<FundingEvaluationService<U, L>>>,
    axum::Json(request): axum::Json<EvaluationRequest>,
) -> Result<Response, AppError>
where
    U: UsageMeter + 'static,
    L: LlmEvaluator + 'static,
{
    let served = service.evaluate_rule_based(&request)?;
    Ok(respond(served))
}

fn respond(served: ServedEvaluation) -> Response {
    let mut response = (StatusCode::OK, axum::Json(served.response)).into_response();
    response.headers_mut().insert(
        EVALUATION_PATH_HEADER,
        HeaderValue::from_static(served.path.label()),
    );
    response
}

fn user_from_headers(headers: &HeaderMap) -> UserId {
    headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| UserId(value.to_string()))
        .unwrap_or_else(UserId::anonymous)
}
