//! `POST /op`: compute the operator's fact for the resolved input.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::config::{METHOD_NOT_ALLOWED_BODY, PAYLOAD_TOO_LARGE_BODY};
use crate::envelope::{decode_request, OperationRequest, OperationResponse};
use crate::state::AppState;

/// Run the operator.
///
/// The request is counted before the body is looked at. An undecodable body
/// is treated as `{}` and still answered 200. The one exception is a body
/// over the configured `http.max_body_bytes`, which gets a 413 rather than a
/// value computed for the wrong input.
pub async fn compute(
    State(state): State<AppState>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    state.metrics.record_op(method.as_str());

    let request = match body {
        Ok(bytes) => decode_request(&bytes),
        Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            tracing::warn!(
                error = %e,
                limit = ?state.max_body_bytes,
                "Request body over limit, refusing to compute"
            );
            return (StatusCode::PAYLOAD_TOO_LARGE, PAYLOAD_TOO_LARGE_BODY).into_response();
        }
        Err(e) => {
            tracing::debug!(error = %e, "Unreadable request body, using empty input");
            OperationRequest::default()
        }
    };

    let operand = request.operand();
    let value = state.operator.compute(operand);
    tracing::debug!(
        key = state.operator.key,
        input_chars = operand.chars().count(),
        value = ?value,
        "Computed"
    );

    Json(OperationResponse::new(state.operator.key, value)).into_response()
}

/// Any method other than POST (and OPTIONS, handled upstream).
pub async fn method_not_allowed(
    State(state): State<AppState>,
    method: Method,
) -> (StatusCode, &'static str) {
    state.metrics.record_op(method.as_str());
    tracing::debug!(%method, "Method not allowed on /op");
    (StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_BODY)
}
