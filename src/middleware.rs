//! Request middleware.
//!
//! - `request_id_layer` wraps each request in a span carrying the operator key
//!   and a UUID v4, so log lines from one service and one request correlate.
//! - `preflight_layer` answers `OPTIONS` on any path with an empty 200. The
//!   CORS headers themselves are added by response-header layers in the router.

use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::{Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::Instrument;
use uuid::Uuid;

use crate::state::AppState;

/// Extension type for accessing request ID in handlers if needed.
#[derive(Clone, Debug)]
pub struct RequestId(pub Uuid);

/// Open the per-request span, tagged with the serving operator's key.
///
/// Installed as the outermost layer, so preflights and 405s are traced too.
pub async fn request_id_layer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let span = tracing::info_span!(
        "request",
        operator = %state.operator.key,
        request_id = %request_id,
        method = %method,
        path = %path,
        duration_ms = tracing::field::Empty,
    );

    let start = Instant::now();
    request.extensions_mut().insert(RequestId(request_id));

    async move {
        let response = next.run(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::Span::current().record("duration_ms", duration_ms);
        tracing::info!(
            status = response.status().as_u16(),
            duration_ms,
            "Request completed"
        );

        response
    }
    .instrument(span)
    .await
}

/// Short-circuit CORS preflight requests.
pub async fn preflight_layer(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        tracing::debug!("Answering preflight");
        return StatusCode::OK.into_response();
    }
    next.run(request).await
}
