//! HTTP routes shared by every operator.
//!
//! `/op` runs the operator, `/healthz` is the liveness probe and `/metrics`
//! the scrape target. All responses carry permissive CORS headers, and
//! `OPTIONS` on any path is answered before routing.

pub mod health;
pub mod metrics;
pub mod op;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use axum::http::header::{
    HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN,
};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::{
    CORS_ALLOW_HEADERS, CORS_ALLOW_METHODS, CORS_ALLOW_ORIGIN, HEALTH_PATH, METRICS_PATH, OP_PATH,
};
use crate::middleware::{preflight_layer, request_id_layer};
use crate::state::AppState;

/// Creates the Axum router for one operator.
///
/// `/op` bodies are unlimited unless `state.max_body_bytes` sets a cap.
pub fn create_router(state: AppState) -> Router {
    let body_limit = match state.max_body_bytes {
        Some(max) => DefaultBodyLimit::max(max),
        None => DefaultBodyLimit::disable(),
    };

    Router::new()
        .route(OP_PATH, post(op::compute).fallback(op::method_not_allowed))
        .route(HEALTH_PATH, get(health::health))
        .route(METRICS_PATH, get(metrics::metrics))
        .layer(body_limit)
        .with_state(state.clone())
        .layer(middleware::from_fn(preflight_layer))
        // CORS headers sit outside the preflight layer so OPTIONS gets them too
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(CORS_ALLOW_ORIGIN),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(CORS_ALLOW_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(CORS_ALLOW_HEADERS),
        ))
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn_with_state(state, request_id_layer))
}
