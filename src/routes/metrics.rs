//! Prometheus scrape endpoint.

use axum::{extract::State, http::header::CONTENT_TYPE, response::IntoResponse};

use crate::config::METRICS_CONTENT_TYPE;
use crate::state::AppState;

pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    ([(CONTENT_TYPE, METRICS_CONTENT_TYPE)], state.metrics.render())
}
