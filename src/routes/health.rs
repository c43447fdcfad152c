//! Health check endpoint for the orchestrator.
//!
//! A liveness probe only: it reports `{ok: true}` whenever the process can
//! answer HTTP. There are no dependency checks and no readiness states.

use axum::{extract::State, http::Method, Json};

use crate::envelope::HealthStatus;
use crate::state::AppState;

pub async fn health(State(state): State<AppState>, method: Method) -> Json<HealthStatus> {
    state.metrics.record_health(method.as_str());
    Json(HealthStatus::ALIVE)
}
