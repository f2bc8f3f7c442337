//! Health check handler

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Public health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Status indicator (always "ok")
    pub status: String,
    /// Attempts each agent call is allowed
    pub agent_max_retries: u32,
}

/// GET /api/v1/health
///
/// No authentication; meant for load balancers.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    tracing::debug!("Health check requested - system operational");
    Json(HealthCheckResponse {
        status: "ok".to_string(),
        agent_max_retries: state.agent_core.retry_config().max_retries,
    })
}
