pub mod chatbots;
pub mod health;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Routes mounted under `/api/v1`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/chatbots/{id}", axum::routing::delete(chatbots::delete))
        .route(
            "/chatbots/{id}/state",
            get(chatbots::get_state).put(chatbots::change_state),
        )
        .route("/chatbots/{id}/active", get(chatbots::get_active))
        .route("/chatbots/{id}/activate", post(chatbots::activate))
        .route("/chatbots/{id}/deactivate", post(chatbots::deactivate))
        .route("/chatbots/{id}/draft", post(chatbots::set_draft))
}
