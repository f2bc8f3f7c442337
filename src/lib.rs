pub mod agents;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod models;
pub mod queries;
pub mod services;
pub mod state;

pub use config::Config;
pub use database::{DbConn, DbPool};
pub use error::{Error, Result};
pub use state::AppState;

use axum::Router;
use tower_http::trace::TraceLayer;

/// Load configuration from environment variables
pub fn load_config() -> std::result::Result<Config, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    config.validate()?;
    Ok(config)
}

/// Builds the HTTP application with `/api/v1` routes and request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", handlers::api_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
