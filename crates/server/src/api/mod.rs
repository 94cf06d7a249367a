pub mod health;
pub mod invoke;
pub mod reply;
pub mod slack;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::config::SlashbotConfig;

/// Service status endpoint.
pub const HEALTH_PATH: &str = "/health";

/// Gateway-style invocation endpoint taking a JSON envelope.
pub const INVOKE_PATH: &str = "/v1/invoke";

/// Shared application state passed to all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Path Slack posts slash commands to.
    pub command_path: String,
    /// Largest accepted request body in bytes.
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn from_config(config: &SlashbotConfig) -> Self {
        Self {
            command_path: config.slack.command_path.clone(),
            max_body_bytes: config.server.max_body_bytes,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_config(&SlashbotConfig::default())
    }
}

/// Build the Axum router with the slash command, invocation and health routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(health::health))
        .route(&state.command_path, post(slack::slash_command))
        .route(INVOKE_PATH, post(invoke::invoke))
        .layer(DefaultBodyLimit::max(state.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
