mod logging;
mod server;
mod slack;
mod telemetry;


pub use logging::*;
pub use server::*;
pub use slack::*;
pub use telemetry::*;

use std::path::Path;

use serde::Deserialize;

use crate::api::{HEALTH_PATH, INVOKE_PATH};
use crate::error::ServerError;

/// Top-level configuration for the slashbot server, loaded from a TOML file.
#[derive(Debug, Default, Deserialize)]
pub struct SlashbotConfig {
    /// HTTP server bind configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Slash command endpoint configuration.
    #[serde(default)]
    pub slack: SlackConfig,
    /// Log output configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// OpenTelemetry distributed tracing configuration.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl SlashbotConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, ServerError> {
        let config: Self =
            toml::from_str(contents).map_err(|e| ServerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the router cannot be built from.
    pub fn validate(&self) -> Result<(), ServerError> {
        let path = self.slack.command_path.as_str();
        if !path.starts_with('/') {
            return Err(ServerError::Config(format!(
                "slack.command_path must start with '/': {path:?}"
            )));
        }
        if path == HEALTH_PATH || path == INVOKE_PATH {
            return Err(ServerError::Config(format!(
                "slack.command_path {path:?} collides with a built-in route"
            )));
        }
        Ok(())
    }

    /// Load the configuration file at `path`, or defaults when it does not exist.
    ///
    /// The returned flag is `true` when the file was found.
    pub fn load(path: impl AsRef<Path>) -> Result<(Self, bool), ServerError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok((Self::default(), false));
        }
        let contents = std::fs::read_to_string(path)?;
        Ok((Self::from_toml(&contents)?, true))
    }
}
