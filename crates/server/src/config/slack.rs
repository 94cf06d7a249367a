use serde::Deserialize;

/// Slash command endpoint configuration.
///
/// # Example
///
/// ```toml
/// [slack]
/// command_path = "/slack"
/// ```
#[derive(Debug, Deserialize)]
pub struct SlackConfig {
    /// Path Slack posts slash commands to.
    #[serde(default = "default_command_path")]
    pub command_path: String,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            command_path: default_command_path(),
        }
    }
}

fn default_command_path() -> String {
    "/slack".to_owned()
}
