use std::fmt::Write;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::SlashError;
use crate::params::Params;

/// Slack `response_type` that makes the reply visible to the whole channel.
pub const IN_CHANNEL: &str = "in_channel";

/// First line of every reply built from a decoded mapping.
pub const MAPPING_GREETING: &str = "Here's what I understood";

/// First line of every reply built from form `text` values.
pub const LINES_GREETING: &str = "You talkin to me?";

/// Slash-command reply envelope.
///
/// See <https://api.slack.com/interactivity/slash-commands#responding_to_commands>.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackResponse {
    pub response_type: String,
    /// Message text; always starts with a greeting line.
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mrkdwn: Option<bool>,
}

impl SlackResponse {
    /// Build an `in_channel` reply with the given text.
    pub fn in_channel(text: impl Into<String>) -> Self {
        Self {
            response_type: IN_CHANNEL.to_owned(),
            text: text.into(),
            mrkdwn: None,
        }
    }

    /// Enable Slack markdown rendering.
    #[must_use]
    pub fn with_mrkdwn(mut self) -> Self {
        self.mrkdwn = Some(true);
        self
    }

    /// Serialize to JSON bytes for an HTTP response body.
    pub fn to_json(&self) -> Result<Bytes, SlashError> {
        serde_json::to_vec(self)
            .map(Bytes::from)
            .map_err(SlashError::Serialize)
    }

    /// Serialize to a JSON value for function-result style callers.
    pub fn to_value(&self) -> Result<serde_json::Value, SlashError> {
        serde_json::to_value(self).map_err(SlashError::Serialize)
    }
}

/// Render the reply for an extracted parameter set.
pub fn build_response(params: &Params) -> SlackResponse {
    match params {
        Params::Mapping(map) => {
            let mut text = MAPPING_GREETING.to_owned();
            for (key, value) in map {
                let _ = write!(text, "\n*{key}*: {value}");
            }
            SlackResponse::in_channel(text).with_mrkdwn()
        }
        Params::Lines(lines) => {
            let mut text = LINES_GREETING.to_owned();
            for line in lines {
                let _ = write!(text, "\n>>> {line}");
            }
            SlackResponse::in_channel(text)
        }
    }
}
