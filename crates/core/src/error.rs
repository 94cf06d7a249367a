use thiserror::Error;

/// Errors that terminate a single slash-command invocation.
///
/// Every variant is surfaced to the caller as a server error; none of them
/// are retried.
#[derive(Debug, Error)]
pub enum SlashError {
    /// The inbound envelope was malformed JSON or had a body of the wrong type.
    #[error("failed to decode request: {0}")]
    Decode(#[source] serde_json::Error),

    /// The raw body could not be parsed as `application/x-www-form-urlencoded`.
    #[error("failed to parse form body: {0}")]
    FormParse(#[from] FormError),

    /// The response envelope could not be rendered to JSON.
    #[error("failed to serialize response: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl SlashError {
    /// Short machine-readable name of the error kind, for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Decode(_) => "decode",
            Self::FormParse(_) => "form_parse",
            Self::Serialize(_) => "serialize",
        }
    }
}

/// Ways a form-encoded body can be malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// A `%` was not followed by two hexadecimal digits.
    #[error("invalid percent escape {escape:?} at byte {offset}")]
    InvalidEscape {
        /// The offending escape text (at most three bytes).
        escape: String,
        /// Byte offset of the `%` within the whole body.
        offset: usize,
    },

    /// A `;` appeared where only `&` is accepted as a pair separator.
    #[error("invalid semicolon separator at byte {offset}")]
    Semicolon {
        /// Byte offset of the `;` within the whole body.
        offset: usize,
    },

    /// A decoded key or value was not valid UTF-8.
    #[error("decoded form value is not valid UTF-8")]
    InvalidUtf8,
}
