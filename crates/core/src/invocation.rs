use tracing::Span;
use uuid::Uuid;

/// Per-invocation context handed explicitly to the handler.
///
/// Holds the request id and the span every log line of the invocation is
/// recorded under. Created fresh for each request and dropped with it.
#[derive(Debug, Clone)]
pub struct Invocation {
    request_id: String,
    span: Span,
}

impl Invocation {
    /// Create a context for the given request id.
    pub fn new(request_id: impl Into<String>) -> Self {
        let request_id = request_id.into();
        let span = tracing::info_span!("slash_command", request_id = %request_id);
        Self { request_id, span }
    }

    /// Create a context with a freshly generated request id.
    pub fn generate() -> Self {
        Self::new(Uuid::new_v4().to_string())
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn span(&self) -> &Span {
        &self.span
    }
}
