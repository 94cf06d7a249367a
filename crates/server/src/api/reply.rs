use axum::http::{HeaderMap, HeaderName, HeaderValue, header};
use axum::response::{IntoResponse, Response};
use tracing::error;

use slashbot_core::{Invocation, SlackResponse, SlashError};

use crate::error::ServerError;

/// Header carrying the invocation's request id, inbound and outbound.
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Start an invocation, reusing the caller's `x-request-id` when it has one.
pub fn invocation_from_headers(headers: &HeaderMap) -> Invocation {
    headers
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|id| !id.is_empty())
        .map_or_else(Invocation::generate, Invocation::new)
}

/// Write the outcome of an invocation as an HTTP response.
///
/// Success is a `200` with the JSON reply; any failure is a plain-text
/// `500` and nothing of the reply is written.
pub fn reply(invocation: &Invocation, result: Result<SlackResponse, SlashError>) -> Response {
    let mut response = match result.and_then(|r| r.to_json()) {
        Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(e) => {
            error!(
                parent: invocation.span(),
                error = %e,
                kind = e.kind(),
                "slash command failed"
            );
            ServerError::from(e).into_response()
        }
    };

    if let Ok(value) = HeaderValue::from_str(invocation.request_id()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    #[test]
    fn reuses_inbound_request_id() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("abc-123"));
        assert_eq!(invocation_from_headers(&headers).request_id(), "abc-123");
    }

    #[test]
    fn generates_request_id_when_missing() {
        let invocation = invocation_from_headers(&HeaderMap::new());
        assert!(!invocation.request_id().is_empty());
    }

    #[test]
    fn success_is_json_with_request_id() {
        let invocation = Invocation::new("req-9");
        let response = reply(&invocation, Ok(SlackResponse::in_channel("hi")));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        assert_eq!(response.headers()[REQUEST_ID_HEADER], "req-9");
    }

    #[test]
    fn failure_is_server_error() {
        let invocation = Invocation::new("req-10");
        let err = SlashError::from(slashbot_core::FormError::InvalidUtf8);
        let response = reply(&invocation, Err(err));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[REQUEST_ID_HEADER], "req-10");
    }
}
