use axum::http::HeaderMap;
use axum::response::Response;
use bytes::Bytes;

use slashbot_core::{Envelope, respond};

use super::reply::{invocation_from_headers, reply};

/// `POST /v1/invoke` -- answer a slash command described by a gateway's
/// JSON envelope.
pub async fn invoke(headers: HeaderMap, body: Bytes) -> Response {
    let invocation = invocation_from_headers(&headers);
    let result = respond(Envelope::Raw(body), &invocation);
    reply(&invocation, result)
}
