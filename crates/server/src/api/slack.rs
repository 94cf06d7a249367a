//! Native HTTP adapter for slash commands.
//!
//! Slack posts slash commands as `application/x-www-form-urlencoded`. A
//! gateway in front of the server may instead forward a JSON envelope that
//! already describes the request. Both land on the same route.

use std::collections::HashMap;

use axum::extract::RawQuery;
use axum::http::{HeaderMap, Method, header};
use axum::response::Response;
use bytes::Bytes;

use slashbot_core::{
    FormError, RequestBody, SlashCommandRequest, SlashError, decode_event, process,
};

use super::reply::{invocation_from_headers, reply};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// `POST <command_path>` -- answer a slash command.
pub async fn slash_command(
    method: Method,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Response {
    let invocation = invocation_from_headers(&headers);
    let result = native_request(&method, &headers, query.as_deref(), &body)
        .and_then(|request| process(request, &invocation));
    reply(&invocation, result)
}

/// Resolve a native HTTP request into the canonical request.
///
/// Form bodies are kept raw for the extractor. An empty non-form body is a
/// request without a body; anything else must be a JSON envelope.
/// A JSON envelope takes priority: its method and headers replace the ones
/// the HTTP request actually arrived with.
pub fn native_request(
    method: &Method,
    headers: &HeaderMap,
    query: Option<&str>,
    body: &[u8],
) -> Result<SlashCommandRequest, SlashError> {
    if is_form(headers) {
        let raw = std::str::from_utf8(body).map_err(|_| FormError::InvalidUtf8)?;
        return Ok(SlashCommandRequest {
            method: method.to_string(),
            body: Some(RequestBody::Raw(raw.to_owned())),
            headers: header_map(headers),
            query_params: query_map(query),
            ..SlashCommandRequest::default()
        });
    }

    if body.is_empty() {
        return Ok(SlashCommandRequest {
            method: method.to_string(),
            body: None,
            headers: header_map(headers),
            query_params: query_map(query),
            ..SlashCommandRequest::default()
        });
    }

    decode_event(body)
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| ct.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
}

fn header_map(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_owned(), v.to_owned()))
        })
        .collect()
}

fn query_map(query: Option<&str>) -> HashMap<String, String> {
    query
        .and_then(|q| serde_urlencoded::from_str(q).ok())
        .unwrap_or_default()
}
