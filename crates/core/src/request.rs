use std::collections::{BTreeMap, HashMap};

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::SlashError;
use crate::value::ParamValue;

/// Body of an inbound slash-command request.
///
/// Gateways either forward Slack's form-encoded body untouched or hand over
/// an already-decoded mapping. A request carries exactly one of the two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestBody {
    /// Undecoded `application/x-www-form-urlencoded` text.
    Raw(String),
    /// Parameters already decoded by the gateway.
    Params(BTreeMap<String, ParamValue>),
}

impl RequestBody {
    /// Short name of the body representation, for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Raw(_) => "raw",
            Self::Params(_) => "mapping",
        }
    }
}

/// Canonical inbound event, independent of how it reached the handler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlashCommandRequest {
    /// HTTP method of the original request.
    #[serde(default)]
    pub method: String,
    /// Request body; `None` when absent or `null`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<RequestBody>,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub query_params: HashMap<String, String>,
    #[serde(default)]
    pub path_params: HashMap<String, String>,
    /// Gateway metadata (request id, stage, ...). Carried along, never read.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub context: serde_json::Value,
}

impl SlashCommandRequest {
    /// Create a `POST` request with the given body and nothing else set.
    pub fn new(body: Option<RequestBody>) -> Self {
        Self {
            method: "POST".to_owned(),
            body,
            ..Self::default()
        }
    }

    /// Create a request whose body is raw form-encoded text.
    pub fn form(raw: impl Into<String>) -> Self {
        Self::new(Some(RequestBody::Raw(raw.into())))
    }

    /// Create a request whose body is an already-decoded mapping.
    pub fn mapping<K, V>(params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<ParamValue>,
    {
        let params = params
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::new(Some(RequestBody::Params(params)))
    }

    /// Body representation name, `"absent"` when there is no body.
    pub fn body_kind(&self) -> &'static str {
        self.body.as_ref().map_or("absent", RequestBody::kind)
    }
}

/// The admissible inbound shapes, resolved once into a [`SlashCommandRequest`].
#[derive(Debug, Clone)]
pub enum Envelope {
    /// JSON bytes matching the [`SlashCommandRequest`] schema.
    Raw(Bytes),
    /// A request object that has already been decoded by the caller.
    Event(SlashCommandRequest),
}

impl Envelope {
    /// Resolve the envelope into the canonical request.
    pub fn decode(self) -> Result<SlashCommandRequest, SlashError> {
        match self {
            Self::Raw(bytes) => decode_event(&bytes),
            Self::Event(request) => Ok(request),
        }
    }
}

impl From<SlashCommandRequest> for Envelope {
    fn from(request: SlashCommandRequest) -> Self {
        Self::Event(request)
    }
}

impl From<Bytes> for Envelope {
    fn from(bytes: Bytes) -> Self {
        Self::Raw(bytes)
    }
}

/// Decode a JSON envelope into a [`SlashCommandRequest`].
///
/// Fails with [`SlashError::Decode`] on malformed JSON or when `body` is
/// neither a string, an object, nor `null`.
pub fn decode_event(bytes: &[u8]) -> Result<SlashCommandRequest, SlashError> {
    serde_json::from_slice(bytes).map_err(SlashError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_mapping_body() {
        let request = decode_event(
            br#"{"method":"POST","body":{"user_name":"alice","text":"deploy staging"}}"#,
        )
        .unwrap();
        assert_eq!(request.method, "POST");
        let Some(RequestBody::Params(params)) = &request.body else {
            panic!("expected mapping body, got {:?}", request.body);
        };
        assert_eq!(params.len(), 2);
        assert_eq!(params["user_name"], ParamValue::from("alice"));
        assert_eq!(request.body_kind(), "mapping");
    }

    #[test]
    fn decodes_raw_string_body() {
        let request = decode_event(br#"{"body":"text=hello&text=world"}"#).unwrap();
        assert_eq!(
            request.body,
            Some(RequestBody::Raw("text=hello&text=world".into()))
        );
        assert_eq!(request.body_kind(), "raw");
    }

    #[test]
    fn null_and_missing_body_are_absent() {
        let request = decode_event(br#"{"method":"POST","body":null}"#).unwrap();
        assert!(request.body.is_none());
        let request = decode_event(b"{}").unwrap();
        assert!(request.body.is_none());
        assert_eq!(request.body_kind(), "absent");
    }

    #[test]
    fn decodes_gateway_fields() {
        let request = decode_event(
            br#"{
                "method": "POST",
                "headers": {"Content-Type": "application/json"},
                "queryParams": {"team": "T1"},
                "pathParams": {"command": "deploy"},
                "context": {"requestId": "abc", "stage": "v1"}
            }"#,
        )
        .unwrap();
        assert_eq!(request.headers["Content-Type"], "application/json");
        assert_eq!(request.query_params["team"], "T1");
        assert_eq!(request.path_params["command"], "deploy");
        assert_eq!(request.context["stage"], "v1");
    }

    #[test]
    fn malformed_json_is_decode_error() {
        let err = decode_event(b"{\"body\": ").unwrap_err();
        assert!(matches!(err, SlashError::Decode(_)));
    }

    #[test]
    fn wrong_body_type_is_decode_error() {
        for body in ["42", "true", "[\"a\"]"] {
            let json = format!(r#"{{"body": {body}}}"#);
            let err = decode_event(json.as_bytes()).unwrap_err();
            assert!(matches!(err, SlashError::Decode(_)), "body {body}");
        }
    }

    #[test]
    fn event_envelope_passes_through() {
        let request = SlashCommandRequest::mapping([("text", "hi")]);
        let decoded = Envelope::from(request.clone()).decode().unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn raw_envelope_decodes() {
        let envelope = Envelope::from(Bytes::from_static(br#"{"body":"text=a"}"#));
        let request = envelope.decode().unwrap();
        assert_eq!(request.body, Some(RequestBody::Raw("text=a".into())));
    }
}
