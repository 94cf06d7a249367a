use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single slash-command parameter value of arbitrary JSON type.
///
/// Rendering goes through [`fmt::Display`]: strings are written verbatim,
/// scalars in their JSON form, and lists or nested objects as compact JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    List(Vec<ParamValue>),
    Object(BTreeMap<String, ParamValue>),
}

impl ParamValue {
    /// Name of the variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Object(_) => "object",
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
            Self::List(_) | Self::Object(_) => write!(f, "{}", serde_json::Value::from(self)),
        }
    }
}

impl From<&ParamValue> for serde_json::Value {
    fn from(value: &ParamValue) -> Self {
        match value {
            ParamValue::Null => Self::Null,
            ParamValue::Bool(b) => Self::Bool(*b),
            ParamValue::Number(n) => Self::Number(n.clone()),
            ParamValue::String(s) => Self::String(s.clone()),
            ParamValue::List(items) => Self::Array(items.iter().map(Self::from).collect()),
            ParamValue::Object(map) => Self::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for ParamValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ParamValue {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn strings_render_verbatim() {
        assert_eq!(parse(r#""deploy staging""#).to_string(), "deploy staging");
        assert_eq!(parse(r#""""#).to_string(), "");
    }

    #[test]
    fn scalars_render_as_json_text() {
        assert_eq!(parse("42").to_string(), "42");
        assert_eq!(parse("-7").to_string(), "-7");
        assert_eq!(parse("1.5").to_string(), "1.5");
        assert_eq!(parse("true").to_string(), "true");
        assert_eq!(parse("null").to_string(), "null");
    }

    #[test]
    fn nested_values_render_as_compact_json() {
        assert_eq!(parse(r#"[1, "two", false]"#).to_string(), r#"[1,"two",false]"#);
        assert_eq!(
            parse(r#"{"b": 2, "a": {"c": null}}"#).to_string(),
            r#"{"a":{"c":null},"b":2}"#
        );
    }

    #[test]
    fn deserializes_into_matching_variant() {
        assert!(matches!(parse("null"), ParamValue::Null));
        assert!(matches!(parse("false"), ParamValue::Bool(false)));
        assert!(matches!(parse("3"), ParamValue::Number(_)));
        assert!(matches!(parse(r#""x""#), ParamValue::String(_)));
        assert!(matches!(parse("[]"), ParamValue::List(_)));
        assert!(matches!(parse("{}"), ParamValue::Object(_)));
    }

    #[test]
    fn converts_from_json_value() {
        let value = ParamValue::from(serde_json::json!({"n": [1, 2]}));
        assert_eq!(value.kind(), "object");
        assert_eq!(value.to_string(), r#"{"n":[1,2]}"#);
    }

    #[test]
    fn serializes_back_to_plain_json() {
        let value = parse(r#"{"user": "alice", "ids": [1, 2]}"#);
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json, serde_json::json!({"user": "alice", "ids": [1, 2]}));
    }
}
