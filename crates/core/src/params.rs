use std::collections::BTreeMap;

use crate::error::SlashError;
use crate::form;
use crate::request::RequestBody;
use crate::value::ParamValue;

/// Parameters extracted from a request body.
#[derive(Debug, Clone, PartialEq)]
pub enum Params {
    /// Every key of a decoded mapping body.
    Mapping(BTreeMap<String, ParamValue>),
    /// The ordered `text` values of a form-encoded body.
    Lines(Vec<String>),
}

impl Params {
    /// Number of parameters that will be rendered.
    pub fn len(&self) -> usize {
        match self {
            Self::Mapping(map) => map.len(),
            Self::Lines(lines) => lines.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Extract the parameter set from a request body.
///
/// An absent body is an empty mapping, not an error. A raw body is parsed
/// as form data and only its `text` values are kept.
pub fn extract(body: Option<RequestBody>) -> Result<Params, SlashError> {
    match body {
        None => Ok(Params::Mapping(BTreeMap::new())),
        Some(RequestBody::Params(map)) => Ok(Params::Mapping(map)),
        Some(RequestBody::Raw(raw)) => Ok(Params::Lines(form::text_values(&raw)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormError;

    #[test]
    fn absent_body_is_empty_mapping() {
        let params = extract(None).unwrap();
        assert_eq!(params, Params::Mapping(BTreeMap::new()));
        assert!(params.is_empty());
    }

    #[test]
    fn mapping_body_is_used_directly() {
        let mut map = BTreeMap::new();
        map.insert("user_name".to_owned(), ParamValue::from("alice"));
        map.insert("count".to_owned(), ParamValue::from(serde_json::json!(3)));

        let params = extract(Some(RequestBody::Params(map.clone()))).unwrap();
        assert_eq!(params, Params::Mapping(map));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn raw_body_yields_text_lines() {
        let params = extract(Some(RequestBody::Raw("text=hello&text=world".into()))).unwrap();
        assert_eq!(params, Params::Lines(vec!["hello".into(), "world".into()]));
    }

    #[test]
    fn malformed_raw_body_is_form_error() {
        let err = extract(Some(RequestBody::Raw("text=%".into()))).unwrap_err();
        assert!(matches!(
            err,
            SlashError::FormParse(FormError::InvalidEscape { offset: 5, .. })
        ));
    }
}
