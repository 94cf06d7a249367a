//! Strict `application/x-www-form-urlencoded` parsing.
//!
//! Slack delivers slash commands form-encoded. Unlike lenient decoders, a
//! broken escape or a `;` separator is reported rather than passed through.

use percent_encoding::percent_decode_str;

use crate::error::FormError;

/// Form key holding the slash command's argument text.
pub const TEXT_KEY: &str = "text";

/// Parse a form body into decoded `(key, value)` pairs, preserving order
/// and repeated keys.
pub fn parse_pairs(raw: &str) -> Result<Vec<(String, String)>, FormError> {
    let mut pairs = Vec::new();
    let mut offset = 0;

    for segment in raw.split('&') {
        let start = offset;
        offset += segment.len() + 1;

        if segment.is_empty() {
            continue;
        }
        if let Some(pos) = segment.find(';') {
            return Err(FormError::Semicolon { offset: start + pos });
        }

        let (key, value, value_start) = match segment.split_once('=') {
            Some((key, value)) => (key, value, start + key.len() + 1),
            None => (segment, "", start + segment.len()),
        };
        pairs.push((
            decode_component(key, start)?,
            decode_component(value, value_start)?,
        ));
    }

    Ok(pairs)
}

/// Values of every `text` key, in the order they appear.
pub fn text_values(raw: &str) -> Result<Vec<String>, FormError> {
    Ok(parse_pairs(raw)?
        .into_iter()
        .filter(|(key, _)| key == TEXT_KEY)
        .map(|(_, value)| value)
        .collect())
}

fn decode_component(component: &str, offset: usize) -> Result<String, FormError> {
    validate_escapes(component, offset)?;
    let spaced = component.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .map_err(|_| FormError::InvalidUtf8)
}

fn validate_escapes(component: &str, offset: usize) -> Result<(), FormError> {
    let bytes = component.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b != b'%' {
            continue;
        }
        let digits = bytes.get(i + 1..i + 3);
        if !digits.is_some_and(|d| d.iter().all(u8::is_ascii_hexdigit)) {
            let end = (i + 3).min(bytes.len());
            return Err(FormError::InvalidEscape {
                escape: String::from_utf8_lossy(&bytes[i..end]).into_owned(),
                offset: offset + i,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_text_values_keep_order() {
        let values = text_values("text=hello&text=world").unwrap();
        assert_eq!(values, vec!["hello", "world"]);
    }

    #[test]
    fn other_keys_are_ignored() {
        let raw = "token=x&team_id=T1&command=%2Fdeploy&text=staging+now&user_name=alice";
        assert_eq!(text_values(raw).unwrap(), vec!["staging now"]);
    }

    #[test]
    fn decodes_percent_escapes_and_plus() {
        let pairs = parse_pairs("text=a%2Bb+c%26d&k%C3%A9y=caf%C3%A9").unwrap();
        assert_eq!(
            pairs,
            vec![
                ("text".to_owned(), "a+b c&d".to_owned()),
                ("kéy".to_owned(), "café".to_owned()),
            ]
        );
    }

    #[test]
    fn tolerates_empty_segments_and_missing_values() {
        let pairs = parse_pairs("&text&&text=&").unwrap();
        assert_eq!(
            pairs,
            vec![
                ("text".to_owned(), String::new()),
                ("text".to_owned(), String::new()),
            ]
        );
        assert!(parse_pairs("").unwrap().is_empty());
    }

    #[test]
    fn no_text_key_yields_no_lines() {
        assert!(text_values("command=%2Fhi&user_name=bob").unwrap().is_empty());
    }

    #[test]
    fn rejects_bad_escape() {
        let err = text_values("text=ok&text=%zz").unwrap_err();
        assert_eq!(
            err,
            FormError::InvalidEscape {
                escape: "%zz".into(),
                offset: 13,
            }
        );
    }

    #[test]
    fn rejects_truncated_escape() {
        let err = parse_pairs("text=abc%4").unwrap_err();
        assert!(matches!(err, FormError::InvalidEscape { ref escape, offset: 8 } if escape == "%4"));
    }

    #[test]
    fn rejects_semicolon_separator() {
        let err = parse_pairs("text=a;text=b").unwrap_err();
        assert_eq!(err, FormError::Semicolon { offset: 6 });
    }

    #[test]
    fn rejects_invalid_utf8() {
        let err = parse_pairs("text=%FF%FE").unwrap_err();
        assert_eq!(err, FormError::InvalidUtf8);
    }
}
