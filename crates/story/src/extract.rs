//! Identifier extraction from heterogeneous creation responses.
//!
//! The remote system is not consistent about how it returns identifiers:
//! some endpoints send a `Location` header, some echo the created object,
//! and the echoed objects disagree on the field name (`publicId` vs `id`).
//! This policy isolates that inconsistency; step bodies only ever see an
//! identifier or its absence.
//!
//! Precedence:
//! 1. `Location` header whose trailing path segment is a well-formed
//!    36-character identifier — authoritative.
//! 2. First present, non-empty string among `fallback_keys` in the JSON
//!    body.
//! 3. `None` (unparsable body or no matching field).

use comanda_client::ApiResponse;
use serde_json::Value;

/// Default body fields probed, in order.
pub const DEFAULT_ID_KEYS: &[&str] = &["publicId", "id"];

/// 36-character 8-4-4-4-12 hexadecimal identifier, case-insensitive.
pub fn is_entity_id(candidate: &str) -> bool {
    let bytes = candidate.as_bytes();
    if bytes.len() != 36 {
        return false;
    }
    bytes.iter().enumerate().all(|(i, b)| match i {
        8 | 13 | 18 | 23 => *b == b'-',
        _ => b.is_ascii_hexdigit(),
    })
}

pub fn extract_id(response: &ApiResponse, fallback_keys: &[&str]) -> Option<String> {
    if let Some(location) = response.location() {
        let tail = location.trim_end_matches('/').rsplit('/').next()?;
        if is_entity_id(tail) {
            return Some(tail.to_string());
        }
    }

    let body: Value = response.json()?;
    for key in fallback_keys {
        if let Some(value) = body.get(key).and_then(Value::as_str) {
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// Extraction with the default `publicId`-then-`id` probe order.
pub fn extract_default_id(response: &ApiResponse) -> Option<String> {
    extract_id(response, DEFAULT_ID_KEYS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn response(location: Option<&str>, body: &str) -> ApiResponse {
        let mut headers = BTreeMap::new();
        if let Some(location) = location {
            headers.insert("location".to_string(), location.to_string());
        }
        ApiResponse {
            status: 201,
            headers,
            body: body.to_string(),
        }
    }

    #[test]
    fn location_wins_over_body_fields() {
        let r = response(
            Some("http://host/api/v1/commands/11111111-2222-3333-4444-555555555555"),
            r#"{"publicId":"body-wins-not","id":"nor-this"}"#,
        );
        assert_eq!(
            extract_default_id(&r).as_deref(),
            Some("11111111-2222-3333-4444-555555555555")
        );
    }

    #[test]
    fn public_id_preferred_over_id() {
        let r = response(None, r#"{"id":"22222222-2222-3333-4444-555555555555","publicId":"11111111-2222-3333-4444-555555555555"}"#);
        assert_eq!(
            extract_default_id(&r).as_deref(),
            Some("11111111-2222-3333-4444-555555555555")
        );
    }

    #[test]
    fn falls_back_to_id_when_public_id_absent() {
        let r = response(None, r#"{"id":"33333333-2222-3333-4444-555555555555"}"#);
        assert_eq!(
            extract_default_id(&r).as_deref(),
            Some("33333333-2222-3333-4444-555555555555")
        );
    }

    #[test]
    fn none_when_nothing_matches() {
        assert_eq!(extract_default_id(&response(None, "not json")), None);
        assert_eq!(extract_default_id(&response(None, r#"{"name":"x"}"#)), None);
        assert_eq!(extract_default_id(&response(None, r#"{"id":""}"#)), None);
    }

    #[test]
    fn malformed_location_tail_falls_through_to_body() {
        let r = response(
            Some("http://host/api/v1/commands/42"),
            r#"{"id":"44444444-2222-3333-4444-555555555555"}"#,
        );
        assert_eq!(
            extract_default_id(&r).as_deref(),
            Some("44444444-2222-3333-4444-555555555555")
        );
    }

    #[test]
    fn entity_id_shape_checks() {
        assert!(is_entity_id("11111111-2222-3333-4444-555555555555"));
        assert!(is_entity_id("AABBCCDD-eeff-0011-2233-445566778899"));
        assert!(!is_entity_id("11111111222233334444555555555555"));
        assert!(!is_entity_id("11111111-2222-3333-4444-55555555555"));
        assert!(!is_entity_id("1111111g-2222-3333-4444-555555555555"));
    }
}
