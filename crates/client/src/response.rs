//! Structured HTTP response consumed by step bodies.

use std::collections::BTreeMap;

use serde_json::Value;

/// Status code, headers (lowercased names) and raw body of one response.
///
/// The remote system is inconsistent about response shapes, so the body is
/// kept as text and parsed on demand: [`json`](ApiResponse::json) for
/// structured bodies, [`message`](ApiResponse::message) for the error
/// envelope's `message` field, [`location`](ApiResponse::location) for the
/// creation header.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ApiResponse {
    /// 2xx check. Steps still re-read state after mutations; a success
    /// status alone is never treated as proof of effect.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON. `None` when the body is not valid JSON —
    /// callers convert that into a step outcome, never a panic.
    pub fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }

    /// The error envelope's `message` field, when present.
    pub fn message(&self) -> Option<String> {
        self.json()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
    }

    /// Header lookup by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// The `Location` header of a creation response.
    pub fn location(&self) -> Option<&str> {
        self.header("location")
    }

    /// `content` array of a paginated response body.
    pub fn page_content(&self) -> Vec<Value> {
        self.json()
            .and_then(|v| v.get("content").and_then(Value::as_array).cloned())
            .unwrap_or_default()
    }
}
