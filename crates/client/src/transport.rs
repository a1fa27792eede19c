//! Blocking HTTP transport abstraction.
//!
//! The harness never talks to `ureq` directly: everything goes through
//! [`Transport`], which takes a fully-described [`ApiRequest`] and returns
//! either a structured [`ApiResponse`] (any status code, 4xx/5xx included)
//! or [`NoResponse`] when no HTTP response came back at all. Retries are
//! deliberately absent — a transport failure is surfaced as-is and the
//! calling step decides what it means.

use std::time::Duration;

use crate::response::ApiResponse;

/// Request timeout applied to every call, matching the deployment's
/// gateway timeout budget.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

// ──────────────────────────────────────────────
// ApiRequest
// ──────────────────────────────────────────────

/// HTTP verbs the harness uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// Request payload. JSON for the API proper, form-encoding for the
/// identity provider's token endpoints.
#[derive(Debug, Clone)]
pub enum RequestBody {
    Json(serde_json::Value),
    Form(Vec<(String, String)>),
}

/// One fully-described request: absolute URL, query pairs, optional body,
/// optional bearer token.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: Option<RequestBody>,
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        ApiRequest {
            method,
            url: url.into(),
            query: Vec::new(),
            body: None,
            bearer: None,
        }
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    pub fn form(mut self, pairs: Vec<(String, String)>) -> Self {
        self.body = Some(RequestBody::Form(pairs));
        self
    }

    pub fn bearer(mut self, token: Option<&str>) -> Self {
        self.bearer = token.map(str::to_string);
        self
    }
}

// ──────────────────────────────────────────────
// NoResponse
// ──────────────────────────────────────────────

/// Transport-level failure: the request produced no HTTP response
/// (connection refused, timeout, TLS failure). Distinct from an error
/// *response*, which comes back as an [`ApiResponse`] with a 4xx/5xx status.
#[derive(Debug, Clone, thiserror::Error)]
#[error("no response from {url}: {message}")]
pub struct NoResponse {
    pub url: String,
    pub message: String,
}

// ──────────────────────────────────────────────
// Transport
// ──────────────────────────────────────────────

/// One blocking request/response exchange.
pub trait Transport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, NoResponse>;
}

/// Production transport backed by a shared `ureq` agent.
///
/// The agent is configured with `http_status_as_error(false)` so that
/// 4xx/5xx responses come back as values — negative steps assert on their
/// status and body, so they must not be collapsed into errors.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build();
        UreqTransport {
            agent: config.new_agent(),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, NoResponse> {
        let no_response = |e: ureq::Error| NoResponse {
            url: request.url.clone(),
            message: e.to_string(),
        };

        tracing::debug!(method = request.method.as_str(), url = %request.url, "sending request");

        let response = match request.method {
            Method::Get | Method::Delete => {
                let mut builder = match request.method {
                    Method::Get => self.agent.get(&request.url),
                    _ => self.agent.delete(&request.url),
                };
                for (key, value) in &request.query {
                    builder = builder.query(key, value);
                }
                if let Some(token) = &request.bearer {
                    builder = builder.header("Authorization", &format!("Bearer {}", token));
                }
                builder.call().map_err(no_response)?
            }
            Method::Post | Method::Put | Method::Patch => {
                let mut builder = match request.method {
                    Method::Post => self.agent.post(&request.url),
                    Method::Put => self.agent.put(&request.url),
                    _ => self.agent.patch(&request.url),
                };
                for (key, value) in &request.query {
                    builder = builder.query(key, value);
                }
                if let Some(token) = &request.bearer {
                    builder = builder.header("Authorization", &format!("Bearer {}", token));
                }
                match &request.body {
                    Some(RequestBody::Form(pairs)) => {
                        let pairs: Vec<(&str, &str)> = pairs
                            .iter()
                            .map(|(k, v)| (k.as_str(), v.as_str()))
                            .collect();
                        builder.send_form(pairs).map_err(no_response)?
                    }
                    Some(RequestBody::Json(value)) => {
                        builder.send_json(value).map_err(no_response)?
                    }
                    // The API expects a JSON content type even on bodyless
                    // mutations (e.g. invite acceptance).
                    None => builder
                        .send_json(&serde_json::json!({}))
                        .map_err(no_response)?,
                }
            }
        };

        let status = response.status().as_u16();
        let mut headers = std::collections::BTreeMap::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers.insert(name.as_str().to_ascii_lowercase(), value.to_string());
            }
        }
        let body = response
            .into_body()
            .read_to_string()
            .map_err(no_response)?;

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}
