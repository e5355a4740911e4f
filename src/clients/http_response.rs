//! HTTP response type.
//!
//! [`HttpResponse`] is what a [`Transport`](crate::clients::Transport) hands
//! back: status code, reason phrase, headers and the raw body, together with
//! the method and URL of the request that produced it (for logging).

use std::collections::HashMap;

use crate::clients::HttpMethod;

/// A raw HTTP response.
///
/// The body is kept as text; decoding into JSON is the dispatcher's job.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// The reason phrase (e.g. `Created`).
    pub reason: String,
    /// Response headers, lower-cased (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: String,
    /// Method of the request that produced this response.
    pub method: HttpMethod,
    /// URL of the request that produced this response.
    pub url: String,
}

impl HttpResponse {
    /// Creates a response for the given request method and URL.
    ///
    /// An empty reason phrase is replaced by the canonical one for `code`.
    #[must_use]
    pub fn new(
        method: HttpMethod,
        url: impl Into<String>,
        code: u16,
        reason: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        let mut reason = reason.into();
        if reason.is_empty() {
            reason = canonical_reason(code).to_string();
        }
        Self {
            code,
            reason,
            headers: HashMap::new(),
            body: body.into(),
            method,
            url: url.into(),
        }
    }

    /// Attaches headers to the response.
    #[must_use]
    pub fn with_headers(mut self, headers: HashMap<String, Vec<String>>) -> Self {
        self.headers = headers;
        self
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

/// Returns the canonical reason phrase for a status code, or `""`.
#[must_use]
pub fn canonical_reason(code: u16) -> &'static str {
    reqwest::StatusCode::from_u16(code)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or("")
}
