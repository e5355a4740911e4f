//! HTTP-specific error types.
//!
//! This module contains error types for the transport layer:
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses, with the raw body
//! - [`InvalidHttpRequestError`]: A request that fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! # Example
//!
//! ```rust,ignore
//! use active_resource::clients::{HttpError, Transport};
//!
//! match client.send(&request).await {
//!     Ok(response) => println!("{} {}", response.code, response.reason),
//!     Err(HttpError::Response(e)) => println!("API error {}: {}", e.code, e.body),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {e}"),
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when a request receives a non-successful response.
///
/// # Example
///
/// ```rust
/// use active_resource::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 422,
///     reason: "Unprocessable Entity".to_string(),
///     body: r#"{"errors":{"email":["can't be blank"]}}"#.to_string(),
/// };
///
/// assert_eq!(error.to_string(), "HTTP 422 Unprocessable Entity");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("HTTP {code} {reason}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The reason phrase of the response.
    pub reason: String,
    /// The raw response body.
    pub body: String,
}

/// Error returned when an HTTP request fails validation.
///
/// Raised before a request is sent, for example when a POST or PUT has
/// no body.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A request body was provided without specifying the body type.
    #[error("Cannot set a body without also setting body_type.")]
    MissingBodyType,

    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_response_error_includes_status_and_reason() {
        let error = HttpResponseError {
            code: 404,
            reason: "Not Found".to_string(),
            body: r#"{"error":"Not Found"}"#.to_string(),
        };
        assert_eq!(error.to_string(), "HTTP 404 Not Found");
    }

    #[test]
    fn test_invalid_request_error_missing_body() {
        let error = InvalidHttpRequestError::MissingBody {
            method: "POST".to_string(),
        };
        assert_eq!(error.to_string(), "Cannot use POST without specifying data.");
    }

    #[test]
    fn test_http_error_wraps_response_error_transparently() {
        let error = HttpError::from(HttpResponseError {
            code: 500,
            reason: "Internal Server Error".to_string(),
            body: String::new(),
        });
        assert_eq!(error.to_string(), "HTTP 500 Internal Server Error");
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let response_error: &dyn std::error::Error = &HttpResponseError {
            code: 400,
            reason: "Bad Request".to_string(),
            body: String::new(),
        };
        let _ = response_error;

        let invalid_error: &dyn std::error::Error = &InvalidHttpRequestError::MissingBodyType;
        let _ = invalid_error;
    }
}
