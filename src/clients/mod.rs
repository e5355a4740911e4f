//! HTTP transport types.
//!
//! This module provides the transport layer resources talk through:
//!
//! - [`Transport`]: The seam every request goes through
//! - [`HttpClient`]: The default, reqwest-backed transport
//! - [`HttpRequest`]: A request to be sent (method, URL, headers, JSON body)
//! - [`HttpResponse`]: A raw response (status, reason phrase, body)
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`DataType`]: Content types for request bodies
//!
//! # Example
//!
//! ```rust,ignore
//! use active_resource::clients::{HttpClient, HttpMethod, HttpRequest, Transport};
//!
//! let client = HttpClient::new(None)?;
//! let request = HttpRequest::builder(HttpMethod::Delete, "http://localhost:3000/songs/44.json")
//!     .header("AUTHORIZATION", "Token token=abc")
//!     .build()?;
//!
//! let response = client.send(&request).await?;
//! ```
//!
//! No retries are attempted: each request is a single exchange.

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod transport;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{canonical_reason, HttpResponse};
pub use transport::Transport;
