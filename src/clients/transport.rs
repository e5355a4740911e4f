//! The transport seam between resources and the network.

use crate::clients::{HttpError, HttpRequest, HttpResponse};

/// Sends one [`HttpRequest`] and returns the raw [`HttpResponse`].
///
/// Implementations perform I/O only: any status code is a successful
/// exchange, and status policy is applied by the caller. An `Err` means the
/// request could not be completed at all (connection refused, invalid
/// request, ...).
///
/// [`HttpClient`](crate::clients::HttpClient) is the default implementation.
/// Tests and applications with special needs can provide their own.
///
/// # Example
///
/// ```rust
/// use active_resource::clients::{HttpError, HttpRequest, HttpResponse, Transport};
///
/// struct Canned;
///
/// impl Transport for Canned {
///     async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError> {
///         Ok(HttpResponse::new(request.http_method, &request.url, 200, "OK", "[]"))
///     }
/// }
/// ```
#[allow(async_fn_in_trait)]
pub trait Transport: Send + Sync {
    /// Sends the request and waits for the complete response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when the exchange cannot be completed.
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError>;
}

impl<T: Transport> Transport for std::sync::Arc<T> {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).send(request).await
    }
}
