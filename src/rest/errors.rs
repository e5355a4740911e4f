//! Error types for resource operations and request dispatch.
//!
//! Failures fall into four groups:
//!
//! - **Transport**: the HTTP exchange failed or returned a non-2xx status
//!   ([`DispatchError::Transport`])
//! - **Encoding**: an outgoing payload could not be serialized to JSON
//!   ([`DispatchError::Encoding`])
//! - **Decoding**: the response body is not valid JSON
//!   ([`DispatchError::Decoding`])
//! - **Attribute access**: a key is present in neither the data nor the
//!   configuration namespace ([`ResourceError::AttributeNotFound`])
//!
//! The CRUD methods on [`Resource`](crate::rest::Resource) log dispatch
//! failures and return `None`; the `try_*` variants surface them instead.
//!
//! # Example
//!
//! ```rust,ignore
//! use active_resource::rest::{DispatchError, ResourceError};
//!
//! match song.get("title") {
//!     Ok(title) => println!("Title: {title}"),
//!     Err(ResourceError::AttributeNotFound { key }) => println!("no {key}"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::HttpError;

/// Error raised while performing a single request/response exchange.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The transport failed or the server answered with a non-2xx status.
    #[error(transparent)]
    Transport(#[from] HttpError),

    /// The outgoing payload could not be encoded as JSON.
    #[error("Failed to encode request payload: {0}")]
    Encoding(#[source] serde_json::Error),

    /// The response body is not valid JSON.
    #[error("Failed to decode response body as JSON: {source}")]
    Decoding {
        /// The raw response body.
        body: String,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}

impl DispatchError {
    /// Returns the response body associated with this error, if any.
    ///
    /// Available for non-2xx responses and for bodies that failed to decode.
    #[must_use]
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::Transport(HttpError::Response(e)) => Some(&e.body),
            Self::Decoding { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Error type for resource-level operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The key exists in neither the data nor the configuration namespace.
    #[error("Attribute '{key}' not found in data or configuration fields")]
    AttributeNotFound {
        /// The requested key.
        key: String,
    },

    /// The operation addresses a member but the resource has no `id`.
    #[error("Cannot {operation} {resource} without an id")]
    MissingId {
        /// The element name of the resource.
        resource: String,
        /// The operation being attempted (e.g., "destroy").
        operation: &'static str,
    },

    /// A request/response exchange failed.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl From<HttpError> for ResourceError {
    fn from(error: HttpError) -> Self {
        Self::Dispatch(DispatchError::Transport(error))
    }
}
