//! Configuration error types.
//!
//! All configuration constructors return `Result<T, ConfigError>` so that an
//! invalid site or identity is rejected before any request is built.
//!
//! # Example
//!
//! ```rust
//! use active_resource::{ConfigError, SiteUrl};
//!
//! let result = SiteUrl::new("localhost:3000");
//! assert!(matches!(result, Err(ConfigError::InvalidSiteUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring a resource type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The site URL is missing a scheme or host.
    #[error("Invalid site URL '{url}'. Expected a URL with scheme and host (e.g., 'http://localhost:3000/').")]
    InvalidSiteUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Omit the token instead of passing an empty one.")]
    EmptyAccessToken,

    /// The element name resolved to an empty string.
    #[error("Element name cannot be empty (derived from '{source_name}').")]
    EmptyElementName {
        /// The declared name or type identity the element name came from.
        source_name: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
