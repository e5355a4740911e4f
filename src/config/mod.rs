//! Configuration types for resource types.
//!
//! Each remote collection is described by one [`ResourceConfig`], built once
//! at startup and shared by every instance of that resource type.
//!
//! # Overview
//!
//! - [`ResourceConfig`]: Immutable per-type configuration (site, token, identity)
//! - [`ResourceConfigBuilder`]: A builder for constructing [`ResourceConfig`] instances
//! - [`ResourceSettings`]: Deserializable settings for loading from a config file
//! - [`SiteUrl`]: A validated site address
//! - [`AccessToken`]: A validated access token with masked debug output
//!
//! # Example
//!
//! ```rust
//! use active_resource::{AccessToken, ResourceConfig, SiteUrl};
//!
//! let config = ResourceConfig::builder()
//!     .site(SiteUrl::new("http://localhost:3000/").unwrap())
//!     .access_token(AccessToken::new("818a5f86").unwrap())
//!     .element_name("user")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.element_name_plural(), "users");
//! ```

mod newtypes;

pub use newtypes::{AccessToken, SiteUrl};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ConfigError;
use crate::rest::{
    resolve_identity, ResourceDefinition, ResourceIdentity, ACCESS_TOKEN_KEY, ELEMENT_NAME_KEY,
    ELEMENT_NAME_PLURAL_KEY, SITE_KEY,
};

/// Configuration for one resource type.
///
/// The element name plural is resolved when the configuration is built and
/// cached for its whole lifetime.
///
/// # Thread Safety
///
/// `ResourceConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
#[derive(Clone, Debug)]
pub struct ResourceConfig {
    site: SiteUrl,
    access_token: Option<AccessToken>,
    identity: ResourceIdentity,
    user_agent_prefix: Option<String>,
}

impl ResourceConfig {
    /// Creates a new builder for constructing a `ResourceConfig`.
    #[must_use]
    pub fn builder() -> ResourceConfigBuilder {
        ResourceConfigBuilder::new()
    }

    /// Builds a configuration from deserialized settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if the settings carry
    /// no element name.
    pub fn from_settings(settings: ResourceSettings) -> Result<Self, ConfigError> {
        Self::builder().settings(settings).build()
    }

    /// Returns the site URL.
    #[must_use]
    pub const fn site(&self) -> &SiteUrl {
        &self.site
    }

    /// Returns the access token, if configured.
    #[must_use]
    pub const fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    /// Returns the resolved identity.
    #[must_use]
    pub const fn identity(&self) -> &ResourceIdentity {
        &self.identity
    }

    /// Returns the singular element name.
    #[must_use]
    pub fn element_name(&self) -> &str {
        self.identity.element_name()
    }

    /// Returns the plural element name.
    #[must_use]
    pub fn element_name_plural(&self) -> &str {
        self.identity.element_name_plural()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the configuration as attribute-store fields.
    ///
    /// The access token is only present when one is configured.
    #[must_use]
    pub fn config_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert(SITE_KEY.to_string(), Value::from(self.site.as_ref()));
        if let Some(token) = &self.access_token {
            fields.insert(ACCESS_TOKEN_KEY.to_string(), Value::from(token.as_ref()));
        }
        fields.insert(
            ELEMENT_NAME_KEY.to_string(),
            Value::from(self.element_name()),
        );
        fields.insert(
            ELEMENT_NAME_PLURAL_KEY.to_string(),
            Value::from(self.element_name_plural()),
        );
        fields
    }
}

// Verify ResourceConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceConfig>();
};

/// Deserializable per-type settings.
///
/// # Example
///
/// ```rust
/// use active_resource::{ResourceConfig, ResourceSettings};
///
/// let settings: ResourceSettings = serde_json::from_str(
///     r#"{"site": "http://localhost:3000", "element_name": "track"}"#,
/// ).unwrap();
///
/// let config = ResourceConfig::from_settings(settings).unwrap();
/// assert_eq!(config.site().as_ref(), "http://localhost:3000/");
/// assert_eq!(config.element_name_plural(), "tracks");
/// ```
#[derive(Clone, Debug, Deserialize)]
pub struct ResourceSettings {
    /// The REST site address.
    pub site: SiteUrl,
    /// Optional access token.
    #[serde(default)]
    pub access_token: Option<AccessToken>,
    /// Singular element name.
    #[serde(default)]
    pub element_name: Option<String>,
    /// Optional `User-Agent` prefix.
    #[serde(default)]
    pub user_agent_prefix: Option<String>,
}

/// Builder for constructing [`ResourceConfig`] instances.
///
/// `site` is required, and so is an identity: either an explicit
/// [`element_name`](Self::element_name) or a
/// [`definition`](Self::definition) type.
#[derive(Debug, Default)]
pub struct ResourceConfigBuilder {
    site: Option<SiteUrl>,
    access_token: Option<AccessToken>,
    element_name: Option<String>,
    type_identity: Option<&'static str>,
    user_agent_prefix: Option<String>,
}

impl ResourceConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the site URL (required).
    #[must_use]
    pub fn site(mut self, site: SiteUrl) -> Self {
        self.site = Some(site);
        self
    }

    /// Sets the access token.
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Declares the element name explicitly.
    #[must_use]
    pub fn element_name(mut self, name: impl Into<String>) -> Self {
        self.element_name = Some(name.into());
        self
    }

    /// Derives the identity from a [`ResourceDefinition`] type.
    ///
    /// The type's declared `ELEMENT_NAME` is used when present, otherwise its
    /// lower-cased type name. An explicit [`element_name`](Self::element_name)
    /// still takes precedence.
    #[must_use]
    pub fn definition<D: ResourceDefinition + ?Sized>(mut self) -> Self {
        self.type_identity = Some(std::any::type_name::<D>());
        if self.element_name.is_none() {
            self.element_name = D::ELEMENT_NAME.map(ToString::to_string);
        }
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Applies deserialized settings.
    #[must_use]
    pub fn settings(mut self, settings: ResourceSettings) -> Self {
        self.site = Some(settings.site);
        if settings.access_token.is_some() {
            self.access_token = settings.access_token;
        }
        if settings.element_name.is_some() {
            self.element_name = settings.element_name;
        }
        if settings.user_agent_prefix.is_some() {
            self.user_agent_prefix = settings.user_agent_prefix;
        }
        self
    }

    /// Builds the [`ResourceConfig`], resolving the element names.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `site` or both the
    /// element name and definition type are missing, and
    /// [`ConfigError::EmptyElementName`] if the name resolves to nothing.
    pub fn build(self) -> Result<ResourceConfig, ConfigError> {
        let site = self
            .site
            .ok_or(ConfigError::MissingRequiredField { field: "site" })?;

        let declared = self.element_name.as_deref().filter(|n| !n.is_empty());
        let identity = match (declared, self.type_identity) {
            (None, None) => {
                return Err(ConfigError::MissingRequiredField {
                    field: "element_name",
                })
            }
            (declared, type_identity) => resolve_identity(declared, type_identity.unwrap_or(""))?,
        };

        Ok(ResourceConfig {
            site,
            access_token: self.access_token,
            identity,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
