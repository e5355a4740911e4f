//! REST resource infrastructure.
//!
//! This module maps remote JSON collections onto resource instances:
//!
//! - **Pluralizer** ([`pluralize`]): element name to collection name
//! - **Identity** ([`ResourceDefinition`], [`ResourceIdentity`]): element names per type
//! - **URLs** ([`build_url`], [`Scope`], [`ResourceId`], [`QueryOptions`])
//! - **Attributes** ([`AttributeStore`]): data and configuration namespaces
//! - **Dispatch** ([`Dispatcher`]): one logged request/response exchange
//! - **Resources** ([`ResourceType`], [`Resource`], [`ResourceResponse`])
//!
//! # Example
//!
//! ```rust,ignore
//! use active_resource::rest::{ResourceDefinition, ResourceType, Scope};
//! use active_resource::{ResourceConfig, SiteUrl};
//!
//! struct Track;
//! impl ResourceDefinition for Track {}
//!
//! let config = ResourceConfig::builder()
//!     .site(SiteUrl::new("http://localhost:3000/")?)
//!     .definition::<Track>()
//!     .build()?;
//! let tracks = ResourceType::new(config)?;
//!
//! // GET http://localhost:3000/accounts/2/tracks.json
//! let listing = tracks.scoped(Scope::new().segment("accounts", 2)).find_all(None).await;
//! ```

mod attributes;
mod dispatcher;
mod errors;
mod identity;
mod inflector;
mod path;
mod resource;
mod response;

pub use attributes::{
    AttributeStore, ACCESS_TOKEN_KEY, ELEMENT_NAME_KEY, ELEMENT_NAME_PLURAL_KEY, ID_KEY, SITE_KEY,
};
pub use dispatcher::{authorization_value, encode_payload, Dispatcher, AUTHORIZATION_HEADER};
pub use errors::{DispatchError, ResourceError};
pub use identity::{resolve_identity, ResourceDefinition, ResourceIdentity};
pub use inflector::{apply_suffix_rules, irregular_correction, irregular_corrections, pluralize};
pub use path::{
    build_url, QueryOptions, ResourceId, ResourceOperation, Scope, ALL_SENTINEL, FORMAT_EXTENSION,
};
pub use resource::{Resource, ResourceType};
pub use response::{is_nil_marker, strip_nil_markers, ResourceResponse};
