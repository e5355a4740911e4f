//! Element name resolution for resource types.
//!
//! Every resource type has a singular element name (`song`) and its plural
//! (`songs`). The element name is either declared explicitly or derived from
//! the type's own identity: the identity is lower-cased and any namespace
//! prefix (`::` for Rust paths, `\` for foreign class names) is stripped.
//!
//! # Example
//!
//! ```rust
//! use active_resource::rest::{resolve_identity, ResourceDefinition, ResourceIdentity};
//!
//! let identity = resolve_identity(None, "music::catalog::Song").unwrap();
//! assert_eq!(identity.element_name(), "song");
//! assert_eq!(identity.element_name_plural(), "songs");
//!
//! struct ApiUser;
//! impl ResourceDefinition for ApiUser {
//!     const ELEMENT_NAME: Option<&'static str> = Some("api_user");
//! }
//!
//! let identity = ResourceIdentity::of::<ApiUser>().unwrap();
//! assert_eq!(identity.element_name_plural(), "api_users");
//! ```

use crate::error::ConfigError;
use crate::rest::inflector::pluralize;

/// Namespace separators recognised in type identities.
const NAMESPACE_SEPARATORS: &[&str] = &["::", "\\"];

/// A type that maps onto a remote REST collection.
///
/// Implement this on a marker type to give the collection a name. When
/// `ELEMENT_NAME` is `None` the lower-cased type name is used.
pub trait ResourceDefinition {
    /// Declared singular element name, overriding the type name.
    const ELEMENT_NAME: Option<&'static str> = None;
}

/// The singular and plural names of a resource type.
///
/// The plural is computed once, when the identity is resolved, and never
/// recomputed afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceIdentity {
    element_name: String,
    element_name_plural: String,
}

impl ResourceIdentity {
    /// Resolves the identity of a [`ResourceDefinition`] type.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyElementName`] if the resolved name is empty.
    pub fn of<D: ResourceDefinition + ?Sized>() -> Result<Self, ConfigError> {
        resolve_identity(D::ELEMENT_NAME, std::any::type_name::<D>())
    }

    /// Returns the singular element name (e.g. `song`).
    #[must_use]
    pub fn element_name(&self) -> &str {
        &self.element_name
    }

    /// Returns the cached plural element name (e.g. `songs`).
    #[must_use]
    pub fn element_name_plural(&self) -> &str {
        &self.element_name_plural
    }
}

/// Resolves the element names from a declared name or a type identity.
///
/// The declared name wins when it is non-empty. Otherwise the type identity
/// is lower-cased. In both cases only the segment after the last namespace
/// separator is kept, and generic arguments are dropped.
///
/// # Errors
///
/// Returns [`ConfigError::EmptyElementName`] if nothing is left after
/// namespace stripping.
pub fn resolve_identity(
    declared_name: Option<&str>,
    type_identity: &str,
) -> Result<ResourceIdentity, ConfigError> {
    let source = declared_name
        .filter(|name| !name.is_empty())
        .map_or_else(|| type_identity.to_lowercase(), ToString::to_string);

    let element_name = bare_name(&source).to_string();
    if element_name.is_empty() {
        return Err(ConfigError::EmptyElementName {
            source_name: source,
        });
    }

    let element_name_plural = pluralize(&element_name);
    Ok(ResourceIdentity {
        element_name,
        element_name_plural,
    })
}

/// Strips namespaces and generic arguments from a type identity.
fn bare_name(identity: &str) -> &str {
    let identity = identity.split('<').next().unwrap_or(identity);
    NAMESPACE_SEPARATORS
        .iter()
        .filter_map(|sep| identity.rfind(sep).map(|i| i + sep.len()))
        .max()
        .map_or(identity, |start| &identity[start..])
}
