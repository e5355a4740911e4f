//! Hydration of decoded responses into resource instances.
//!
//! Every decoded body is turned into a [`ResourceResponse`]:
//!
//! - a JSON object becomes [`ResourceResponse::One`]
//! - a JSON array of objects becomes [`ResourceResponse::Many`]
//! - anything else (scalars, `null`, mixed arrays) is kept as
//!   [`ResourceResponse::Other`]
//!
//! Hydrated instances share the configuration and scope of the instance that
//! issued the request. Fields holding the wire format's nil marker
//! (`{"nil": "true"}`) are dropped while hydrating.
//!
//! # Example
//!
//! ```rust,ignore
//! use active_resource::rest::ResourceResponse;
//!
//! match tracks.find_all(None).await {
//!     Some(ResourceResponse::Many(items)) => {
//!         for track in &items {
//!             println!("{}", track.get("title")?);
//!         }
//!     }
//!     Some(other) => println!("unexpected: {}", other.to_value()),
//!     None => println!("request failed"),
//! }
//! ```

use std::fmt;

use serde_json::{Map, Value};

use crate::clients::{HttpClient, Transport};
use crate::rest::resource::Resource;

/// Key of the nil marker object.
const NIL_KEY: &str = "nil";

/// Returns `true` for `{"nil": "true"}` and `{"nil": true}`.
#[must_use]
pub fn is_nil_marker(value: &Value) -> bool {
    let Value::Object(map) = value else {
        return false;
    };
    map.len() == 1
        && match map.get(NIL_KEY) {
            Some(Value::String(flag)) => flag == "true",
            Some(Value::Bool(flag)) => *flag,
            _ => false,
        }
}

/// Returns `fields` without the entries holding a nil marker.
#[must_use]
pub fn strip_nil_markers(fields: Map<String, Value>) -> Map<String, Value> {
    fields
        .into_iter()
        .filter(|(_, value)| !is_nil_marker(value))
        .collect()
}

/// A decoded and hydrated response body.
pub enum ResourceResponse<C = HttpClient> {
    /// The body was a single object.
    One(Resource<C>),
    /// The body was an array of objects.
    Many(Vec<Resource<C>>),
    /// The body was anything else, returned untouched.
    Other(Value),
}

impl<C: Transport> ResourceResponse<C> {
    /// Hydrates `value` using `prototype` for configuration and scope.
    pub(crate) fn hydrate(value: Value, prototype: &Resource<C>) -> Self {
        match value {
            Value::Object(fields) => Self::One(prototype.sibling(strip_nil_markers(fields))),
            Value::Array(items) if items.iter().all(Value::is_object) => Self::Many(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::Object(fields) => {
                            Some(prototype.sibling(strip_nil_markers(fields)))
                        }
                        _ => None,
                    })
                    .collect(),
            ),
            other => Self::Other(other),
        }
    }
}

impl<C> ResourceResponse<C> {
    /// Returns the single instance, if the body was an object.
    #[must_use]
    pub fn into_one(self) -> Option<Resource<C>> {
        match self {
            Self::One(resource) => Some(resource),
            _ => None,
        }
    }

    /// Returns the instances of a collection response.
    ///
    /// A single object yields a one-element vector; raw values yield `None`.
    #[must_use]
    pub fn into_many(self) -> Option<Vec<Resource<C>>> {
        match self {
            Self::One(resource) => Some(vec![resource]),
            Self::Many(resources) => Some(resources),
            Self::Other(_) => None,
        }
    }

    /// Returns the single instance by reference.
    #[must_use]
    pub const fn as_one(&self) -> Option<&Resource<C>> {
        match self {
            Self::One(resource) => Some(resource),
            _ => None,
        }
    }

    /// Returns the collection by reference.
    #[must_use]
    pub fn as_many(&self) -> Option<&[Resource<C>]> {
        match self {
            Self::Many(resources) => Some(resources),
            _ => None,
        }
    }

    /// Rebuilds the JSON form of the response.
    ///
    /// Nil-marker fields dropped during hydration are not restored.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::One(resource) => resource.to_value(),
            Self::Many(resources) => Value::Array(resources.iter().map(Resource::to_value).collect()),
            Self::Other(value) => value.clone(),
        }
    }
}

impl<C> Clone for ResourceResponse<C> {
    fn clone(&self) -> Self {
        match self {
            Self::One(resource) => Self::One(resource.clone()),
            Self::Many(resources) => Self::Many(resources.clone()),
            Self::Other(value) => Self::Other(value.clone()),
        }
    }
}

impl<C> fmt::Debug for ResourceResponse<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::One(resource) => f.debug_tuple("One").field(resource).finish(),
            Self::Many(resources) => f.debug_tuple("Many").field(resources).finish(),
            Self::Other(value) => f.debug_tuple("Other").field(value).finish(),
        }
    }
}
