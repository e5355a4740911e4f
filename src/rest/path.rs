//! Request URL composition for REST resources.
//!
//! URLs follow the conventional shape
//! `{site}{scope segments}{plural}[/{id}][/{action}].json[?query]`:
//!
//! - `http://h/songs.json` (collection)
//! - `http://h/songs/5.json` (member)
//! - `http://h/accounts/2/tracks/5.json` (member inside a scope)
//! - `http://h/songs/5/lyrics.json` (member action)
//! - `http://h/songs/by_year.json?year=1999` (collection action)
//!
//! # Example
//!
//! ```rust
//! use active_resource::rest::{build_url, ResourceId, Scope};
//!
//! let scope = Scope::new().segment("accounts", 2);
//! let id = ResourceId::from(5);
//! let url = build_url("http://h/", Some(&scope), "tracks", Some(&id), None, None);
//! assert_eq!(url, "http://h/accounts/2/tracks/5.json");
//! ```

use std::collections::HashMap;
use std::fmt::{self, Display};

use serde::Serialize;
use serde_json::Value;

use crate::clients::HttpMethod;

/// Fixed suffix of every resource URL.
pub const FORMAT_EXTENSION: &str = ".json";

/// The id sentinel that addresses the whole collection.
pub const ALL_SENTINEL: &str = "all";

/// Operations that can be performed on a REST resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    /// Find one record or the whole collection (GET).
    Find,
    /// Create a new record (POST /resources.json).
    Create,
    /// Update an existing record (PUT /resources/{id}.json).
    Update,
    /// Delete a record (DELETE /resources/{id}.json).
    Delete,
    /// Custom GET action (GET /resources/{id}/{action}.json).
    Get,
    /// Custom POST action (POST /resources[/{id}]/{action}.json).
    Post,
    /// Custom PUT action (PUT /resources[/{id}]/{action}.json).
    Put,
}

impl ResourceOperation {
    /// Returns the HTTP method used by this operation.
    #[must_use]
    pub const fn http_method(&self) -> HttpMethod {
        match self {
            Self::Find | Self::Get => HttpMethod::Get,
            Self::Create | Self::Post => HttpMethod::Post,
            Self::Update | Self::Put => HttpMethod::Put,
            Self::Delete => HttpMethod::Delete,
        }
    }

    /// Returns the operation name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Find => "find",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "destroy",
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
        }
    }
}

/// The record a request targets: a single member or the whole collection.
///
/// Converting the string `"all"` yields [`ResourceId::All`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceId {
    /// The collection URL, without an id segment.
    All,
    /// A member URL for the given id.
    Member(String),
}

impl ResourceId {
    /// Returns the member id, or `None` for the collection.
    #[must_use]
    pub fn member(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Member(id) => Some(id),
        }
    }

    /// Converts a stored JSON `id` field into a member id.
    ///
    /// Non-empty strings and numbers are accepted; anything else yields
    /// `None`. A stored id never maps to [`ResourceId::All`], even when it
    /// reads `"all"`.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if !s.is_empty() => Some(Self::Member(s.clone())),
            Value::Number(n) => Some(Self::Member(n.to_string())),
            _ => None,
        }
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        if id == ALL_SENTINEL {
            Self::All
        } else {
            Self::Member(id.to_string())
        }
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self::from(id.as_str())
    }
}

macro_rules! resource_id_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ResourceId {
                fn from(id: $ty) -> Self {
                    Self::Member(id.to_string())
                }
            }
        )*
    };
}

resource_id_from_integer!(u32, u64, i32, i64, usize);

impl Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_SENTINEL),
            Self::Member(id) => f.write_str(id),
        }
    }
}

/// An ordered hierarchical path prefix, e.g. `accounts/2/`.
///
/// Each `(segment_name, segment_value)` pair contributes
/// `segment_name/segment_value/` to the effective site, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    segments: Vec<(String, String)>,
}

impl Scope {
    /// Creates an empty scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a segment and returns the scope for chaining.
    #[must_use]
    pub fn segment(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.segments.push((name.into(), value.to_string()));
        self
    }

    /// Returns the segments in order.
    #[must_use]
    pub fn segments(&self) -> &[(String, String)] {
        &self.segments
    }

    /// Returns `true` if the scope has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Extends a site with this scope's segments.
    ///
    /// The site is expected to end in `/`.
    #[must_use]
    pub fn apply_to(&self, site: &str) -> String {
        self.segments
            .iter()
            .fold(site.to_string(), |mut acc, (name, value)| {
                acc.push_str(name);
                acc.push('/');
                acc.push_str(value);
                acc.push('/');
                acc
            })
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for Scope {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |scope, (name, value)| scope.segment(name, value))
    }
}

/// Ordered query parameters appended after `?`.
///
/// Keys and values are percent-encoded. Insertion order is preserved.
///
/// # Example
///
/// ```rust
/// use active_resource::rest::QueryOptions;
///
/// let query = QueryOptions::new().param("year", 1999).param("artist", "Joe Cocker");
/// assert_eq!(query.to_query_string(), "year=1999&artist=Joe%20Cocker");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    params: Vec<(String, String)>,
}

impl QueryOptions {
    /// Creates empty query options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter and returns the options for chaining.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Builds query options from a serializable params struct.
    ///
    /// Null fields are skipped, arrays of scalars are joined with commas and
    /// nested objects are JSON-encoded.
    ///
    /// # Errors
    ///
    /// Returns the serialization error if `params` cannot be converted to JSON.
    pub fn from_params<T: Serialize>(params: &T) -> Result<Self, serde_json::Error> {
        let value = serde_json::to_value(params)?;
        let mut options = Self::new();

        if let Value::Object(map) = value {
            for (key, val) in map {
                match val {
                    Value::Null => {}
                    Value::String(s) => options.params.push((key, s)),
                    Value::Number(n) => options.params.push((key, n.to_string())),
                    Value::Bool(b) => options.params.push((key, b.to_string())),
                    Value::Array(arr) => {
                        let values: Vec<String> = arr
                            .iter()
                            .filter_map(|v| match v {
                                Value::String(s) => Some(s.clone()),
                                Value::Number(n) => Some(n.to_string()),
                                _ => None,
                            })
                            .collect();
                        if !values.is_empty() {
                            options.params.push((key, values.join(",")));
                        }
                    }
                    Value::Object(_) => options.params.push((key, val.to_string())),
                }
            }
        }

        Ok(options)
    }

    /// Returns `true` if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns the parameters in order.
    #[must_use]
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Serializes the parameters as `k=v&k2=v2`, without the leading `?`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for QueryOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |options, (key, value)| options.param(key, value))
    }
}

impl From<HashMap<String, String>> for QueryOptions {
    fn from(map: HashMap<String, String>) -> Self {
        let mut params: Vec<(String, String)> = map.into_iter().collect();
        params.sort();
        Self { params }
    }
}

/// Builds a fully qualified request URL.
///
/// # Arguments
///
/// * `site` - The base site, ending in `/`
/// * `scope` - Optional scope whose segments are appended to the site
/// * `element_name_plural` - The collection name
/// * `id` - The target record; `None` and [`ResourceId::All`] address the collection
/// * `sub_action` - Optional custom action appended after the id
/// * `query` - Optional query parameters; an empty set adds no `?`
#[must_use]
pub fn build_url(
    site: &str,
    scope: Option<&Scope>,
    element_name_plural: &str,
    id: Option<&ResourceId>,
    sub_action: Option<&str>,
    query: Option<&QueryOptions>,
) -> String {
    let mut url = scope.map_or_else(|| site.to_string(), |scope| scope.apply_to(site));
    url.push_str(element_name_plural);

    if let Some(member) = id.and_then(ResourceId::member) {
        url.push('/');
        url.push_str(member);
    }
    if let Some(action) = sub_action {
        url.push('/');
        url.push_str(action);
    }
    url.push_str(FORMAT_EXTENSION);

    if let Some(query) = query.filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(&query.to_query_string());
    }

    url
}
