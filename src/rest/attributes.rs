//! Attribute storage with separate data and configuration namespaces.
//!
//! A resource keeps two maps:
//!
//! - **data**: the server-visible record fields (`id`, `email`, ...)
//! - **configuration**: the resource's own settings (`site`,
//!   `access_token`, `element_name`, ...)
//!
//! Reads look in data first and fall back to configuration. Writes go to
//! data only when the key already exists there, so configuration such as
//! `access_token` can be set before any data is loaded.

use serde_json::{Map, Value};

use crate::rest::errors::ResourceError;

/// Configuration key holding the effective site.
pub const SITE_KEY: &str = "site";
/// Configuration key holding the access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Configuration key holding the singular element name.
pub const ELEMENT_NAME_KEY: &str = "element_name";
/// Configuration key holding the plural element name.
pub const ELEMENT_NAME_PLURAL_KEY: &str = "element_name_plural";
/// Data key whose presence marks an existing record.
pub const ID_KEY: &str = "id";

/// Two-namespace attribute store backing a resource instance.
///
/// # Example
///
/// ```rust
/// use active_resource::rest::AttributeStore;
/// use serde_json::json;
///
/// let mut store = AttributeStore::new();
/// store.insert_data("title", json!("The River"));
///
/// store.set("title", json!("A Little Help"));  // existing data key
/// store.set("access_token", json!("abc"));     // goes to configuration
///
/// assert_eq!(store.get("title").unwrap(), &json!("A Little Help"));
/// assert!(store.data().get("access_token").is_none());
/// assert_eq!(store.config_field("access_token"), Some(&json!("abc")));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeStore {
    data: Map<String, Value>,
    config: Map<String, Value>,
}

impl AttributeStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from initial data and configuration fields.
    #[must_use]
    pub const fn with_fields(data: Map<String, Value>, config: Map<String, Value>) -> Self {
        Self { data, config }
    }

    /// Reads a key from data, falling back to configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::AttributeNotFound`] if neither namespace has the key.
    pub fn get(&self, key: &str) -> Result<&Value, ResourceError> {
        self.data
            .get(key)
            .or_else(|| self.config.get(key))
            .ok_or_else(|| ResourceError::AttributeNotFound {
                key: key.to_string(),
            })
    }

    /// Writes a key into data if it already exists there, otherwise into
    /// configuration.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        if let Some(slot) = self.data.get_mut(&key) {
            *slot = value;
        } else {
            self.config.insert(key, value);
        }
    }

    /// Applies [`set`](Self::set) to every entry, in iteration order.
    pub fn set_many<I, K>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        for (key, value) in fields {
            self.set(key, value);
        }
        self
    }

    /// Returns `true` if either namespace has the key.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.data.contains_key(key) || self.config.contains_key(key)
    }

    /// Writes a key into data unconditionally.
    pub fn insert_data(&mut self, key: impl Into<String>, value: Value) {
        self.data.insert(key.into(), value);
    }

    /// Merges every entry of `fields` into data.
    pub fn merge_data(&mut self, fields: Map<String, Value>) {
        self.data.extend(fields);
    }

    /// Returns the data namespace.
    #[must_use]
    pub const fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Returns the configuration namespace.
    #[must_use]
    pub const fn config(&self) -> &Map<String, Value> {
        &self.config
    }

    /// Returns a configuration field, ignoring data.
    #[must_use]
    pub fn config_field(&self, key: &str) -> Option<&Value> {
        self.config.get(key)
    }

    /// Returns a configuration field as a string, if it is one.
    #[must_use]
    pub fn config_str(&self, key: &str) -> Option<&str> {
        self.config.get(key).and_then(Value::as_str)
    }

    /// Returns the record's `id`, if present and not null.
    #[must_use]
    pub fn id(&self) -> Option<&Value> {
        self.data.get(ID_KEY).filter(|v| !v.is_null())
    }
}
