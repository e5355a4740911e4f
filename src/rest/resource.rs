//! Resource types and instances.
//!
//! A [`ResourceType`] describes one remote collection: its configuration and
//! the [`Dispatcher`] used to reach it. It is built once and shared through
//! an [`Arc`]. Every [`Resource`] created from it holds its own data and may
//! carry a [`Scope`] that nests its URLs under a parent record.
//!
//! # Operations
//!
//! | Method | Request |
//! |--------|---------|
//! | [`Resource::save`] | `PUT /plural/{id}.json` or `POST /plural.json` |
//! | [`Resource::create`] | `POST /plural.json` |
//! | [`Resource::update`] | `PUT /plural/{id}.json` |
//! | [`Resource::destroy`] | `DELETE /plural/{id}.json` |
//! | [`Resource::find`] | `GET /plural/{id}.json` or `GET /plural.json` |
//! | [`Resource::get_action`] | `GET /plural/{id}/{action}.json` |
//! | [`Resource::post_action`] | `POST /plural[/{id}]/{action}.json` |
//! | [`Resource::put_action`] | `PUT /plural[/{id}]/{action}.json` |
//!
//! Each operation returns `None` when the exchange fails (after logging the
//! failure); its `try_` counterpart returns the [`ResourceError`] instead.
//!
//! # Example
//!
//! ```rust,ignore
//! use active_resource::rest::{ResourceType, Scope};
//! use active_resource::{ResourceConfig, SiteUrl};
//! use serde_json::json;
//!
//! let config = ResourceConfig::builder()
//!     .site(SiteUrl::new("http://localhost:3000/")?)
//!     .element_name("song")
//!     .build()?;
//! let songs = ResourceType::new(config)?;
//!
//! // POST http://localhost:3000/songs.json
//! let created = songs
//!     .new_resource()
//!     .create(&json!({"artist": "Joe", "title": "A Little Help"}))
//!     .await;
//!
//! // GET http://localhost:3000/accounts/2/tracks/5.json
//! let track = tracks.scoped(Scope::new().segment("accounts", 2)).find_one(5).await;
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::clients::{HttpClient, HttpError, Transport};
use crate::config::ResourceConfig;
use crate::rest::attributes::{
    AttributeStore, ACCESS_TOKEN_KEY, ELEMENT_NAME_KEY, ELEMENT_NAME_PLURAL_KEY, SITE_KEY,
};
use crate::rest::dispatcher::{encode_payload, log_failure, Dispatcher};
use crate::rest::errors::ResourceError;
use crate::rest::path::{build_url, QueryOptions, ResourceId, ResourceOperation, Scope};
use crate::rest::response::{strip_nil_markers, ResourceResponse};

/// One remote collection: configuration plus dispatcher.
#[derive(Debug)]
pub struct ResourceType<C = HttpClient> {
    config: ResourceConfig,
    dispatcher: Dispatcher<C>,
}

impl ResourceType<HttpClient> {
    /// Creates a resource type talking to its site over HTTP.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP client cannot be created.
    pub fn new(config: ResourceConfig) -> Result<Arc<Self>, HttpError> {
        let client = HttpClient::new(config.user_agent_prefix())?;
        Ok(Self::with_transport(config, client))
    }
}

impl<C: Transport> ResourceType<C> {
    /// Creates a resource type using a custom transport.
    #[must_use]
    pub fn with_transport(config: ResourceConfig, transport: C) -> Arc<Self> {
        Arc::new(Self {
            config,
            dispatcher: Dispatcher::new(transport),
        })
    }

    /// Returns the type configuration.
    #[must_use]
    pub const fn config(&self) -> &ResourceConfig {
        &self.config
    }

    /// Returns the dispatcher shared by all instances.
    #[must_use]
    pub const fn dispatcher(&self) -> &Dispatcher<C> {
        &self.dispatcher
    }

    /// Creates an empty, unscoped instance.
    #[must_use]
    pub fn new_resource(self: &Arc<Self>) -> Resource<C> {
        self.with_data(Map::new())
    }

    /// Creates an unscoped instance holding `data`.
    #[must_use]
    pub fn with_data(self: &Arc<Self>, data: Map<String, Value>) -> Resource<C> {
        Resource {
            class: Arc::clone(self),
            scope: None,
            store: AttributeStore::with_fields(data, self.config.config_fields()),
        }
    }

    /// Creates an empty instance nested under `scope`.
    ///
    /// The instance's site is the type's site extended by the scope
    /// segments, e.g. `http://h/accounts/2/`.
    #[must_use]
    pub fn scoped(self: &Arc<Self>, scope: Scope) -> Resource<C> {
        self.scoped_with_data(scope, Map::new())
    }

    /// Creates an instance nested under `scope` and holding `data`.
    #[must_use]
    pub fn scoped_with_data(
        self: &Arc<Self>,
        scope: Scope,
        data: Map<String, Value>,
    ) -> Resource<C> {
        let mut config = self.config.config_fields();
        config.insert(
            SITE_KEY.to_string(),
            Value::from(scope.apply_to(self.config.site().as_ref())),
        );
        Resource {
            class: Arc::clone(self),
            scope: Some(scope),
            store: AttributeStore::with_fields(data, config),
        }
    }
}

/// An instance of a [`ResourceType`].
///
/// Reads and writes go through an [`AttributeStore`]: `get` falls back from
/// data to configuration, and `set` writes configuration unless the key is
/// already a data field.
pub struct Resource<C = HttpClient> {
    class: Arc<ResourceType<C>>,
    scope: Option<Scope>,
    store: AttributeStore,
}

// Verify Resource is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Resource>();
    assert_send_sync::<ResourceType>();
};

impl<C> Resource<C> {
    /// Reads a field from data, falling back to configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::AttributeNotFound`] when neither namespace
    /// has the key.
    pub fn get(&self, key: &str) -> Result<&Value, ResourceError> {
        self.store.get(key)
    }

    /// Writes a field with data-first precedence.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.store.set(key, value.into());
    }

    /// Returns `true` if either namespace has the key.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.store.has(key)
    }

    /// Applies [`set`](Self::set) to every entry.
    pub fn set_many<I, K>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        self.store.set_many(fields);
        self
    }

    /// Writes a data field unconditionally, for chaining.
    pub fn set_field(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.store.insert_data(key, value.into());
        self
    }

    /// Returns the record id, if the record exists remotely.
    #[must_use]
    pub fn id(&self) -> Option<ResourceId> {
        self.store.id().and_then(ResourceId::from_value)
    }

    /// Returns the data fields.
    #[must_use]
    pub const fn data(&self) -> &Map<String, Value> {
        self.store.data()
    }

    /// Returns the attribute store.
    #[must_use]
    pub const fn store(&self) -> &AttributeStore {
        &self.store
    }

    /// Returns the scope, if any.
    #[must_use]
    pub const fn scope(&self) -> Option<&Scope> {
        self.scope.as_ref()
    }

    /// Returns the resource type this instance belongs to.
    #[must_use]
    pub const fn resource_type(&self) -> &Arc<ResourceType<C>> {
        &self.class
    }

    /// Returns the effective site, including scope segments.
    #[must_use]
    pub fn site(&self) -> &str {
        self.store
            .config_str(SITE_KEY)
            .unwrap_or_else(|| self.class.config.site().as_ref())
    }

    /// Returns the effective access token.
    ///
    /// An `access_token` set on the instance overrides the type's token.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.store.config_str(ACCESS_TOKEN_KEY)
    }

    /// Returns the singular element name.
    #[must_use]
    pub fn element_name(&self) -> &str {
        self.store
            .config_str(ELEMENT_NAME_KEY)
            .unwrap_or_else(|| self.class.config.element_name())
    }

    /// Returns the plural element name.
    #[must_use]
    pub fn element_name_plural(&self) -> &str {
        self.store
            .config_str(ELEMENT_NAME_PLURAL_KEY)
            .unwrap_or_else(|| self.class.config.element_name_plural())
    }

    /// Builds a URL under this instance's site and collection.
    #[must_use]
    pub fn url(
        &self,
        id: Option<&ResourceId>,
        action: Option<&str>,
        options: Option<&QueryOptions>,
    ) -> String {
        build_url(
            self.site(),
            None,
            self.element_name_plural(),
            id,
            action,
            options,
        )
    }

    /// Returns the data fields as a JSON object.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.store.data().clone())
    }

    /// Creates an instance sharing this one's type, scope and configuration.
    pub(crate) fn sibling(&self, data: Map<String, Value>) -> Self {
        Self {
            class: Arc::clone(&self.class),
            scope: self.scope.clone(),
            store: AttributeStore::with_fields(data, self.store.config().clone()),
        }
    }
}

impl<C: Transport> Resource<C> {
    async fn exchange(
        &self,
        operation: ResourceOperation,
        url: &str,
        payload: Option<&Value>,
    ) -> Result<Value, ResourceError> {
        let value = self
            .class
            .dispatcher
            .try_dispatch(url, operation.http_method(), payload, self.access_token())
            .await?;
        Ok(value)
    }

    fn require_id(&self, operation: ResourceOperation) -> Result<ResourceId, ResourceError> {
        self.id().ok_or_else(|| ResourceError::MissingId {
            resource: self.element_name().to_string(),
            operation: operation.as_str(),
        })
    }

    /// Saves the record: `PUT` when it has an id, `POST` otherwise.
    ///
    /// An object response is merged into this instance's data, so `id` is
    /// populated after a create.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Dispatch`] if the exchange fails.
    pub async fn try_save(&mut self) -> Result<ResourceResponse<C>, ResourceError> {
        let payload = self.to_value();
        let (operation, url) = match self.id() {
            Some(id) => (ResourceOperation::Update, self.url(Some(&id), None, None)),
            None => (ResourceOperation::Create, self.url(None, None, None)),
        };

        let value = self.exchange(operation, &url, Some(&payload)).await?;
        if let Value::Object(fields) = &value {
            self.store.merge_data(strip_nil_markers(fields.clone()));
        }
        Ok(ResourceResponse::hydrate(value, self))
    }

    /// Like [`try_save`](Self::try_save), returning `None` on failure.
    pub async fn save(&mut self) -> Option<ResourceResponse<C>> {
        absent_on_failure(self.try_save().await)
    }

    /// Creates a new record from `payload` with `POST /plural.json`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Dispatch`] if the payload cannot be encoded
    /// or the exchange fails.
    pub async fn try_create<S: Serialize + ?Sized>(
        &self,
        payload: &S,
    ) -> Result<ResourceResponse<C>, ResourceError> {
        let payload = encode_payload(payload)?;
        let url = self.url(None, None, None);
        let value = self
            .exchange(ResourceOperation::Create, &url, Some(&payload))
            .await?;
        Ok(ResourceResponse::hydrate(value, self))
    }

    /// Like [`try_create`](Self::try_create), returning `None` on failure.
    pub async fn create<S: Serialize + ?Sized>(&self, payload: &S) -> Option<ResourceResponse<C>> {
        absent_on_failure(self.try_create(payload).await)
    }

    /// Updates a record with `PUT /plural/{id}.json`.
    ///
    /// When this instance already has an id, that id is used instead of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Dispatch`] if the payload cannot be encoded
    /// or the exchange fails.
    pub async fn try_update<S: Serialize + ?Sized>(
        &self,
        id: impl Into<ResourceId>,
        payload: &S,
    ) -> Result<ResourceResponse<C>, ResourceError> {
        let payload = encode_payload(payload)?;
        let id = self.id().unwrap_or_else(|| id.into());
        let url = self.url(Some(&id), None, None);
        let value = self
            .exchange(ResourceOperation::Update, &url, Some(&payload))
            .await?;
        Ok(ResourceResponse::hydrate(value, self))
    }

    /// Like [`try_update`](Self::try_update), returning `None` on failure.
    pub async fn update<S: Serialize + ?Sized>(
        &self,
        id: impl Into<ResourceId>,
        payload: &S,
    ) -> Option<ResourceResponse<C>> {
        absent_on_failure(self.try_update(id, payload).await)
    }

    /// Deletes the record with `DELETE /plural/{id}.json`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] without sending anything when the
    /// instance has no id, and [`ResourceError::Dispatch`] if the exchange fails.
    pub async fn try_destroy(&self) -> Result<ResourceResponse<C>, ResourceError> {
        let id = self.require_id(ResourceOperation::Delete)?;
        let url = self.url(Some(&id), None, None);
        let value = self.exchange(ResourceOperation::Delete, &url, None).await?;
        Ok(ResourceResponse::hydrate(value, self))
    }

    /// Like [`try_destroy`](Self::try_destroy), returning `None` on failure.
    pub async fn destroy(&self) -> Option<ResourceResponse<C>> {
        absent_on_failure(self.try_destroy().await)
    }

    /// Finds one record, or the collection when `id` is `"all"`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Dispatch`] if the exchange fails.
    pub async fn try_find(
        &self,
        id: impl Into<ResourceId>,
        options: Option<&QueryOptions>,
    ) -> Result<ResourceResponse<C>, ResourceError> {
        let id = id.into();
        let url = self.url(Some(&id), None, options);
        let value = self.exchange(ResourceOperation::Find, &url, None).await?;
        Ok(ResourceResponse::hydrate(value, self))
    }

    /// Like [`try_find`](Self::try_find), returning `None` on failure.
    pub async fn find(
        &self,
        id: impl Into<ResourceId>,
        options: Option<&QueryOptions>,
    ) -> Option<ResourceResponse<C>> {
        absent_on_failure(self.try_find(id, options).await)
    }

    /// Fetches the whole collection.
    pub async fn find_all(&self, options: Option<&QueryOptions>) -> Option<ResourceResponse<C>> {
        self.find(ResourceId::All, options).await
    }

    /// Fetches one record as an instance.
    ///
    /// Returns `None` on failure and when the body is not a single object.
    pub async fn find_one(&self, id: impl Into<ResourceId>) -> Option<Self> {
        self.find(id, None).await.and_then(ResourceResponse::into_one)
    }

    /// Calls a custom GET action: `GET /plural/{id}/{action}.json[?query]`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Dispatch`] if the exchange fails.
    pub async fn try_get_action(
        &self,
        id: impl Into<ResourceId>,
        action: &str,
        options: Option<&QueryOptions>,
    ) -> Result<ResourceResponse<C>, ResourceError> {
        let id = id.into();
        let url = self.url(Some(&id), Some(action), options);
        let value = self.exchange(ResourceOperation::Get, &url, None).await?;
        Ok(ResourceResponse::hydrate(value, self))
    }

    /// Like [`try_get_action`](Self::try_get_action), returning `None` on failure.
    pub async fn get_action(
        &self,
        id: impl Into<ResourceId>,
        action: &str,
        options: Option<&QueryOptions>,
    ) -> Option<ResourceResponse<C>> {
        absent_on_failure(self.try_get_action(id, action, options).await)
    }

    /// Calls a custom POST action on this record, or on the collection when
    /// the instance has no id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Dispatch`] if the exchange fails.
    pub async fn try_post_action(
        &self,
        action: &str,
        payload: Option<&Value>,
    ) -> Result<ResourceResponse<C>, ResourceError> {
        let url = self.url(self.id().as_ref(), Some(action), None);
        let value = self.exchange(ResourceOperation::Post, &url, payload).await?;
        Ok(ResourceResponse::hydrate(value, self))
    }

    /// Like [`try_post_action`](Self::try_post_action), returning `None` on failure.
    pub async fn post_action(
        &self,
        action: &str,
        payload: Option<&Value>,
    ) -> Option<ResourceResponse<C>> {
        absent_on_failure(self.try_post_action(action, payload).await)
    }

    /// Calls a custom PUT action; `options` travel in the query string.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Dispatch`] if the exchange fails.
    pub async fn try_put_action(
        &self,
        action: &str,
        options: Option<&QueryOptions>,
    ) -> Result<ResourceResponse<C>, ResourceError> {
        let url = self.url(self.id().as_ref(), Some(action), options);
        let value = self.exchange(ResourceOperation::Put, &url, None).await?;
        Ok(ResourceResponse::hydrate(value, self))
    }

    /// Like [`try_put_action`](Self::try_put_action), returning `None` on failure.
    pub async fn put_action(
        &self,
        action: &str,
        options: Option<&QueryOptions>,
    ) -> Option<ResourceResponse<C>> {
        absent_on_failure(self.try_put_action(action, options).await)
    }
}

fn absent_on_failure<T>(result: Result<T, ResourceError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(ResourceError::Dispatch(error)) => {
            log_failure(&error);
            None
        }
        Err(error) => {
            tracing::debug!("\n Exception {error}");
            None
        }
    }
}

impl<C> Clone for Resource<C> {
    fn clone(&self) -> Self {
        Self {
            class: Arc::clone(&self.class),
            scope: self.scope.clone(),
            store: self.store.clone(),
        }
    }
}

impl<C> fmt::Debug for Resource<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("element_name", &self.element_name())
            .field("scope", &self.scope)
            .field("data", self.store.data())
            .finish_non_exhaustive()
    }
}

impl<C> Serialize for Resource<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.store.data().serialize(serializer)
    }
}
