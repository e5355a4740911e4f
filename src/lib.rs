//! # Active Resource for Rust
//!
//! A client for conventional JSON REST services: each remote collection maps
//! onto a resource type, and each record onto a resource instance that can
//! be created, found, updated and destroyed.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ResourceConfig`] and [`ResourceConfigBuilder`]
//! - Validated newtypes for the site URL and access token
//! - Element name resolution and pluralization (`person` -> `people`)
//! - URL composition with nested scopes (`accounts/2/tracks/5.json`)
//! - Resource instances with data and configuration attribute namespaces
//! - An async HTTP transport with debug logging of every exchange
//!
//! ## Quick Start
//!
//! ```rust
//! use active_resource::{AccessToken, ResourceConfig, SiteUrl};
//!
//! let config = ResourceConfig::builder()
//!     .site(SiteUrl::new("http://localhost:3000/").unwrap())
//!     .access_token(AccessToken::new("818a5f86").unwrap())
//!     .element_name("song")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.element_name_plural(), "songs");
//! ```
//!
//! ## Working with Resources
//!
//! ```rust,ignore
//! use active_resource::rest::{QueryOptions, ResourceResponse, ResourceType};
//! use serde_json::json;
//!
//! let songs = ResourceType::new(config)?;
//!
//! // POST http://localhost:3000/songs.json
//! let mut song = songs.new_resource();
//! song.set_field("artist", "Joe").set_field("title", "A Little Help");
//! song.save().await;
//!
//! // GET http://localhost:3000/songs.json?artist=Joe
//! let options = QueryOptions::new().param("artist", "Joe");
//! if let Some(ResourceResponse::Many(found)) = songs.new_resource().find_all(Some(&options)).await {
//!     println!("{} songs", found.len());
//! }
//!
//! // DELETE http://localhost:3000/songs/{id}.json
//! song.destroy().await;
//! ```
//!
//! ## Failures
//!
//! Resource operations return `None` when an exchange fails and log the
//! failure at debug level through `tracing`. Every operation also has a
//! `try_` variant returning [`rest::ResourceError`].
//!
//! ## Design Principles
//!
//! - **No global state**: Per-type configuration is a value shared through `Arc`
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: Configuration and resources are `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio runtime

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{AccessToken, ResourceConfig, ResourceConfigBuilder, ResourceSettings, SiteUrl};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    DataType, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError, Transport,
};

// Re-export the resource API
pub use rest::{
    pluralize, DispatchError, QueryOptions, Resource, ResourceDefinition, ResourceError,
    ResourceId, ResourceResponse, ResourceType, Scope,
};
