//! # SoundCloud API Rust SDK
//!
//! An async client for the SoundCloud API, a hierarchical REST API where
//! resources are addressed through nested scopes (a user's tracks, a track's
//! comments) and the server corrects addressing through redirects.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Validated configuration via [`ConnectorConfig`] and [`ConnectorConfigBuilder`]
//! - A shared [`Credential`] whose access token signs every request
//! - A [`Connector`] handle and composable [`rest::Scope`]s built from it
//! - Typed resources and lazily paginated collections via [`rest`]
//! - The OAuth 2.0 authorization code flow via [`auth::oauth`]
//! - An async HTTP transport that understands the API's `303`/`201`
//!   redirect conventions via [`clients`]
//!
//! ## Quick Start
//!
//! ```rust
//! use soundcloud_api::{ApiHost, BasePath, ClientId, ClientSecret, Connector, ConnectorConfig, Credential};
//!
//! let config = ConnectorConfig::builder()
//!     .host(ApiHost::new("api.soundcloud.com").unwrap())
//!     .base_path(BasePath::new("").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let credential = Credential::new(
//!     ClientId::new("your-client-id").unwrap(),
//!     ClientSecret::new("your-client-secret").unwrap(),
//!     "https://your-app.com/callback",
//! );
//!
//! let connector = Connector::new(config, credential).unwrap();
//! let root = connector.root_scope();
//! ```
//!
//! ## OAuth Authentication
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use soundcloud_api::{Credential, DEFAULT_CONNECT_URL, DEFAULT_TOKEN_URL};
//! use soundcloud_api::auth::oauth::{construct_connect_url, fetch_access_token};
//!
//! let credential = Arc::new(credential);
//!
//! // Step 1: send the user to the connect page
//! let url = construct_connect_url(&credential, DEFAULT_CONNECT_URL)?;
//!
//! // Step 2: exchange the code from the callback; the token is stored on
//! // the credential and used by every connector sharing it
//! let token = fetch_access_token(&credential, &code, DEFAULT_TOKEN_URL).await?;
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use soundcloud_api::rest::Relation;
//!
//! let root = connector.root_scope();
//!
//! // GET /me/
//! let me = root.endpoint("me").fetch().await?.into_resource().unwrap();
//!
//! // GET /users/{id}/favorites/, following offset pagination
//! let mut favorites = me.endpoint("favorites")?.fetch().await?.into_collection().unwrap();
//! while let Some(track) = favorites.next().await? {
//!     println!("{track}");
//! }
//!
//! // PUT /tracks/{id} with track[title]=...
//! track.update("title", "renamed").await?;
//!
//! // PUT /tracks/{id}/permissions with permissions[user_id][]=...
//! track.set_relation("permissions", Relation::Many(&users)).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All public handles are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Lazy pagination**: Pages are only fetched when a collection is drained

pub mod auth;
pub mod clients;
pub mod config;
mod connector;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use auth::Credential;
pub use config::{
    ApiHost, BasePath, ClientId, ClientSecret, ConnectorConfig, ConnectorConfigBuilder,
    DEFAULT_CONNECT_URL, DEFAULT_TOKEN_URL,
};
pub use connector::Connector;
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError,
};

// Re-export OAuth types for convenience
pub use auth::oauth::{construct_connect_url, fetch_access_token, AccessToken, OAuthError};
