//! Configuration types for the SoundCloud API SDK.
//!
//! This module provides the configuration used to build a
//! [`Connector`](crate::Connector).
//!
//! # Overview
//!
//! - [`ConnectorConfig`]: Host, base path, scope collapsing and transport settings
//! - [`ConnectorConfigBuilder`]: A builder for constructing [`ConnectorConfig`] instances
//! - [`ClientId`] / [`ClientSecret`]: Validated application credentials
//! - [`ApiHost`] / [`BasePath`]: Validated addressing values
//!
//! # Example
//!
//! ```rust
//! use soundcloud_api::{ApiHost, ConnectorConfig};
//!
//! let config = ConnectorConfig::builder()
//!     .host(ApiHost::new("api.soundcloud.com").unwrap())
//!     .collapse_scope(true)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.host().origin(), "https://api.soundcloud.com");
//! ```

mod newtypes;

pub use newtypes::{ApiHost, BasePath, ClientId, ClientSecret};

use crate::error::ConfigError;

/// The default URL users are sent to for authorizing an application.
pub const DEFAULT_CONNECT_URL: &str = "https://soundcloud.com/connect";

/// The default OAuth2 token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://api.soundcloud.com/oauth2/token";

/// Configuration for a [`Connector`](crate::Connector).
///
/// # Thread Safety
///
/// `ConnectorConfig` is `Clone`, `Send`, and `Sync`.
///
/// # Proxies
///
/// A proxy is configured per connector rather than process-wide, so two
/// connectors in the same process can route differently.
#[derive(Clone, Debug)]
pub struct ConnectorConfig {
    host: ApiHost,
    base_path: BasePath,
    collapse_scope: bool,
    proxy: Option<String>,
    user_agent_prefix: Option<String>,
}

impl ConnectorConfig {
    /// Creates a new builder for constructing a `ConnectorConfig`.
    #[must_use]
    pub fn builder() -> ConnectorConfigBuilder {
        ConnectorConfigBuilder::new()
    }

    /// Returns the API host.
    #[must_use]
    pub const fn host(&self) -> &ApiHost {
        &self.host
    }

    /// Returns the API base path.
    #[must_use]
    pub const fn base_path(&self) -> &BasePath {
        &self.base_path
    }

    /// Returns whether only the nearest ancestor is rendered in request paths.
    #[must_use]
    pub const fn collapse_scope(&self) -> bool {
        self.collapse_scope
    }

    /// Returns the proxy URL, if configured.
    #[must_use]
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            host: ApiHost::default(),
            base_path: BasePath::default(),
            collapse_scope: true,
            proxy: None,
            user_agent_prefix: None,
        }
    }
}

// Verify ConnectorConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ConnectorConfig>();
};

/// Builder for constructing [`ConnectorConfig`] instances.
///
/// # Defaults
///
/// - `host`: `api.soundcloud.com` over https
/// - `base_path`: empty
/// - `collapse_scope`: `true`
/// - `proxy`: `None`
/// - `user_agent_prefix`: `None`
///
/// # Example
///
/// ```rust
/// use soundcloud_api::{ApiHost, BasePath, ConnectorConfig};
///
/// let config = ConnectorConfig::builder()
///     .host(ApiHost::new("http://localhost:8080").unwrap())
///     .base_path(BasePath::new("v1").unwrap())
///     .collapse_scope(false)
///     .proxy("http://127.0.0.1:10000/")
///     .user_agent_prefix("MyApp/1.0")
///     .build()
///     .unwrap();
///
/// assert!(!config.collapse_scope());
/// ```
#[derive(Debug, Default)]
pub struct ConnectorConfigBuilder {
    host: Option<ApiHost>,
    base_path: Option<BasePath>,
    collapse_scope: Option<bool>,
    proxy: Option<String>,
    user_agent_prefix: Option<String>,
}

impl ConnectorConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API host.
    #[must_use]
    pub fn host(mut self, host: ApiHost) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the API base path.
    #[must_use]
    pub fn base_path(mut self, base_path: BasePath) -> Self {
        self.base_path = Some(base_path);
        self
    }

    /// Sets whether only the nearest ancestor is rendered in request paths.
    #[must_use]
    pub const fn collapse_scope(mut self, collapse: bool) -> Self {
        self.collapse_scope = Some(collapse);
        self
    }

    /// Routes all requests of the connector through the given proxy.
    #[must_use]
    pub fn proxy(mut self, url: impl Into<String>) -> Self {
        self.proxy = Some(url.into());
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ConnectorConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidProxy`] if the proxy URL is empty.
    pub fn build(self) -> Result<ConnectorConfig, ConfigError> {
        if let Some(proxy) = &self.proxy {
            if proxy.trim().is_empty() {
                return Err(ConfigError::InvalidProxy {
                    url: proxy.clone(),
                    reason: "proxy URL is empty".to_string(),
                });
            }
        }

        Ok(ConnectorConfig {
            host: self.host.unwrap_or_default(),
            base_path: self.base_path.unwrap_or_default(),
            collapse_scope: self.collapse_scope.unwrap_or(true),
            proxy: self.proxy,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
