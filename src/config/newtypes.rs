//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated SoundCloud client id.
///
/// This newtype ensures the client id is non-empty and provides type safety
/// to prevent accidental misuse of raw strings.
///
/// # Example
///
/// ```rust
/// use soundcloud_api::ClientId;
///
/// let id = ClientId::new("my-client-id").unwrap();
/// assert_eq!(id.as_ref(), "my-client-id");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientId(String);

impl ClientId {
    /// Creates a new validated client id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyClientId`] if the id is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ConfigError::EmptyClientId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for ClientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated SoundCloud client secret.
///
/// The `Debug` implementation masks the secret value, displaying only
/// `ClientSecret(*****)` instead of the actual secret.
///
/// ```rust
/// use soundcloud_api::ClientSecret;
///
/// let secret = ClientSecret::new("my-secret").unwrap();
/// assert_eq!(format!("{:?}", secret), "ClientSecret(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ClientSecret(String);

impl ClientSecret {
    /// Creates a new validated client secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyClientSecret`] if the secret is empty.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::EmptyClientSecret);
        }
        Ok(Self(secret))
    }
}

impl AsRef<str> for ClientSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientSecret(*****)")
    }
}

/// A validated API host.
///
/// Hosts are given as a bare authority (`api.soundcloud.com`,
/// `localhost:8080`), optionally prefixed with `http://` or `https://`.
/// Without a prefix the scheme is `https`. A trailing slash is dropped.
///
/// # Example
///
/// ```rust
/// use soundcloud_api::ApiHost;
///
/// let host = ApiHost::new("api.soundcloud.com").unwrap();
/// assert_eq!(host.scheme(), "https");
/// assert_eq!(host.origin(), "https://api.soundcloud.com");
///
/// let local = ApiHost::new("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(local.scheme(), "http");
/// assert_eq!(local.authority(), "127.0.0.1:8080");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiHost {
    scheme: &'static str,
    authority: String,
}

impl ApiHost {
    /// The host used when none is configured.
    pub const DEFAULT: &'static str = "api.soundcloud.com";

    /// Creates a new validated API host.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHost`] if the host is empty, has an
    /// unsupported scheme, or contains a path, query, fragment or whitespace.
    pub fn new(host: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = host.into();
        let trimmed = raw.trim();

        let (scheme, rest) = if let Some(rest) = trimmed.strip_prefix("https://") {
            ("https", rest)
        } else if let Some(rest) = trimmed.strip_prefix("http://") {
            ("http", rest)
        } else if trimmed.contains("://") {
            return Err(ConfigError::InvalidHost { host: raw });
        } else {
            ("https", trimmed)
        };

        let authority = rest.strip_suffix('/').unwrap_or(rest);
        if authority.is_empty()
            || authority
                .chars()
                .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#'))
        {
            return Err(ConfigError::InvalidHost { host: raw });
        }

        Ok(Self {
            scheme,
            authority: authority.to_string(),
        })
    }

    /// Returns the URL scheme (`http` or `https`).
    #[must_use]
    pub const fn scheme(&self) -> &'static str {
        self.scheme
    }

    /// Returns the host and optional port.
    #[must_use]
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Returns `scheme://authority`.
    #[must_use]
    pub fn origin(&self) -> String {
        format!("{}://{}", self.scheme, self.authority)
    }
}

impl Default for ApiHost {
    fn default() -> Self {
        Self {
            scheme: "https",
            authority: Self::DEFAULT.to_string(),
        }
    }
}

impl AsRef<str> for ApiHost {
    fn as_ref(&self) -> &str {
        &self.authority
    }
}

impl Serialize for ApiHost {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.origin())
    }
}

impl<'de> Deserialize<'de> for ApiHost {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// The API base path every request lives under.
///
/// Leading and trailing slashes are normalized away; an empty base path means
/// resources live directly under the host root.
///
/// # Example
///
/// ```rust
/// use soundcloud_api::BasePath;
///
/// let base = BasePath::new("/v1/").unwrap();
/// assert_eq!(base.as_ref(), "v1");
/// assert_eq!(base.prefix(), "v1/");
///
/// assert_eq!(BasePath::default().prefix(), "");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BasePath(String);

impl BasePath {
    /// Creates a new validated base path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBasePath`] if the path contains a query
    /// or fragment delimiter.
    pub fn new(path: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = path.into();
        if raw.contains(['?', '#']) || raw.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidBasePath { path: raw });
        }
        Ok(Self(raw.trim_matches('/').to_string()))
    }

    /// Returns `true` if requests live directly under the host root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the base path ready to be followed by a scope or method,
    /// i.e. `""` or `"v1/"`.
    #[must_use]
    pub fn prefix(&self) -> String {
        if self.0.is_empty() {
            String::new()
        } else {
            format!("{}/", self.0)
        }
    }
}

impl AsRef<str> for BasePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
