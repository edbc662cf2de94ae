//! The connector: credential, host, base path and transport.

use std::sync::Arc;

use url::Url;

use crate::auth::Credential;
use crate::clients::HttpClient;
use crate::config::ConnectorConfig;
use crate::error::ConfigError;
use crate::rest::{ApiError, Scope};

/// A handle on the API, shared by every scope derived from it.
///
/// Cloning is cheap. Apart from the credential's access token, a connector
/// never changes after construction.
///
/// # Example
///
/// ```rust
/// use soundcloud_api::{ClientId, ClientSecret, Connector, ConnectorConfig, Credential};
///
/// let credential = Credential::new(
///     ClientId::new("client-id").unwrap(),
///     ClientSecret::new("client-secret").unwrap(),
///     "https://example.com/callback",
/// )
/// .with_access_token("token");
///
/// let connector = Connector::new(ConnectorConfig::default(), credential).unwrap();
/// let root = connector.root_scope();
/// assert!(root.ancestry().is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct Connector {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    config: ConnectorConfig,
    credential: Arc<Credential>,
    http: HttpClient,
}

// Verify Connector is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Connector>();
};

impl Connector {
    /// Creates a connector.
    ///
    /// Pass an `Arc<Credential>` to keep a handle for refreshing the token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the HTTP transport cannot be built from the
    /// configuration.
    pub fn new(
        config: ConnectorConfig,
        credential: impl Into<Arc<Credential>>,
    ) -> Result<Self, ConfigError> {
        let http = HttpClient::new(&config)?;
        Ok(Self {
            inner: Arc::new(Inner {
                config,
                credential: credential.into(),
                http,
            }),
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ConnectorConfig {
        &self.inner.config
    }

    /// Returns the shared credential.
    #[must_use]
    pub fn credential(&self) -> &Arc<Credential> {
        &self.inner.credential
    }

    /// Returns the HTTP client.
    #[must_use]
    pub fn http(&self) -> &HttpClient {
        &self.inner.http
    }

    /// Returns a scope with no ancestors.
    #[must_use]
    pub fn root_scope(&self) -> Scope {
        Scope::new(self.clone())
    }

    /// Turns a redirect location into a method path relative to the base.
    ///
    /// Scheme, host, query and fragment are dropped, then the base path is
    /// stripped.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidAddressing`] if the location does not lie
    /// under the base path.
    pub fn normalize_location(&self, location: &str) -> Result<String, ApiError> {
        let invalid = || ApiError::InvalidAddressing {
            location: location.to_string(),
        };
        let origin = Url::parse(&self.config().host().origin()).map_err(|_| invalid())?;
        let resolved = origin.join(location).map_err(|_| invalid())?;
        let path = resolved.path().trim_start_matches('/');

        let base = self.config().base_path();
        if base.is_empty() {
            return Ok(path.to_string());
        }
        if path == base.as_ref() {
            return Ok(String::new());
        }
        path.strip_prefix(base.prefix().as_str())
            .map(str::to_string)
            .ok_or_else(invalid)
    }

    /// Follows the redirects of a signed asset URL and returns the final,
    /// temporary URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on transport failures.
    pub async fn temporary_download_url(&self, url: &str) -> Result<String, ApiError> {
        Ok(self.http().resolve_redirects(url).await?)
    }
}
