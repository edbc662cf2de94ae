//! Application credentials and the current access token.

use std::fmt;
use std::sync::{PoisonError, RwLock};

use crate::config::{ClientId, ClientSecret};

/// The credentials of a registered application plus, once authorized, the
/// user's OAuth access token.
///
/// The access token can be replaced at any time (for example after a token
/// exchange); requests read whatever token is current when they are built.
///
/// # Thread Safety
///
/// `Credential` is `Send + Sync` and is shared between a connector and its
/// scopes behind an `Arc`.
///
/// # Example
///
/// ```rust
/// use soundcloud_api::{ClientId, ClientSecret, Credential};
///
/// let credential = Credential::new(
///     ClientId::new("my-client-id").unwrap(),
///     ClientSecret::new("my-secret").unwrap(),
///     "https://example.com/callback",
/// )
/// .with_access_token("token");
///
/// assert_eq!(credential.access_token().as_deref(), Some("token"));
/// credential.set_access_token(None);
/// assert!(credential.access_token().is_none());
/// ```
pub struct Credential {
    client_id: ClientId,
    client_secret: ClientSecret,
    redirect_uri: String,
    access_token: RwLock<Option<String>>,
}

impl Credential {
    /// Creates a credential without an access token.
    #[must_use]
    pub fn new(
        client_id: ClientId,
        client_secret: ClientSecret,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id,
            client_secret,
            redirect_uri: redirect_uri.into(),
            access_token: RwLock::new(None),
        }
    }

    /// Sets the initial access token.
    #[must_use]
    pub fn with_access_token(self, token: impl Into<String>) -> Self {
        self.set_access_token(Some(token.into()));
        self
    }

    /// Returns the client id.
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Returns the client secret.
    #[must_use]
    pub const fn client_secret(&self) -> &ClientSecret {
        &self.client_secret
    }

    /// Returns the redirect URI registered for the application.
    #[must_use]
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// Returns a copy of the current access token.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.access_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the access token.
    pub fn set_access_token(&self, token: Option<String>) {
        *self
            .access_token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = token;
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret)
            .field("redirect_uri", &self.redirect_uri)
            .field(
                "access_token",
                &self.access_token().map(|_| "*****"),
            )
            .finish()
    }
}

// Verify Credential is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Credential>();
};
