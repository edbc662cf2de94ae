//! The first step of the authorization code flow.
//!
//! The user is sent to the connect URL, authorizes the application and is
//! redirected back to the credential's redirect URI with a `code` parameter.

use crate::auth::oauth::OAuthError;
use crate::auth::Credential;
use crate::rest::append_query;

/// Scope requested for every authorization: a token that does not expire.
pub const NON_EXPIRING_SCOPE: &str = "non-expiring";

/// Builds the URL the user must visit to authorize the application.
///
/// # Example
///
/// ```rust
/// use soundcloud_api::auth::oauth::construct_connect_url;
/// use soundcloud_api::{ClientId, ClientSecret, Credential, DEFAULT_CONNECT_URL};
///
/// let credential = Credential::new(
///     ClientId::new("abc").unwrap(),
///     ClientSecret::new("secret").unwrap(),
///     "https://example.com/callback",
/// );
///
/// let url = construct_connect_url(&credential, DEFAULT_CONNECT_URL).unwrap();
/// assert_eq!(
///     url,
///     "https://soundcloud.com/connect?client_id=abc\
///      &redirect_uri=https%3A%2F%2Fexample.com%2Fcallback\
///      &response_type=code&scope=non-expiring"
/// );
/// ```
///
/// # Errors
///
/// Returns [`OAuthError::InvalidConnectUrl`] if `connect_url` is not an
/// absolute URL.
pub fn construct_connect_url(
    credential: &Credential,
    connect_url: &str,
) -> Result<String, OAuthError> {
    append_query(
        connect_url,
        &[
            ("client_id", credential.client_id().as_ref()),
            ("redirect_uri", credential.redirect_uri()),
            ("response_type", "code"),
            ("scope", NON_EXPIRING_SCOPE),
        ],
    )
    .map_err(|source| OAuthError::InvalidConnectUrl {
        url: connect_url.to_string(),
        source,
    })
}
