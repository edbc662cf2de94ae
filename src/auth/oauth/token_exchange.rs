//! Exchanging an authorization code for an access token.
//!
//! After the user authorized the application (see
//! [`construct_connect_url`](crate::auth::oauth::construct_connect_url)) the
//! redirect carries a `code`. It is posted, form-encoded, to the token
//! endpoint together with the application's credentials:
//!
//! ```text
//! client_id, client_secret, redirect_uri, grant_type=authorization_code, code
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use soundcloud_api::auth::oauth::fetch_access_token;
//! use soundcloud_api::DEFAULT_TOKEN_URL;
//!
//! let token = fetch_access_token(&credential, &code, DEFAULT_TOKEN_URL).await?;
//! println!("Authorized with scope {:?}", token.scope);
//! // The credential now signs requests with the new token.
//! ```

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use crate::auth::oauth::OAuthError;
use crate::auth::Credential;

/// Grant type of the authorization code flow.
const AUTHORIZATION_CODE_GRANT_TYPE: &str = "authorization_code";

/// Raw token endpoint response.
#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    access_token: Option<String>,
    scope: Option<String>,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
}

/// An access token obtained from the token endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    /// The token used to sign API requests.
    pub access_token: String,
    /// The scope granted, if reported.
    pub scope: Option<String>,
    /// A refresh token, if issued.
    pub refresh_token: Option<String>,
    /// When the token expires; `None` for non-expiring tokens.
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    /// Returns `true` if the token has an expiry that lies in the past.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| at <= Utc::now())
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"*****")
            .field("scope", &self.scope)
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "*****"))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Exchanges an authorization code for an access token.
///
/// On success the token is also stored on `credential`, so every scope
/// derived from a connector sharing it signs requests with the new token.
///
/// # Errors
///
/// - [`OAuthError::TokenExchangeFailed`] if the endpoint cannot be reached,
///   answers with a non-success status, or answers with invalid JSON
/// - [`OAuthError::MissingAccessToken`] if the response has no `access_token`
pub async fn fetch_access_token(
    credential: &Credential,
    code: &str,
    token_url: &str,
) -> Result<AccessToken, OAuthError> {
    let form = [
        ("client_id", credential.client_id().as_ref()),
        ("client_secret", credential.client_secret().as_ref()),
        ("redirect_uri", credential.redirect_uri()),
        ("grant_type", AUTHORIZATION_CODE_GRANT_TYPE),
        ("code", code),
    ];

    tracing::debug!(url = token_url, "Fetching access token");

    let client = reqwest::Client::new();
    let response = client
        .post(token_url)
        .header("Accept", "application/json")
        .form(&form)
        .send()
        .await
        .map_err(|e| OAuthError::TokenExchangeFailed {
            status: 0,
            message: format!("Network error: {e}"),
        })?;

    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|e| OAuthError::TokenExchangeFailed {
            status,
            message: format!("Failed to read token response: {e}"),
        })?;

    if !(200..300).contains(&status) {
        return Err(OAuthError::TokenExchangeFailed {
            status,
            message: body,
        });
    }

    let parsed: AccessTokenResponse =
        serde_json::from_str(&body).map_err(|e| OAuthError::TokenExchangeFailed {
            status,
            message: format!("Failed to parse token response: {e}"),
        })?;

    let Some(access_token) = parsed.access_token.filter(|t| !t.is_empty()) else {
        return Err(OAuthError::MissingAccessToken { body });
    };

    credential.set_access_token(Some(access_token.clone()));

    Ok(AccessToken {
        access_token,
        scope: parsed.scope,
        refresh_token: parsed.refresh_token,
        expires_at: parsed
            .expires_in
            .map(|seconds| Utc::now() + Duration::seconds(seconds)),
    })
}
