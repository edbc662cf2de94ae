//! OAuth-specific error types for the SoundCloud API SDK.
//!
//! # Example
//!
//! ```rust
//! use soundcloud_api::auth::oauth::OAuthError;
//!
//! let error = OAuthError::TokenExchangeFailed {
//!     status: 401,
//!     message: "invalid_client".to_string(),
//! };
//! assert!(error.to_string().contains("401"));
//! ```

use thiserror::Error;

/// Errors that can occur while exchanging an authorization code.
///
/// # Thread Safety
///
/// `OAuthError` is `Send + Sync`, making it safe to use across async boundaries.
#[derive(Debug, Error)]
pub enum OAuthError {
    /// The token endpoint rejected the request or could not be reached.
    ///
    /// A `status` of `0` means no HTTP response was received.
    #[error("Token exchange failed with status {status}: {message}")]
    TokenExchangeFailed {
        /// HTTP status code, or `0` for network failures.
        status: u16,
        /// Response body or failure description.
        message: String,
    },

    /// The connect URL is not an absolute URL.
    #[error("Invalid connect URL '{url}': {source}")]
    InvalidConnectUrl {
        /// The rejected URL.
        url: String,
        /// The parser failure.
        source: url::ParseError,
    },

    /// The token endpoint answered without an `access_token`.
    #[error("Token response did not contain an access token: {body}")]
    MissingAccessToken {
        /// The response body.
        body: String,
    },
}

// Verify OAuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OAuthError>();
};
