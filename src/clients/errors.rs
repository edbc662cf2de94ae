//! HTTP-specific error types for the SoundCloud API SDK.
//!
//! This module contains error types for the transport layer: unsuccessful
//! responses, network failures, runaway redirect chains and unreadable
//! upload files.
//!
//! # Example
//!
//! ```rust,ignore
//! use soundcloud_api::clients::HttpError;
//!
//! match client.execute(request, token).await {
//!     Ok(dispatched) => { /* handle response */ }
//!     Err(HttpError::Response(e)) => {
//!         println!("API error {}: {}", e.code, e.message);
//!     }
//!     Err(HttpError::TooManyRedirects { limit }) => {
//!         println!("Gave up after {limit} redirects");
//!     }
//!     Err(HttpError::Upload { path, source }) => {
//!         println!("Could not read {}: {source}", path.display());
//!     }
//!     Err(HttpError::Network(e)) => {
//!         println!("Network error: {}", e);
//!     }
//! }
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Error returned when an HTTP request receives an unsuccessful response.
///
/// The message carries the raw response body so that server-side error
/// descriptions are not lost.
///
/// # Example
///
/// ```rust
/// use soundcloud_api::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 422,
///     message: r#"{"errors":[{"error_message":"invalid"}]}"#.to_string(),
/// };
///
/// assert!(error.to_string().contains("422"));
/// ```
#[derive(Debug, Error)]
#[error("HTTP {code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The response body.
    pub message: String,
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (any status other than 2xx/3xx, or a GET 404
    /// surfaced by a caller that does not accept absence).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// The redirect chain was longer than the client is willing to follow.
    #[error("Redirect chain exceeded {limit} hops")]
    TooManyRedirects {
        /// The maximum number of hops that are followed.
        limit: usize,
    },

    /// A file named as an upload could not be opened.
    #[error("Failed to open upload '{}': {source}", path.display())]
    Upload {
        /// The file that could not be opened.
        path: PathBuf,
        /// The underlying I/O failure.
        source: std::io::Error,
    },

    /// A request URL or `Location` header is not a valid URL.
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        /// The rejected URL or reference.
        url: String,
        /// The parser failure.
        source: url::ParseError,
    },

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

// Verify HttpError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpError>();
};
