//! Error types for scoped resource access.
//!
//! Transport failures are wrapped in [`ApiError::Http`]; everything else is a
//! failure to interpret what the API returned or to address a resource.
//!
//! Absence is not an error: a GET answered with `404` and a create answered
//! with `201` but no `Location` are reported as
//! [`Outcome::NotFound`](crate::rest::Outcome::NotFound) and
//! [`Outcome::NoResult`](crate::rest::Outcome::NoResult).
//!
//! # Example
//!
//! ```rust,ignore
//! use soundcloud_api::rest::ApiError;
//!
//! match scope.endpoint("tracks").fetch().await {
//!     Ok(outcome) => println!("{outcome:?}"),
//!     Err(ApiError::UnexpectedContentType { content_type, .. }) => {
//!         println!("API answered with {content_type}");
//!     }
//!     Err(ApiError::Http(e)) => println!("Transport failure: {e}"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use crate::clients::HttpError;
use thiserror::Error;

/// Error type for scope, endpoint and resource operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A redirect named a location outside the connector's base path.
    #[error("Not a valid API method: {location}")]
    InvalidAddressing {
        /// The offending location.
        location: String,
    },

    /// The response was neither JSON nor (nearly) empty.
    #[error("Unexpected content type '{content_type}', returned:\n{body}")]
    UnexpectedContentType {
        /// The `Content-Type` header of the response.
        content_type: String,
        /// The response body.
        body: String,
    },

    /// A JSON response could not be decoded.
    #[error("Couldn't decode returned json: {source}")]
    MalformedPayload {
        /// The raw response body.
        body: String,
        /// The decoder failure.
        source: serde_json::Error,
    },

    /// A descriptor name or kind is not registered.
    #[error("Unknown resource kind: {name}")]
    UnknownResourceKind {
        /// The name that was looked up.
        name: String,
    },

    /// An operation needed the id of a resource that has none.
    #[error("{kind} resource has no id")]
    MissingId {
        /// The kind of the id-less resource.
        kind: &'static str,
    },

    /// A URL handed to a signing helper is not an absolute URL.
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        /// The parser failure.
        source: url::ParseError,
    },

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),
}

// Verify ApiError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiError>();
};
