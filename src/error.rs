//! Error types for the SoundCloud API SDK.
//!
//! This module contains error types used throughout the SDK for configuration
//! and validation errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use soundcloud_api::{ClientId, ConfigError};
//!
//! let result = ClientId::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyClientId)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Client id cannot be empty.
    #[error("Client id cannot be empty. Please provide the client id of your registered application.")]
    EmptyClientId,

    /// Client secret cannot be empty.
    #[error("Client secret cannot be empty. Please provide the client secret of your registered application.")]
    EmptyClientSecret,

    /// API host is invalid.
    #[error("Invalid API host '{host}'. Expected a host name such as 'api.soundcloud.com', optionally prefixed with 'http://' or 'https://'.")]
    InvalidHost {
        /// The invalid host that was provided.
        host: String,
    },

    /// Base path is invalid.
    #[error("Invalid base path '{path}'. Base paths may not contain '?' or '#'.")]
    InvalidBasePath {
        /// The invalid base path that was provided.
        path: String,
    },

    /// Proxy URL could not be used by the transport.
    #[error("Invalid proxy URL '{url}': {reason}")]
    InvalidProxy {
        /// The proxy URL that was provided.
        url: String,
        /// Why the transport rejected it.
        reason: String,
    },

    /// The HTTP transport could not be constructed.
    #[error("Failed to build HTTP transport: {reason}")]
    Transport {
        /// The underlying builder failure.
        reason: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
