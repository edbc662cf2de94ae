//! HTTP request types for the SoundCloud API SDK.
//!
//! This module provides the [`HttpRequest`] type and its builder for
//! describing a single outbound call.

use std::fmt;

use crate::clients::params::Params;

/// HTTP methods supported by the SoundCloud API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns `true` for methods that modify server state.
    #[must_use]
    pub const fn is_mutating(self) -> bool {
        !matches!(self, Self::Get)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// A fully resolved HTTP request: absolute URL, verb and body.
///
/// The body is form-encoded unless it contains an upload, in which case the
/// request is sent as `multipart/form-data`.
///
/// # Example
///
/// ```rust
/// use soundcloud_api::clients::{HttpMethod, HttpRequest, Params, Upload};
///
/// let request = HttpRequest::builder(HttpMethod::Post, "https://api.soundcloud.com/tracks/")
///     .body(
///         Params::new()
///             .with("track[title]", "demo")
///             .with("track[asset_data]", Upload::bytes("demo.wav", vec![1, 2, 3])),
///     )
///     .build();
///
/// assert!(request.multipart);
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The absolute URL, query string included.
    pub url: String,
    /// Body parameters; empty for body-less requests.
    pub body: Params,
    /// Whether the body must be multipart-encoded.
    pub multipart: bool,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, url: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, url)
    }

    /// Returns `true` if the request carries body parameters.
    #[must_use]
    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    url: String,
    body: Params,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            http_method: method,
            url: url.into(),
            body: Params::new(),
        }
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: Params) -> Self {
        self.body = body;
        self
    }

    /// Builds the [`HttpRequest`], deciding the body encoding.
    #[must_use]
    pub fn build(self) -> HttpRequest {
        let multipart = self.body.has_uploads();
        HttpRequest {
            http_method: self.http_method,
            url: self.url,
            body: self.body,
            multipart,
        }
    }
}
