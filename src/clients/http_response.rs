//! HTTP response types for the SoundCloud API SDK.
//!
//! This module provides the [`HttpResponse`] type: a fully read response
//! with lowercased header names.

use std::collections::HashMap;

/// A response from the SoundCloud API.
///
/// The body is kept as text; interpreting it depends on the content type and
/// is the caller's job.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use soundcloud_api::clients::HttpResponse;
///
/// let mut headers = HashMap::new();
/// headers.insert(
///     "content-type".to_string(),
///     vec!["application/json; charset=utf-8".to_string()],
/// );
///
/// let response = HttpResponse::new(200, headers, r#"{"id":1}"#.to_string());
/// assert!(response.is_ok());
/// assert!(response.is_json());
/// ```
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers (lowercase keys, multi-value support).
    pub headers: HashMap<String, Vec<String>>,
    /// The response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(code: u16, headers: HashMap<String, Vec<String>>, body: String) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` if the response has a 2xx status code.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `Content-Type` header, or an empty string if absent.
    #[must_use]
    pub fn content_type(&self) -> &str {
        self.header("content-type").unwrap_or_default()
    }

    /// Returns `true` if the content type denotes JSON.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.content_type().contains("application/json")
    }

    /// Returns the `Location` header, if present.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.header("location")
    }
}
