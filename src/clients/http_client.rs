//! HTTP client for SoundCloud API communication.
//!
//! This module provides the [`HttpClient`] type which sends a single logical
//! call, following the API's `303`/`201` addressing redirects itself.

use std::collections::HashMap;

use reqwest::multipart::{Form, Part};
use url::Url;

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::clients::params::{ParamValue, Params, Upload};
use crate::clients::redirect::{
    resolve_location, RedirectInterpreter, RedirectOutcome, Transition, MAX_REDIRECTS,
};
use crate::config::ConnectorConfig;
use crate::error::ConfigError;
use crate::rest::{redact_access_token, OAUTH_TOKEN_PARAMETER};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The result of dispatching a request.
#[derive(Debug)]
pub enum Dispatch {
    /// The final response, plus where the API redirected to.
    Completed {
        /// The final response.
        response: HttpResponse,
        /// The redirect bookkeeping of the call.
        redirect: RedirectOutcome,
    },
    /// The API answered `201 Created` without naming a resource.
    NoResult,
    /// A GET was answered with `404`.
    NotFound,
}

/// HTTP client for making requests to the SoundCloud API.
///
/// The client handles:
/// - Default headers (`Accept: application/json`, `User-Agent`)
/// - Form and streamed multipart bodies
/// - `Content-Length: 0` on body-less mutating requests
/// - The API's redirect conventions, with automatic redirects disabled
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// `scheme://host[:port]` of the API.
    origin: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the given configuration.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidProxy`] if the configured proxy is rejected
    /// - [`ConfigError::Transport`] if the TLS backend cannot be initialized
    ///
    /// # Example
    ///
    /// ```rust
    /// use soundcloud_api::clients::HttpClient;
    /// use soundcloud_api::ConnectorConfig;
    ///
    /// let client = HttpClient::new(&ConnectorConfig::default()).unwrap();
    /// assert_eq!(client.origin(), "https://api.soundcloud.com");
    /// ```
    pub fn new(config: &ConnectorConfig) -> Result<Self, ConfigError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}SoundCloud API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .redirect(reqwest::redirect::Policy::none());

        if let Some(proxy_url) = config.proxy() {
            let proxy = reqwest::Proxy::all(proxy_url).map_err(|e| ConfigError::InvalidProxy {
                url: proxy_url.to_string(),
                reason: e.to_string(),
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(|e| ConfigError::Transport {
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            origin: config.host().origin(),
            default_headers,
        })
    }

    /// Returns `scheme://host[:port]` of the API.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends a request and follows the API's addressing redirects.
    ///
    /// A `303`, or a `201` carrying a `Location`, is followed with a GET
    /// against the new location, signed with `oauth_token` when given.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - a network error occurs (`Network`)
    /// - the request URL or a `Location` is not a valid URL (`InvalidUrl`)
    /// - an upload file cannot be opened (`Upload`)
    /// - a response other than 2xx/3xx is received, except a GET `404` (`Response`)
    /// - the redirect chain is longer than [`MAX_REDIRECTS`] (`TooManyRedirects`)
    pub async fn execute(
        &self,
        request: HttpRequest,
        oauth_token: Option<&str>,
    ) -> Result<Dispatch, HttpError> {
        let mut interpreter = RedirectInterpreter::new(parse_url(&request.url)?);

        interpreter.dispatch();
        let mut response = self
            .send(request.http_method, &request.url, &request.body, request.multipart)
            .await?;
        let mut http_method = request.http_method;

        loop {
            if response.code == 404 && request.http_method == HttpMethod::Get {
                return Ok(Dispatch::NotFound);
            }
            if !(200..400).contains(&response.code) {
                return Err(HttpError::Response(HttpResponseError {
                    code: response.code,
                    message: response.body,
                }));
            }

            match interpreter.observe(response.code, response.location())? {
                Transition::Follow(location) => {
                    let mut url = parse_url(&location)?;
                    if let Some(token) = oauth_token {
                        if !url.query_pairs().any(|(k, _)| k == OAUTH_TOKEN_PARAMETER) {
                            url.query_pairs_mut().append_pair(OAUTH_TOKEN_PARAMETER, token);
                        }
                    }
                    tracing::debug!(
                        from = %http_method,
                        status = response.code,
                        url = %redact_access_token(url.as_str()),
                        "Following redirect"
                    );
                    interpreter.dispatch();
                    http_method = HttpMethod::Get;
                    response = self
                        .send(http_method, url.as_str(), &Params::new(), false)
                        .await?;
                }
                Transition::Suppress => return Ok(Dispatch::NoResult),
                Transition::Finish => {
                    return Ok(Dispatch::Completed {
                        response,
                        redirect: interpreter.outcome(),
                    })
                }
            }
        }
    }

    /// Follows standard HTTP redirects from `url` and returns the final URL.
    ///
    /// The final response body is never read.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] on connection failures,
    /// [`HttpError::InvalidUrl`] on unparseable URLs and
    /// [`HttpError::TooManyRedirects`] if the chain does not end.
    pub async fn resolve_redirects(&self, url: &str) -> Result<String, HttpError> {
        let mut current = parse_url(url)?;
        for _ in 0..=MAX_REDIRECTS {
            let res = self.client.get(current.clone()).send().await?;
            let location = res
                .headers()
                .get(reqwest::header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            match location {
                Some(location) if res.status().is_redirection() => {
                    current = resolve_location(&current, &location)?;
                }
                _ => return Ok(current.into()),
            }
        }
        Err(HttpError::TooManyRedirects {
            limit: MAX_REDIRECTS,
        })
    }

    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        body: &Params,
        multipart: bool,
    ) -> Result<HttpResponse, HttpError> {
        let mut req_builder = match method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Put => self.client.put(url),
            HttpMethod::Delete => self.client.delete(url),
        };

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }

        if body.is_empty() {
            if method.is_mutating() {
                req_builder = req_builder.header(reqwest::header::CONTENT_LENGTH, "0");
            }
        } else if multipart {
            req_builder = req_builder.multipart(Self::multipart_form(body).await?);
        } else {
            let pairs: Vec<(&str, &str)> = body.text_pairs().collect();
            req_builder = req_builder.form(&pairs);
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body = res.text().await?;

        Ok(HttpResponse::new(code, headers, body))
    }

    /// Builds a multipart form; files are streamed from disk.
    async fn multipart_form(body: &Params) -> Result<Form, HttpError> {
        let mut form = Form::new();
        for (key, value) in body.iter() {
            form = match value {
                ParamValue::Text(text) => form.text(key.to_string(), text.clone()),
                ParamValue::Upload(Upload::File(path)) => {
                    let upload_error = |source| HttpError::Upload {
                        path: path.clone(),
                        source,
                    };
                    let file = tokio::fs::File::open(path).await.map_err(upload_error)?;
                    let length = file.metadata().await.map_err(upload_error)?.len();
                    let file_name = path
                        .file_name()
                        .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());
                    let part = Part::stream_with_length(reqwest::Body::from(file), length)
                        .file_name(file_name);
                    form.part(key.to_string(), part)
                }
                ParamValue::Upload(Upload::Bytes { file_name, bytes }) => {
                    let part = Part::bytes(bytes.clone()).file_name(file_name.clone());
                    form.part(key.to_string(), part)
                }
            };
        }
        Ok(form)
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

fn parse_url(url: &str) -> Result<Url, HttpError> {
    Url::parse(url).map_err(|source| HttpError::InvalidUrl {
        url: url.to_string(),
        source,
    })
}
