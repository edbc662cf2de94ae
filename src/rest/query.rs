//! URL and query string composition.
//!
//! Every request URL has the shape
//! `scheme://host/base/scope/method/args?query`:
//!
//! - `base` is the connector's [`BasePath`](crate::BasePath) prefix
//! - `scope` renders the ancestry as `kind/id/kind/id/`, or only the nearest
//!   ancestor when scope collapsing is enabled
//! - `method` always ends with `/` before positional arguments are joined on
//!
//! The signing helpers work on arbitrary URLs, typically download or stream
//! links that are served outside the API's own redirect handling.

use url::{form_urlencoded, Url};

use crate::clients::Params;
use crate::config::ConnectorConfig;
use crate::rest::scope::{ResourceRef, OAUTH_TOKEN_PARAMETER};

/// Stand-in for secrets in logged URLs.
const REDACTED: &str = "*****";

/// Builds the absolute URL of an API call.
///
/// # Example
///
/// ```rust
/// use soundcloud_api::clients::Params;
/// use soundcloud_api::rest::{build_url, ResourceRef};
/// use soundcloud_api::ConnectorConfig;
///
/// let config = ConnectorConfig::default();
/// let ancestry = [ResourceRef::new("users", 1), ResourceRef::new("tracks", 2)];
/// let query = Params::new().with("oauth_token", "T");
///
/// let url = build_url(&config, &ancestry, "comments", &[], &query);
/// assert_eq!(url, "https://api.soundcloud.com/tracks/2/comments/?oauth_token=T");
/// ```
#[must_use]
pub fn build_url(
    config: &ConnectorConfig,
    ancestry: &[ResourceRef],
    method: &str,
    args: &[String],
    query: &Params,
) -> String {
    let refs = if config.collapse_scope() && ancestry.len() > 1 {
        &ancestry[ancestry.len() - 1..]
    } else {
        ancestry
    };
    let scope: String = refs.iter().map(|r| format!("{r}/")).collect();

    let mut path = method.to_string();
    if !path.ends_with('/') {
        path.push('/');
    }
    path.push_str(&args.join("/"));

    format!(
        "{}/{}{}{}{}",
        config.host().origin(),
        config.base_path().prefix(),
        scope,
        path,
        create_query_string(query)
    )
}

/// Renders query parameters as `?k=v&k=v`, or an empty string.
///
/// Keys and values are percent-encoded as UTF-8; repeated keys are kept;
/// uploads are skipped.
///
/// ```rust
/// use soundcloud_api::clients::Params;
/// use soundcloud_api::rest::create_query_string;
///
/// let mut query = Params::new();
/// query.push("q", "hello world");
/// query.push_list("ids", [1_u64, 2]);
///
/// assert_eq!(create_query_string(&query), "?q=hello%20world&ids=1&ids=2");
/// assert_eq!(create_query_string(&Params::new()), "");
/// ```
#[must_use]
pub fn create_query_string(query: &Params) -> String {
    let encoded = encode_pairs(query.text_pairs());
    if encoded.is_empty() {
        String::new()
    } else {
        format!("?{encoded}")
    }
}

/// Appends `key=value` pairs to an absolute URL, keeping its existing query
/// and fragment intact.
///
/// # Errors
///
/// Returns [`url::ParseError`] if `url` is not an absolute URL.
pub fn append_query(url: &str, pairs: &[(&str, &str)]) -> Result<String, url::ParseError> {
    let mut parsed = Url::parse(url)?;
    if !pairs.is_empty() {
        parsed.query_pairs_mut().extend_pairs(pairs);
    }
    Ok(parsed.into())
}

/// Appends the OAuth access token to a URL.
///
/// ```rust
/// use soundcloud_api::rest::oauth_sign_get_request;
///
/// assert_eq!(
///     oauth_sign_get_request("https://api.soundcloud.com/tracks/1/stream", "T").unwrap(),
///     "https://api.soundcloud.com/tracks/1/stream?oauth_token=T"
/// );
/// ```
///
/// # Errors
///
/// Returns [`url::ParseError`] if `url` is not an absolute URL.
pub fn oauth_sign_get_request(url: &str, access_token: &str) -> Result<String, url::ParseError> {
    append_query(url, &[(OAUTH_TOKEN_PARAMETER, access_token)])
}

/// Appends a track's secret token and the application's client id to a URL.
///
/// # Errors
///
/// Returns [`url::ParseError`] if `url` is not an absolute URL.
pub fn add_secret_token(
    url: &str,
    secret_token: &str,
    client_id: &str,
) -> Result<String, url::ParseError> {
    append_query(
        url,
        &[("secret_token", secret_token), ("client_id", client_id)],
    )
}

/// Appends the application's client id to a URL.
///
/// # Errors
///
/// Returns [`url::ParseError`] if `url` is not an absolute URL.
pub fn add_client_id(url: &str, client_id: &str) -> Result<String, url::ParseError> {
    append_query(url, &[("client_id", client_id)])
}

/// Parses a query string (with or without a leading `?`) into parameters.
///
/// `+` is decoded as a space.
#[must_use]
pub fn parse_query(query: &str) -> Params {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut params = Params::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        params.push(key.into_owned(), value.into_owned());
    }
    params
}

/// Masks the value of `oauth_token` in a URL for logging.
///
/// ```rust
/// use soundcloud_api::rest::redact_access_token;
///
/// assert_eq!(
///     redact_access_token("https://api.soundcloud.com/me/?oauth_token=T&q=x"),
///     "https://api.soundcloud.com/me/?oauth_token=*****&q=x"
/// );
/// ```
#[must_use]
pub fn redact_access_token(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return REDACTED.to_string();
    };
    if !parsed.query_pairs().any(|(k, _)| k == OAUTH_TOKEN_PARAMETER) {
        return parsed.into();
    }
    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == OAUTH_TOKEN_PARAMETER {
                REDACTED.to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();
    parsed.query_pairs_mut().clear().extend_pairs(pairs);
    parsed.into()
}

fn encode_pairs<'a>(pairs: impl Iterator<Item = (&'a str, &'a str)>) -> String {
    pairs
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
