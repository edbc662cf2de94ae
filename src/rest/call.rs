//! Logical API calls.
//!
//! An [`ApiCall`] names a method relative to a scope plus its positional
//! arguments, body and query parameters. It is plain data: continuations of
//! paginated results are built by cloning the originating call and changing
//! its offset or query.

use crate::clients::{HttpMethod, Params};

/// Number of items the API returns per page.
pub const PAGE_SIZE: u64 = 50;

/// Query parameter carrying the page offset.
pub const OFFSET_PARAMETER: &str = "offset";

/// Query parameter carrying the page size.
pub const LIMIT_PARAMETER: &str = "limit";

/// Query parameter that switches list endpoints to cursor pagination.
pub const LINKED_PARTITIONING_PARAMETER: &str = "linked_partitioning";

/// Body field whose presence on a PUT means "reset the secret token".
pub const SECRET_TOKEN_FIELD: &str = "track[secret_token]";

/// Path segment the secret token reset is sent to.
pub const SECRET_TOKEN_SEGMENT: &str = "secret-token";

/// A call to an API method, relative to a scope.
///
/// # Verb resolution
///
/// An explicit verb wins; otherwise the call is a POST when it carries body
/// parameters and a GET when it does not.
///
/// # Example
///
/// ```rust
/// use soundcloud_api::clients::HttpMethod;
/// use soundcloud_api::rest::ApiCall;
///
/// let call = ApiCall::new("tracks").arg(123).param("track[title]", "renamed");
/// assert_eq!(call.resolved_http_method(), HttpMethod::Post);
///
/// let call = call.http_method(HttpMethod::Put);
/// assert_eq!(call.resolved_http_method(), HttpMethod::Put);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiCall {
    method: String,
    args: Vec<String>,
    body: Params,
    query: Params,
    http_method: Option<HttpMethod>,
    offset: Option<u64>,
}

impl ApiCall {
    /// Creates a call to `method` with no arguments.
    #[must_use]
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            ..Self::default()
        }
    }

    /// Appends a positional path segment.
    #[must_use]
    pub fn arg(mut self, arg: impl ToString) -> Self {
        self.args.push(arg.to_string());
        self
    }

    /// Appends a body parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<crate::clients::ParamValue>) -> Self {
        self.body.push(key, value);
        self
    }

    /// Appends every body parameter of `body`.
    #[must_use]
    pub fn body(mut self, body: Params) -> Self {
        self.body.extend(body);
        self
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn query_param(
        mut self,
        key: impl Into<String>,
        value: impl Into<crate::clients::ParamValue>,
    ) -> Self {
        self.query.push(key, value);
        self
    }

    /// Appends every query parameter of `query`.
    #[must_use]
    pub fn query(mut self, query: Params) -> Self {
        self.query.extend(query);
        self
    }

    /// Forces the HTTP verb.
    #[must_use]
    pub const fn http_method(mut self, method: HttpMethod) -> Self {
        self.http_method = Some(method);
        self
    }

    /// Requests results starting at `offset`.
    ///
    /// The offset replaces any `offset` query parameter.
    #[must_use]
    pub fn offset(mut self, offset: u64) -> Self {
        self.query.remove(OFFSET_PARAMETER);
        self.offset = Some(offset);
        self
    }

    /// Returns the method name.
    #[must_use]
    pub fn method_name(&self) -> &str {
        &self.method
    }

    /// Returns the positional arguments.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Returns the body parameters.
    #[must_use]
    pub const fn body_params(&self) -> &Params {
        &self.body
    }

    /// Returns the query parameters (without the offset).
    #[must_use]
    pub const fn query_params(&self) -> &Params {
        &self.query
    }

    /// Returns the verb the call will be sent with.
    #[must_use]
    pub fn resolved_http_method(&self) -> HttpMethod {
        match self.http_method {
            Some(method) => method,
            None if self.body.is_empty() => HttpMethod::Get,
            None => HttpMethod::Post,
        }
    }

    /// Returns `true` if the call asked for cursor pagination.
    #[must_use]
    pub fn is_linked_partitioning(&self) -> bool {
        self.query.text(LINKED_PARTITIONING_PARAMETER) == Some("1")
    }

    /// Returns the offset this call starts at.
    ///
    /// An explicit [`offset`](Self::offset) wins over an `offset` query
    /// parameter; without either the call starts at zero.
    #[must_use]
    pub fn start_offset(&self) -> u64 {
        self.offset
            .or_else(|| {
                self.query
                    .text(OFFSET_PARAMETER)
                    .and_then(|o| o.trim().parse().ok())
            })
            .unwrap_or(0)
    }

    /// Returns the call fetching the page after this one.
    #[must_use]
    pub fn next_page(&self) -> Self {
        let next = self.start_offset() + PAGE_SIZE;
        self.clone().offset(next)
    }

    /// Returns a GET of the same method and arguments carrying only `query`.
    #[must_use]
    pub(crate) fn with_query(&self, query: Params) -> Self {
        Self {
            method: self.method.clone(),
            args: self.args.clone(),
            query,
            ..Self::default()
        }
    }

    /// Applies the wire rules and returns what is actually sent.
    #[must_use]
    pub fn prepare(&self) -> PreparedCall {
        let http_method = self.resolved_http_method();
        let mut args = self.args.clone();
        let mut body = self.body.clone();
        if http_method == HttpMethod::Put && body.contains_key(SECRET_TOKEN_FIELD) {
            body = Params::new();
            args.push(SECRET_TOKEN_SEGMENT.to_string());
        }

        let mut query = self.query.clone();
        if let Some(offset) = self.offset {
            query.set(OFFSET_PARAMETER, offset);
        }

        let mut path = self.method.clone();
        if !path.ends_with('/') {
            path.push('/');
        }
        path.push_str(&args.join("/"));

        PreparedCall {
            http_method,
            method: self.method.clone(),
            args,
            path,
            body,
            query,
        }
    }
}

/// A call after verb resolution, the secret-token rewrite and offset
/// injection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedCall {
    /// The verb to send.
    pub http_method: HttpMethod,
    /// The method name.
    pub method: String,
    /// Positional arguments, rewrite included.
    pub args: Vec<String>,
    /// `method/args`, the path used for response mapping.
    pub path: String,
    /// Body parameters.
    pub body: Params,
    /// Query parameters, offset included.
    pub query: Params,
}
