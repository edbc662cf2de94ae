//! Scopes: composable addressing contexts.
//!
//! A [`Scope`] is a connector plus an ordered list of ancestor resources.
//! Names are resolved against a scope into either a [`ResourceBinder`]
//! (when the name is a registered descriptor name such as `Track`) or an
//! [`Endpoint`] (any other name, such as `tracks` or `me`). Calls issued
//! through either are addressed below the scope's ancestry.
//!
//! # Example
//!
//! ```rust,ignore
//! let root = connector.root_scope();
//!
//! // GET /me/
//! let me = root.endpoint("me").fetch().await?.into_resource().unwrap();
//!
//! // GET /users/{id}/tracks/ and walk every page
//! let mut tracks = me.endpoint("tracks")?.fetch().await?.into_collection().unwrap();
//! while let Some(track) = tracks.next().await? {
//!     println!("{track}");
//! }
//!
//! // POST /tracks/ with track[title]=...
//! root.binder("Track")?.new([("title", "demo")]).await?;
//! ```

use std::fmt;

use serde_json::Value;

use crate::clients::{Dispatch, HttpMethod, HttpRequest};
use crate::connector::Connector;
use crate::rest::call::ApiCall;
use crate::rest::collection::Collection;
use crate::rest::errors::ApiError;
use crate::rest::mapper;
use crate::rest::payload::{flatten, Field};
use crate::rest::query;
use crate::rest::registry::{lookup_class, lookup_kind, ResourceDescriptor};
use crate::rest::resource::Resource;

/// Query parameter carrying the access token.
pub const OAUTH_TOKEN_PARAMETER: &str = "oauth_token";

/// A reference to a resource: its kind and id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ResourceRef {
    /// The plural kind, e.g. `tracks`.
    pub kind: &'static str,
    /// The resource id.
    pub id: u64,
}

impl ResourceRef {
    /// Creates a reference.
    #[must_use]
    pub const fn new(kind: &'static str, id: u64) -> Self {
        Self { kind, id }
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.id)
    }
}

/// The result of a call.
#[derive(Debug)]
pub enum Outcome {
    /// A single typed resource.
    Resource(Resource),
    /// A lazily paginated sequence of resources.
    Collection(Collection),
    /// JSON for a path that does not resolve to a registered kind.
    Raw(Value),
    /// A successful response without payload.
    Empty,
    /// A create that succeeded without naming a resource.
    NoResult,
    /// A GET answered with `404`.
    NotFound,
}

impl Outcome {
    /// Returns the resource, if the outcome is one.
    #[must_use]
    pub fn into_resource(self) -> Option<Resource> {
        match self {
            Self::Resource(resource) => Some(resource),
            _ => None,
        }
    }

    /// Returns the collection, if the outcome is one.
    #[must_use]
    pub fn into_collection(self) -> Option<Collection> {
        match self {
            Self::Collection(collection) => Some(collection),
            _ => None,
        }
    }

    /// Returns the raw JSON, if the outcome is one.
    #[must_use]
    pub fn into_raw(self) -> Option<Value> {
        match self {
            Self::Raw(value) => Some(value),
            _ => None,
        }
    }

    /// Returns `true` for a GET answered with `404`.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Returns `true` for a create without addressable result.
    #[must_use]
    pub const fn is_no_result(&self) -> bool {
        matches!(self, Self::NoResult)
    }
}

/// What a name resolves to on a scope.
#[derive(Clone, Debug)]
pub enum Resolved {
    /// A registered descriptor name such as `Track`.
    Binder(ResourceBinder),
    /// Any other name.
    Endpoint(Endpoint),
}

/// A connector plus the ancestry calls are addressed below.
#[derive(Clone, Debug)]
pub struct Scope {
    connector: Connector,
    ancestry: Vec<ResourceRef>,
}

impl Scope {
    /// Creates a root scope.
    #[must_use]
    pub const fn new(connector: Connector) -> Self {
        Self {
            connector,
            ancestry: Vec::new(),
        }
    }

    /// Returns the connector.
    #[must_use]
    pub const fn connector(&self) -> &Connector {
        &self.connector
    }

    /// Returns the ancestry, outermost first.
    #[must_use]
    pub fn ancestry(&self) -> &[ResourceRef] {
        &self.ancestry
    }

    /// Returns a new scope with `parent` appended to the ancestry.
    #[must_use]
    pub fn child(&self, parent: ResourceRef) -> Self {
        let mut ancestry = self.ancestry.clone();
        ancestry.push(parent);
        Self {
            connector: self.connector.clone(),
            ancestry,
        }
    }

    /// Resolves a name into a binder or an endpoint.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Resolved {
        lookup_class(name).map_or_else(
            || Resolved::Endpoint(self.endpoint(name)),
            |descriptor| Resolved::Binder(ResourceBinder::bind(self.clone(), descriptor)),
        )
    }

    /// Returns the endpoint `name` below this scope.
    #[must_use]
    pub fn endpoint(&self, name: impl Into<String>) -> Endpoint {
        Endpoint {
            scope: self.clone(),
            name: name.into(),
        }
    }

    /// Returns the binder for the descriptor `name` (e.g. `Track`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnknownResourceKind`] if `name` is not registered.
    pub fn binder(&self, name: &str) -> Result<ResourceBinder, ApiError> {
        lookup_class(name)
            .map(|descriptor| ResourceBinder::bind(self.clone(), descriptor))
            .ok_or_else(|| ApiError::UnknownResourceKind {
                name: name.to_string(),
            })
    }

    /// Issues a call below this scope and maps the response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failures, redirects outside the base
    /// path, undecodable JSON and unexpected content types.
    pub async fn call(&self, call: ApiCall) -> Result<Outcome, ApiError> {
        let prepared = call.prepare();

        let token = self.connector.credential().access_token();
        let mut query = prepared.query.clone();
        if let Some(token) = &token {
            query.set(OAUTH_TOKEN_PARAMETER, token.as_str());
        }

        let url = query::build_url(
            self.connector.config(),
            &self.ancestry,
            &prepared.method,
            &prepared.args,
            &query,
        );
        let logged_url = query::redact_access_token(&url);
        if prepared.body.is_empty() {
            tracing::debug!("Fetching url: {logged_url}, method: {}", prepared.http_method);
        } else {
            tracing::debug!("Posting url: {logged_url}, method: {}", prepared.http_method);
        }

        let request = HttpRequest::builder(prepared.http_method, url)
            .body(prepared.body)
            .build();
        let dispatch = self
            .connector
            .http()
            .execute(request, token.as_deref())
            .await?;

        let (response, redirect) = match dispatch {
            Dispatch::NotFound => return Ok(Outcome::NotFound),
            Dispatch::NoResult => return Ok(Outcome::NoResult),
            Dispatch::Completed { response, redirect } => (response, redirect),
        };

        let mut path = prepared.path;
        if let Some(location) = &redirect.final_path {
            path = self.connector.normalize_location(location)?;
            tracing::debug!("Method changed through redirect to: <{path}>");
        }
        tracing::debug!(content_type = response.content_type(), "Response received");

        let origin = mapper::Origin {
            scope: self,
            call: &call,
            path: &path,
            redirected: redirect.final_path.is_some(),
        };
        mapper::map_response(&origin, &response)
    }

    /// Appends the current access token to an arbitrary URL.
    ///
    /// Without a token the URL is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if `url` is not an absolute URL.
    pub fn oauth_sign_get_request(&self, url: &str) -> Result<String, ApiError> {
        match self.connector.credential().access_token() {
            Some(token) => query::oauth_sign_get_request(url, &token).map_err(invalid_url(url)),
            None => Ok(url.to_string()),
        }
    }

    /// Appends a secret token and the client id to an arbitrary URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if `url` is not an absolute URL.
    pub fn add_secret_token(&self, url: &str, secret_token: &str) -> Result<String, ApiError> {
        query::add_secret_token(
            url,
            secret_token,
            self.connector.credential().client_id().as_ref(),
        )
        .map_err(invalid_url(url))
    }

    /// Appends the client id to an arbitrary URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if `url` is not an absolute URL.
    pub fn add_client_id(&self, url: &str) -> Result<String, ApiError> {
        query::add_client_id(url, self.connector.credential().client_id().as_ref())
            .map_err(invalid_url(url))
    }
}

fn invalid_url(url: &str) -> impl FnOnce(url::ParseError) -> ApiError + '_ {
    move |source| ApiError::InvalidUrl {
        url: url.to_string(),
        source,
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = self.ancestry.len().saturating_sub(2);
        match &self.ancestry[start..] {
            [prev, last] => write!(f, "{prev}/{last}"),
            [last] => write!(f, "/{last}"),
            _ => f.write_str("/"),
        }
    }
}

/// A resource, or a raw id, to add to or remove from a collection endpoint.
#[derive(Clone, Debug)]
pub enum Member<'a> {
    /// A resource; its id is used.
    Resource(&'a Resource),
    /// A raw id.
    Id(String),
}

impl Member<'_> {
    fn id(&self) -> Result<String, ApiError> {
        match self {
            Self::Resource(resource) => resource
                .id()
                .map(|id| id.to_string())
                .ok_or(ApiError::MissingId {
                    kind: resource.kind(),
                }),
            Self::Id(id) => Ok(id.clone()),
        }
    }
}

impl<'a> From<&'a Resource> for Member<'a> {
    fn from(resource: &'a Resource) -> Self {
        Self::Resource(resource)
    }
}

impl From<u64> for Member<'_> {
    fn from(id: u64) -> Self {
        Self::Id(id.to_string())
    }
}

impl From<&str> for Member<'_> {
    fn from(id: &str) -> Self {
        Self::Id(id.to_string())
    }
}

impl From<String> for Member<'_> {
    fn from(id: String) -> Self {
        Self::Id(id)
    }
}

/// A named method below a scope, e.g. `tracks` or `favorites`.
#[derive(Clone, Debug)]
pub struct Endpoint {
    scope: Scope,
    name: String,
}

impl Endpoint {
    /// Returns the method name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the scope the endpoint lives in.
    #[must_use]
    pub const fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Starts a call to this endpoint, to be customized and passed to
    /// [`send`](Self::send).
    #[must_use]
    pub fn request(&self) -> ApiCall {
        ApiCall::new(self.name.clone())
    }

    /// Sends a call built with [`request`](Self::request).
    ///
    /// # Errors
    ///
    /// See [`Scope::call`].
    pub async fn send(&self, call: ApiCall) -> Result<Outcome, ApiError> {
        self.scope.call(call).await
    }

    /// GETs the endpoint.
    ///
    /// # Errors
    ///
    /// See [`Scope::call`].
    pub async fn fetch(&self) -> Result<Outcome, ApiError> {
        self.send(self.request()).await
    }

    /// Calls the endpoint with positional path arguments.
    ///
    /// # Errors
    ///
    /// See [`Scope::call`].
    pub async fn call<I, A>(&self, args: I) -> Result<Outcome, ApiError>
    where
        I: IntoIterator<Item = A>,
        A: ToString,
    {
        let call = args.into_iter().fold(self.request(), ApiCall::arg);
        self.send(call).await
    }

    /// PUTs a member into this collection endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingId`] for a resource without id, otherwise
    /// see [`Scope::call`].
    pub async fn append<'m>(&self, member: impl Into<Member<'m>>) -> Result<Outcome, ApiError> {
        let id = member.into().id()?;
        self.send(self.request().arg(id).http_method(HttpMethod::Put))
            .await
    }

    /// DELETEs a member from this collection endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingId`] for a resource without id, otherwise
    /// see [`Scope::call`].
    pub async fn remove<'m>(&self, member: impl Into<Member<'m>>) -> Result<Outcome, ApiError> {
        let id = member.into().id()?;
        self.send(self.request().arg(id).http_method(HttpMethod::Delete))
            .await
    }

    /// Creates a resource of this endpoint's kind below the scope.
    ///
    /// Only endpoints named after a registered kind or alias can create.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnknownResourceKind`] for other endpoints,
    /// otherwise see [`ResourceBinder::new`].
    pub async fn new<I, K, V>(&self, fields: I) -> Result<Outcome, ApiError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Field>,
    {
        let descriptor = lookup_kind(&self.name).ok_or_else(|| ApiError::UnknownResourceKind {
            name: self.name.clone(),
        })?;
        ResourceBinder::bind(self.scope.clone(), descriptor)
            .new(fields)
            .await
    }
}

/// Creation and lookup of one resource kind below a scope.
#[derive(Clone, Debug)]
pub struct ResourceBinder {
    scope: Scope,
    descriptor: &'static ResourceDescriptor,
}

impl ResourceBinder {
    pub(crate) const fn bind(scope: Scope, descriptor: &'static ResourceDescriptor) -> Self {
        Self { scope, descriptor }
    }

    /// Returns the bound kind.
    #[must_use]
    pub const fn descriptor(&self) -> &'static ResourceDescriptor {
        self.descriptor
    }

    /// POSTs a new resource; fields are flattened under the kind's singular.
    ///
    /// ```rust,ignore
    /// scope.binder("Track")?.new([
    ///     ("title", Field::from("demo")),
    ///     ("asset_data", Field::from(Upload::file("demo.mp3"))),
    /// ]).await?;
    /// // POST tracks/ with track[title]=demo and a streamed track[asset_data]
    /// ```
    ///
    /// # Errors
    ///
    /// See [`Scope::call`].
    pub async fn new<I, K, V>(&self, fields: I) -> Result<Outcome, ApiError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Field>,
    {
        let body = flatten(self.descriptor.singular, fields);
        self.scope
            .call(ApiCall::new(self.descriptor.kind).body(body))
            .await
    }

    /// Builds an in-memory resource without any request, for use as a
    /// relation value.
    ///
    /// Non-object values produce a resource without fields.
    #[must_use]
    pub fn create(&self, fields: Value) -> Resource {
        let fields = match fields {
            Value::Object(map) => map,
            other => {
                tracing::warn!(kind = self.descriptor.kind, value = %other, "Ignoring non-object fields");
                serde_json::Map::new()
            }
        };
        Resource::from_fields(self.descriptor, fields, self.scope.clone(), None)
    }

    /// GETs a resource by id.
    ///
    /// # Errors
    ///
    /// See [`Scope::call`].
    pub async fn get(&self, id: impl ToString) -> Result<Outcome, ApiError> {
        self.scope
            .call(ApiCall::new(self.descriptor.kind).arg(id))
            .await
    }
}
