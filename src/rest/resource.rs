//! Typed resources.
//!
//! A [`Resource`] wraps the JSON object the API returned for one entity,
//! together with its [`ResourceDescriptor`] and the [`Scope`] that produced
//! it. Field reads are local; writes are explicit network calls that leave
//! the in-memory snapshot untouched.
//!
//! # Example
//!
//! ```rust,ignore
//! use soundcloud_api::rest::{Attribute, Relation};
//!
//! let track = root.binder("Track")?.get(123).await?.into_resource().unwrap();
//!
//! // Field access
//! if let Attribute::Value(title) = track.attr("title")? {
//!     println!("{title}");
//! }
//!
//! // PUT tracks/123 with track[title]=renamed
//! track.update("title", "renamed").await?;
//!
//! // PUT tracks/123/comments with comment[body]=...
//! let comment = root.binder("Comment")?.create(json!({"body": "nice", "timestamp": 10}));
//! track.set_relation("comments", Relation::One(&comment)).await?;
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};

use serde_json::{Map, Value};

use crate::clients::{HttpMethod, Params};
use crate::rest::call::ApiCall;
use crate::rest::errors::ApiError;
use crate::rest::payload::{flatten, Field};
use crate::rest::registry::{lookup_kind, ResourceDescriptor, TRACK};
use crate::rest::scope::{Endpoint, Outcome, Resolved, ResourceRef, Scope};

/// The result of reading a name on a resource.
#[derive(Debug)]
pub enum Attribute {
    /// A plain field value.
    Value(Value),
    /// A nested object of a registered kind.
    Resource(Resource),
    /// A nested array of a registered kind.
    Resources(Vec<Resource>),
    /// No such field: the name resolved on the resource's child scope.
    Scoped(Resolved),
}

/// A value to assign to a relation of a resource.
#[derive(Clone, Copy, Debug)]
pub enum Relation<'a> {
    /// A single resource, sent with all of its fields.
    One(&'a Resource),
    /// Several resources, sent by id.
    Many(&'a [Resource]),
}

/// A typed API entity.
#[derive(Clone)]
pub struct Resource {
    descriptor: &'static ResourceDescriptor,
    fields: Map<String, Value>,
    scope: Scope,
}

impl Resource {
    /// Wraps `fields`, adding `id_hint` as id when the payload has none.
    pub(crate) fn from_fields(
        descriptor: &'static ResourceDescriptor,
        mut fields: Map<String, Value>,
        scope: Scope,
        id_hint: Option<u64>,
    ) -> Self {
        if let Some(id) = id_hint {
            fields.entry("id").or_insert_with(|| Value::from(id));
        }
        Self {
            descriptor,
            fields,
            scope,
        }
    }

    /// Returns the kind descriptor.
    #[must_use]
    pub const fn descriptor(&self) -> &'static ResourceDescriptor {
        self.descriptor
    }

    /// Returns the plural kind, e.g. `tracks`.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        self.descriptor.kind
    }

    /// Returns the id, from a numeric or numeric-string `id` field.
    #[must_use]
    pub fn id(&self) -> Option<u64> {
        match self.fields.get("id")? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Returns the `(kind, id)` reference, if the resource has an id.
    #[must_use]
    pub fn reference(&self) -> Option<ResourceRef> {
        self.id().map(|id| ResourceRef::new(self.kind(), id))
    }

    /// Returns all fields.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Returns one field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Returns the scope that produced the resource.
    #[must_use]
    pub const fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Returns the scope rooted at this resource.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingId`] if the resource has no id.
    pub fn child_scope(&self) -> Result<Scope, ApiError> {
        let reference = self.reference().ok_or(ApiError::MissingId { kind: self.kind() })?;
        Ok(self.scope.child(reference))
    }

    /// Returns the endpoint `name` below this resource.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingId`] if the resource has no id.
    pub fn endpoint(&self, name: &str) -> Result<Endpoint, ApiError> {
        Ok(self.child_scope()?.endpoint(name))
    }

    /// Reads a name.
    ///
    /// Present fields are returned as values, typed as resources when the
    /// name is a registered kind or alias. Absent names resolve on the child
    /// scope, so `attr("tracks")` on a user without a `tracks` field yields
    /// the endpoint `users/{id}/tracks`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingId`] if the name is absent and the resource
    /// has no id.
    pub fn attr(&self, name: &str) -> Result<Attribute, ApiError> {
        let Some(value) = self.fields.get(name) else {
            return Ok(Attribute::Scoped(self.child_scope()?.resolve(name)));
        };
        let Some(descriptor) = lookup_kind(name) else {
            return Ok(Attribute::Value(value.clone()));
        };

        Ok(match value {
            Value::Object(map) => Attribute::Resource(Self::from_fields(
                descriptor,
                map.clone(),
                self.scope.clone(),
                None,
            )),
            Value::Array(items) => Attribute::Resources(
                items
                    .iter()
                    .filter_map(Value::as_object)
                    .map(|map| Self::from_fields(descriptor, map.clone(), self.scope.clone(), None))
                    .collect(),
            ),
            other => {
                tracing::warn!(
                    field = name,
                    kind = descriptor.kind,
                    "Found {name} in the registry, but don't know what to do with the value"
                );
                Attribute::Value(other.clone())
            }
        })
    }

    /// Sets one field on the server: PUT `{kind}/{id}` with `singular[name]`.
    ///
    /// Setting `secret_token` on a track resets its secret token instead.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingId`] if the resource has no id, otherwise
    /// see [`Scope::call`].
    pub async fn update(&self, name: &str, value: impl Into<Field>) -> Result<Outcome, ApiError> {
        let id = self.id().ok_or(ApiError::MissingId { kind: self.kind() })?;
        let body = flatten(self.descriptor.singular, [(name, value.into())]);
        let call = ApiCall::new(self.kind())
            .arg(id)
            .body(body)
            .http_method(HttpMethod::Put);
        self.scope.call(call).await
    }

    /// Assigns a relation on the server.
    ///
    /// - [`Relation::One`]: PUT `{kind}/{id}/{name}` with the related
    ///   resource's fields under its singular.
    /// - [`Relation::Many`]: PUT `{kind}/{id}/{name}` with the repeated
    ///   parameter `name[<singular>_id][]`. An empty slice sends nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingId`] if this resource, or any resource of a
    /// `Many` relation, has no id; otherwise see [`Scope::call`].
    pub async fn set_relation(&self, name: &str, relation: Relation<'_>) -> Result<Outcome, ApiError> {
        let id = self.id().ok_or(ApiError::MissingId { kind: self.kind() })?;

        let body = match relation {
            Relation::One(resource) => resource.as_arguments(),
            Relation::Many([]) => return Ok(Outcome::Empty),
            Relation::Many(resources) => {
                let key = format!("{name}[{}_id][]", resources[0].descriptor.singular);
                let ids = resources
                    .iter()
                    .map(|r| r.id().ok_or(ApiError::MissingId { kind: r.kind() }))
                    .collect::<Result<Vec<_>, _>>()?;
                let mut body = Params::new();
                body.push_list(key, ids);
                body
            }
        };

        let call = ApiCall::new(self.kind())
            .arg(id)
            .arg(name)
            .body(body)
            .http_method(HttpMethod::Put);
        self.scope.call(call).await
    }

    /// Returns every field as `singular[key]` parameters, nested values
    /// flattened and `null`s skipped.
    #[must_use]
    pub fn as_arguments(&self) -> Params {
        flatten(
            self.descriptor.singular,
            self.fields
                .iter()
                .filter_map(|(k, v)| Field::from_json(v).map(|f| (k.as_str(), f))),
        )
    }

    /// Returns the signed download URL of a track.
    ///
    /// Public downloadable tracks are signed with the client id, private
    /// downloadable tracks with their secret token and the client id, all
    /// others with the access token. `None` for non-tracks and tracks without
    /// `download_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if `download_url` is not an absolute
    /// URL.
    pub fn secret_download_url(&self) -> Result<Option<String>, ApiError> {
        if self.descriptor != &TRACK {
            return Ok(None);
        }
        let Some(url) = self.fields.get("download_url").and_then(Value::as_str) else {
            return Ok(None);
        };
        let downloadable = match self.fields.get("downloadable") {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s == "true",
            _ => false,
        };
        let sharing = self.fields.get("sharing").and_then(Value::as_str);
        let secret_token = self.fields.get("secret_token").and_then(Value::as_str);

        let signed = match (sharing, downloadable, secret_token) {
            (Some("public"), true, _) => self.scope.add_client_id(url),
            (Some("private"), true, Some(token)) => self.scope.add_secret_token(url, token),
            _ => self.scope.oauth_sign_get_request(url),
        }?;
        Ok(Some(signed))
    }

    /// Resolves the signed download URL of a track to its temporary URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if `download_url` is not an absolute
    /// URL and [`ApiError::Http`] on transport failures.
    pub async fn temporary_download_url(&self) -> Result<Option<String>, ApiError> {
        match self.secret_download_url()? {
            Some(url) => Ok(Some(
                self.scope.connector().temporary_download_url(&url).await?,
            )),
            None => Ok(None),
        }
    }
}

/// Resources with an id are equal when kind and id match. Id-less resources
/// are equal only to id-less resources of the same kind with the same fields.
impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        if self.kind() != other.kind() {
            return false;
        }
        match (self.id(), other.id()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => self.fields == other.fields,
            _ => false,
        }
    }
}

impl Eq for Resource {}

impl Hash for Resource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        self.id().hash(state);
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(self.descriptor.name)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.descriptor.name)?;
        for (key, value) in &self.fields {
            write!(f, " {key}={value}")?;
        }
        f.write_str(">")
    }
}
