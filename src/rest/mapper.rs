//! Response mapping: content-type checks, kind resolution and pagination.
//!
//! The mapper walks the (possibly redirect-corrected) path from its last
//! segment backwards. The first segment naming a registered kind or alias
//! decides how the JSON is typed; segments passed on the way provide the id
//! hint for payloads that omit their own id.

use serde_json::{Map, Value};
use url::Url;

use crate::clients::HttpResponse;
use crate::rest::call::{ApiCall, LINKED_PARTITIONING_PARAMETER, PAGE_SIZE};
use crate::rest::collection::{Collection, Continuation};
use crate::rest::errors::ApiError;
use crate::rest::query::parse_query;
use crate::rest::registry::{lookup_kind, ResourceDescriptor};
use crate::rest::resource::Resource;
use crate::rest::scope::{Outcome, Scope, OAUTH_TOKEN_PARAMETER};

/// Field carrying the next page's URL in linked-partitioning responses.
pub const NEXT_PARTITION_FIELD: &str = "next_partition_href";

/// Field carrying the items in linked-partitioning responses.
pub const COLLECTION_FIELD: &str = "collection";

/// Where and how a response was obtained.
pub(crate) struct Origin<'a> {
    /// The scope that issued the call.
    pub scope: &'a Scope,
    /// The call as issued by the caller.
    pub call: &'a ApiCall,
    /// The path the response belongs to, relative to the scope, or to the
    /// base path when `redirected` is set.
    pub path: &'a str,
    /// Whether `path` came from a redirect location.
    pub redirected: bool,
}

pub(crate) fn map_response(origin: &Origin<'_>, response: &HttpResponse) -> Result<Outcome, ApiError> {
    if !response.is_json() {
        if response.body.trim().len() <= 1 {
            return Ok(Outcome::Empty);
        }
        return Err(ApiError::UnexpectedContentType {
            content_type: response.content_type().to_string(),
            body: response.body.clone(),
        });
    }

    let body = response.body.trim();
    let body = if body.is_empty() { "{}" } else { body };
    let value: Value = serde_json::from_str(body).map_err(|source| {
        tracing::error!(body = %body, "Couldn't decode returned json");
        ApiError::MalformedPayload {
            body: body.to_string(),
            source,
        }
    })?;

    Ok(map_value(origin, value))
}

fn map_value(origin: &Origin<'_>, value: Value) -> Outcome {
    let segments: Vec<&str> = origin.path.split('/').collect();

    for (position, segment) in segments.iter().enumerate().rev() {
        let Some(descriptor) = lookup_kind(segment) else {
            continue;
        };
        let id_hint = segments.last().and_then(|s| s.parse::<u64>().ok());

        return match value {
            Value::Array(items) => {
                let batch = type_items(origin.scope, descriptor, items, id_hint);
                let continuation = (batch.len() as u64 == PAGE_SIZE
                    && !origin.call.is_linked_partitioning())
                .then(|| Continuation::Offset(origin.call.next_page()));
                Outcome::Collection(Collection::new(
                    origin.scope.clone(),
                    batch,
                    continuation,
                    None,
                ))
            }
            Value::Object(mut map)
                if origin.call.is_linked_partitioning()
                    && map.get(COLLECTION_FIELD).is_some_and(Value::is_array) =>
            {
                let cursor = map
                    .get(NEXT_PARTITION_FIELD)
                    .and_then(Value::as_str)
                    .map(str::to_string);
                let items = match map.remove(COLLECTION_FIELD) {
                    Some(Value::Array(items)) => items,
                    _ => Vec::new(),
                };
                let batch = type_items(origin.scope, descriptor, items, id_hint);
                let continuation_scope = if origin.redirected {
                    origin.scope.connector().root_scope()
                } else {
                    origin.scope.clone()
                };
                let continuation = cursor.as_deref().and_then(|cursor| {
                    let call = if origin.redirected {
                        call_for_segments(&segments[..=position])
                    } else {
                        origin.call.clone()
                    };
                    partition_call(&call, cursor).map(Continuation::Partition)
                });
                Outcome::Collection(Collection::new(
                    continuation_scope,
                    batch,
                    continuation,
                    cursor,
                ))
            }
            Value::Object(map) => Outcome::Resource(Resource::from_fields(
                descriptor,
                map,
                origin.scope.clone(),
                id_hint,
            )),
            other => Outcome::Raw(other),
        };
    }

    tracing::debug!(path = origin.path, "Don't know how to handle result");
    Outcome::Raw(value)
}

fn type_items(
    scope: &Scope,
    descriptor: &'static ResourceDescriptor,
    items: Vec<Value>,
    id_hint: Option<u64>,
) -> Vec<Resource> {
    items
        .into_iter()
        .map(|item| {
            let fields = match item {
                Value::Object(map) => map,
                other => {
                    tracing::warn!(kind = descriptor.kind, item = %other, "Collection item is not an object");
                    Map::new()
                }
            };
            Resource::from_fields(descriptor, fields, scope.clone(), id_hint)
        })
        .collect()
}

/// Rebuilds a call from the path segments of a redirect location.
fn call_for_segments(segments: &[&str]) -> ApiCall {
    let Some((method, args)) = segments.split_first() else {
        return ApiCall::new("");
    };
    args.iter().fold(ApiCall::new(*method), |call, arg| call.arg(arg))
}

/// Builds the call fetching the partition a cursor URL points to.
///
/// The cursor's query is replayed against the method and arguments of
/// `call`; its access token is dropped so the current one is used. An
/// unparseable cursor ends the sequence.
fn partition_call(call: &ApiCall, cursor: &str) -> Option<ApiCall> {
    let url = match Url::parse(cursor) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!(cursor, error = %e, "Ignoring unparseable partition cursor");
            return None;
        }
    };
    let mut query = parse_query(url.query().unwrap_or_default());
    query.remove(OAUTH_TOKEN_PARAMETER);
    query.set(LINKED_PARTITIONING_PARAMETER, "1");
    Some(call.with_query(query))
}
