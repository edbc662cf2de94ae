//! Scoped resource access.
//!
//! This module is the engine that turns name-based access into HTTP calls
//! and responses into typed values:
//!
//! - **[`Scope`]**: an addressing context (connector plus ancestry) that
//!   resolves names into [`Endpoint`]s and [`ResourceBinder`]s
//! - **[`ApiCall`]**: plain data describing one logical call
//! - **URL building**: [`build_url`] and the signing helpers
//! - **Mapping**: JSON becomes a [`Resource`], a lazily paginated
//!   [`Collection`] or raw passthrough, according to the [`registry`]
//! - **[`ApiError`]**: failures to address or interpret
//!
//! # Example
//!
//! ```rust,ignore
//! use soundcloud_api::rest::{Attribute, Outcome, Resolved};
//!
//! let root = connector.root_scope();
//!
//! let me = root.endpoint("me").fetch().await?.into_resource().unwrap();
//! if let Attribute::Scoped(Resolved::Endpoint(tracks)) = me.attr("tracks")? {
//!     let all = tracks.fetch().await?.into_collection().unwrap().collect_all().await?;
//!     println!("{} tracks", all.len());
//! }
//!
//! match root.binder("Track")?.get(404).await? {
//!     Outcome::NotFound => println!("gone"),
//!     outcome => println!("{outcome:?}"),
//! }
//! ```
//!
//! # Pagination
//!
//! List responses of exactly [`PAGE_SIZE`] items continue with the next
//! `offset`. Calls that ask for `linked_partitioning=1` instead follow the
//! server's `next_partition_href` cursor. The two are never combined.

mod call;
mod collection;
mod errors;
mod mapper;
mod payload;
mod query;
mod resource;
mod scope;

pub mod registry;

pub use call::{
    ApiCall, PreparedCall, LIMIT_PARAMETER, LINKED_PARTITIONING_PARAMETER, OFFSET_PARAMETER,
    PAGE_SIZE, SECRET_TOKEN_FIELD, SECRET_TOKEN_SEGMENT,
};
pub use collection::{Collection, Continuation};
pub use errors::ApiError;
pub use mapper::{COLLECTION_FIELD, NEXT_PARTITION_FIELD};
pub use payload::{flatten, Field};
pub use query::{
    add_client_id, add_secret_token, append_query, build_url, create_query_string,
    oauth_sign_get_request, parse_query, redact_access_token,
};
pub use resource::{Attribute, Relation, Resource};
pub use scope::{
    Endpoint, Member, Outcome, Resolved, ResourceBinder, ResourceRef, Scope,
    OAUTH_TOKEN_PARAMETER,
};
