//! Lazily paginated result sequences.

use std::collections::VecDeque;

use crate::rest::call::ApiCall;
use crate::rest::errors::ApiError;
use crate::rest::resource::Resource;
use crate::rest::scope::{Outcome, Scope};

/// The call producing the next page of a [`Collection`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Continuation {
    /// The originating call with its offset advanced by one page.
    Offset(ApiCall),
    /// The originating method replayed with a server-supplied cursor.
    Partition(ApiCall),
}

impl Continuation {
    /// Returns the call to issue.
    #[must_use]
    pub const fn call(&self) -> &ApiCall {
        match self {
            Self::Offset(call) | Self::Partition(call) => call,
        }
    }

    /// Consumes the continuation, returning the call to issue.
    #[must_use]
    pub fn into_call(self) -> ApiCall {
        match self {
            Self::Offset(call) | Self::Partition(call) => call,
        }
    }
}

/// A sequence of resources fetched page by page as it is drained.
///
/// Each page is requested only once the previous one has been consumed.
/// Nothing is cached: calling the originating endpoint again re-issues every
/// request.
///
/// # Example
///
/// ```rust,ignore
/// let mut tracks = scope.endpoint("tracks").fetch().await?.into_collection().unwrap();
/// while let Some(track) = tracks.next().await? {
///     println!("{}", track.field("title").unwrap_or(&Value::Null));
/// }
/// ```
#[derive(Debug)]
pub struct Collection {
    scope: Scope,
    batch: VecDeque<Resource>,
    continuation: Option<Continuation>,
    partition_cursor: Option<String>,
}

impl Collection {
    pub(crate) fn new(
        scope: Scope,
        batch: Vec<Resource>,
        continuation: Option<Continuation>,
        partition_cursor: Option<String>,
    ) -> Self {
        Self {
            scope,
            batch: batch.into(),
            continuation,
            partition_cursor,
        }
    }

    /// Returns the not yet consumed part of the current page.
    #[must_use]
    pub const fn current_batch(&self) -> &VecDeque<Resource> {
        &self.batch
    }

    /// Returns the call that will fetch the next page, if any.
    #[must_use]
    pub const fn continuation(&self) -> Option<&Continuation> {
        self.continuation.as_ref()
    }

    /// Returns the server-supplied cursor of the next partition, if any.
    #[must_use]
    pub fn partition_cursor(&self) -> Option<&str> {
        self.partition_cursor.as_deref()
    }

    /// Returns `true` if items remain in this page or a next page exists.
    #[must_use]
    pub fn has_more(&self) -> bool {
        !self.batch.is_empty() || self.continuation.is_some()
    }

    /// Returns the next resource, fetching the next page when the current one
    /// is drained.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if fetching a continuation page fails. The
    /// collection is exhausted afterwards.
    pub async fn next(&mut self) -> Result<Option<Resource>, ApiError> {
        loop {
            if let Some(resource) = self.batch.pop_front() {
                return Ok(Some(resource));
            }
            let Some(continuation) = self.continuation.take() else {
                return Ok(None);
            };
            tracing::debug!(?continuation, "Fetching next page");

            match self.scope.call(continuation.into_call()).await? {
                Outcome::Collection(next) => *self = next,
                other => {
                    tracing::debug!(?other, "Continuation returned no collection");
                    self.partition_cursor = None;
                    return Ok(None);
                }
            }
        }
    }

    /// Drains every remaining page.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if fetching any page fails.
    pub async fn collect_all(mut self) -> Result<Vec<Resource>, ApiError> {
        let mut resources = Vec::new();
        while let Some(resource) = self.next().await? {
            resources.push(resource);
        }
        Ok(resources)
    }
}
