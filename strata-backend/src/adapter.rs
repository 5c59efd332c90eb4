//! The contract every storage adapter implements.

use crate::error::BackendResult;
use crate::query::{Filter, SortAndLimit};
use async_trait::async_trait;
use strata_model::DataObject;

/// Pagination echo and match count returned alongside query items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryMeta {
    /// The requested page size (0 = unbounded).
    pub batch: usize,
    /// The requested skip count.
    pub offset: usize,
    /// Total matches before pagination was applied.
    pub count: usize,
}

/// Result shape every adapter's `find` must return.
#[derive(Debug, Default)]
pub struct QueryResult {
    pub items: Vec<DataObject>,
    pub meta: QueryMeta,
}

/// Abstract storage backend interface.
///
/// Adapters persist [`DataObject`]s addressed by their `collection/id` path
/// and answer filtered queries. Wire shape for a stored record is the
/// record's JSON plus a `uid` field carrying the full path.
///
/// With `limits.batch = N`, `find` must return at most `N` items: the bound
/// is checked before appending a candidate, never after.
#[async_trait]
pub trait BackendAdapter: Send + Sync {
    /// Whether deletions flip the record status instead of removing it.
    fn soft_delete(&self) -> bool {
        false
    }

    /// Persists a new record, assigning an id (or adopting `desired_id`)
    /// when the record has none.
    async fn create(&self, dao: &mut DataObject, desired_id: Option<String>) -> BackendResult<()>;

    /// Populates the record from the stored data at its identity.
    /// Fails with `NotFound` when no record exists there.
    async fn read(&self, dao: &mut DataObject) -> BackendResult<()>;

    /// Overwrites the stored record at the record's identity.
    async fn update(&self, dao: &mut DataObject) -> BackendResult<()>;

    /// Removes the stored record. Identity bookkeeping on the in-memory
    /// record is the caller's concern.
    async fn delete(&self, dao: &mut DataObject) -> BackendResult<()>;

    /// Returns the records of the template's collection matching `filters`,
    /// sorted and paginated per `sort_and_limit`.
    async fn find(
        &self,
        template: &DataObject,
        filters: &[Filter],
        sort_and_limit: &SortAndLimit,
    ) -> BackendResult<QueryResult>;
}
