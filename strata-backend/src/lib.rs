//! Backend persistence protocol for Strata records.
//!
//! Everything a storage adapter and its callers share:
//! - [`BackendAdapter`] — the async create/read/update/delete/find contract
//! - [`BackendRegistry`] — explicit alias → adapter resolution, with
//!   process-wide convenience accessors for the composition layer
//! - [`Query`] / [`Filter`] / [`SortAndLimit`] — the backend-agnostic query
//!   descriptor and its builder
//! - [`PersistedObject`] — a record bound to its adapter, owning the
//!   transient → persisted → deleted state machine
//! - [`Model`] — the business-object facade (factory, from_object,
//!   from_backend, query)
//! - [`MockAdapter`] — the in-memory reference adapter
//!
//! Adapters for real backends (SQL, document stores, BaaS providers) live in
//! their own crates and implement [`BackendAdapter`]; the core never links
//! against vendor SDKs.

mod adapter;
mod error;
mod mock;
mod model;
mod persisted;
mod query;
mod registry;

pub use adapter::{BackendAdapter, QueryMeta, QueryResult};
pub use error::{BackendError, BackendResult};
pub use mock::MockAdapter;
pub use model::{Model, ModelSource};
pub use persisted::PersistedObject;
pub use query::{Filter, FilterOperator, Limits, Query, SortAndLimit, SortOrder, Sorting};
pub use registry::{add_backend, get_backend, get_default_backend, BackendRegistry};
