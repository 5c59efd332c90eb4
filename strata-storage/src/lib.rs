//! File storage layer for Strata.
//!
//! Defines the provider-agnostic contract for file CRUD and URL issuance:
//! - [`StorageAdapter`] — upload/download/delete/get_url/list
//! - [`StorageRegistry`] — explicit alias → adapter resolution, with
//!   process-wide convenience accessors for the composition layer
//! - [`MockStorageAdapter`] — the in-memory reference store
//!
//! Records reference stored files by path only; nothing here touches the
//! record model.

mod adapter;
mod error;
mod mock;
mod registry;

pub use adapter::{FileMetadata, StorageAdapter};
pub use error::{StorageError, StorageResult};
pub use mock::MockStorageAdapter;
pub use registry::{add_storage, get_default_storage, get_storage, StorageRegistry};
