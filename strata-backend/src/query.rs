//! Backend-agnostic query descriptors.
//!
//! A [`Query`] accumulates filters, sort order, and pagination limits, then
//! hands the full descriptor to the resolved adapter's `find`. No matching
//! logic lives here: operator semantics are entirely the adapter's
//! responsibility.

use crate::adapter::{BackendAdapter, QueryResult};
use crate::error::BackendResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use strata_model::DataObject;

/// Comparison operators a filter can carry. Adapters must honor at least
/// `Equals` and `GreaterOrEquals`; support for the rest may vary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    Equals,
    NotEquals,
    Greater,
    GreaterOrEquals,
    Lower,
    LowerOrEquals,
    Contains,
}

/// One `{prop, operator, value}` filter triple.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub prop: String,
    pub operator: FilterOperator,
    pub value: Value,
}

impl Filter {
    pub fn new(prop: impl Into<String>, value: impl Into<Value>, operator: FilterOperator) -> Self {
        Self {
            prop: prop.into(),
            operator,
            value: value.into(),
        }
    }

    /// Equality filter, the default operator.
    pub fn equals(prop: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(prop, value, FilterOperator::Equals)
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// One sort instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sorting {
    pub prop: String,
    pub order: SortOrder,
}

/// Pagination bounds: `batch` is the page size (0 = unbounded), `offset` the
/// number of matches to skip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Limits {
    pub batch: usize,
    pub offset: usize,
}

/// Sort order plus pagination limits for a `find` call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortAndLimit {
    pub sortings: Vec<Sorting>,
    pub limits: Limits,
}

impl SortAndLimit {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Chainable query builder bound to a target record shape and an adapter.
pub struct Query {
    template: DataObject,
    backend: Arc<dyn BackendAdapter>,
    filters: Vec<Filter>,
    sort_and_limit: SortAndLimit,
}

impl Query {
    pub fn new(template: DataObject, backend: Arc<dyn BackendAdapter>) -> Self {
        Self {
            template,
            backend,
            filters: Vec::new(),
            sort_and_limit: SortAndLimit::new(),
        }
    }

    /// Adds an equality filter.
    pub fn where_eq(self, prop: impl Into<String>, value: impl Into<Value>) -> Self {
        self.where_op(prop, value, FilterOperator::Equals)
    }

    /// Adds a filter with an explicit operator.
    pub fn where_op(
        mut self,
        prop: impl Into<String>,
        value: impl Into<Value>,
        operator: FilterOperator,
    ) -> Self {
        self.filters.push(Filter::new(prop, value, operator));
        self
    }

    /// Adds a sort instruction.
    pub fn sort(mut self, prop: impl Into<String>, order: SortOrder) -> Self {
        self.sort_and_limit.sortings.push(Sorting {
            prop: prop.into(),
            order,
        });
        self
    }

    /// Caps the number of returned items.
    pub fn batch(mut self, batch: usize) -> Self {
        self.sort_and_limit.limits.batch = batch;
        self
    }

    /// Skips the first `offset` matches.
    pub fn offset(mut self, offset: usize) -> Self {
        self.sort_and_limit.limits.offset = offset;
        self
    }

    pub fn template(&self) -> &DataObject {
        &self.template
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn sort_and_limit(&self) -> &SortAndLimit {
        &self.sort_and_limit
    }

    /// Passes the accumulated descriptor to the adapter's `find`.
    pub async fn execute(&self) -> BackendResult<QueryResult> {
        self.backend
            .find(&self.template, &self.filters, &self.sort_and_limit)
            .await
    }
}
