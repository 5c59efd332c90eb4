//! In-memory reference adapter.
//!
//! Backs records with a map keyed by `uid` path, the minimum wire shape
//! every key-value backend shares. State is per-instance, so parallel tests
//! never contaminate each other through fixtures.

use crate::adapter::{BackendAdapter, QueryMeta, QueryResult};
use crate::error::{BackendError, BackendResult};
use crate::query::{Filter, FilterOperator, SortAndLimit, SortOrder};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use strata_model::{DataObject, ObjectUri};
use tracing::debug;
use uuid::Uuid;

/// In-memory backend adapter for tests and fixtures.
#[derive(Default)]
pub struct MockAdapter {
    fixtures: RwLock<HashMap<String, Map<String, Value>>>,
    soft_delete: bool,
}

impl MockAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// An adapter whose deletions flip the record status instead of
    /// removing the fixture.
    pub fn soft_deleting() -> Self {
        Self {
            fixtures: RwLock::new(HashMap::new()),
            soft_delete: true,
        }
    }

    /// Seeds a fixture record. The record must carry a `uid` path.
    pub fn inject(&self, record: Map<String, Value>) -> BackendResult<()> {
        let uid = match record.get("uid") {
            Some(Value::String(uid)) if !uid.is_empty() => uid.clone(),
            _ => {
                return Err(BackendError::Adapter(
                    "can't inject data without uid".to_string(),
                ))
            }
        };
        self.fixtures.write().insert(uid, record);
        Ok(())
    }

    /// The fixture stored at `path`, if any.
    pub fn fixture(&self, path: &str) -> Option<Map<String, Value>> {
        self.fixtures.read().get(path).cloned()
    }

    pub fn fixture_count(&self) -> usize {
        self.fixtures.read().len()
    }

    pub fn clear(&self) {
        self.fixtures.write().clear();
    }

    fn record_for(dao: &DataObject, path: &str) -> Map<String, Value> {
        let mut record = match dao.to_json(true) {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        record.insert("uid".to_string(), Value::String(path.to_string()));
        record
    }
}

#[async_trait]
impl BackendAdapter for MockAdapter {
    fn soft_delete(&self) -> bool {
        self.soft_delete
    }

    async fn create(&self, dao: &mut DataObject, desired_id: Option<String>) -> BackendResult<()> {
        if dao.uri().collection().is_empty() {
            return Err(BackendError::MissingIdentity(
                "create requires a collection".to_string(),
            ));
        }
        let id = desired_id.unwrap_or_else(|| Uuid::now_v7().to_string());
        dao.uri_mut().set_id(id);
        let path = dao.uri().path();
        debug!(%path, "creating record");
        self.fixtures
            .write()
            .insert(path.clone(), Self::record_for(dao, &path));
        Ok(())
    }

    async fn read(&self, dao: &mut DataObject) -> BackendResult<()> {
        let path = dao.path().ok_or_else(|| {
            BackendError::MissingIdentity("read requires an assigned identity".to_string())
        })?;
        let record = self
            .fixtures
            .read()
            .get(&path)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(path.clone()))?;
        dao.hydrate(&record)?;
        Ok(())
    }

    async fn update(&self, dao: &mut DataObject) -> BackendResult<()> {
        let path = dao.path().ok_or_else(|| {
            BackendError::MissingIdentity("update requires an assigned identity".to_string())
        })?;
        debug!(%path, "updating record");
        self.fixtures
            .write()
            .insert(path.clone(), Self::record_for(dao, &path));
        Ok(())
    }

    async fn delete(&self, dao: &mut DataObject) -> BackendResult<()> {
        if let Some(path) = dao.path() {
            debug!(%path, "deleting record");
            self.fixtures.write().remove(&path);
        }
        Ok(())
    }

    async fn find(
        &self,
        template: &DataObject,
        filters: &[Filter],
        sort_and_limit: &SortAndLimit,
    ) -> BackendResult<QueryResult> {
        let prefix = format!("{}{}", template.uri().collection(), ObjectUri::DEFAULT);
        let mut matches: Vec<(String, Map<String, Value>)> = {
            let fixtures = self.fixtures.read();
            fixtures
                .iter()
                .filter(|(uid, _)| uid.starts_with(&prefix))
                .filter(|(_, record)| filters.iter().all(|f| matches_filter(record, f)))
                .map(|(uid, record)| (uid.clone(), record.clone()))
                .collect()
        };

        // deterministic base order, then requested sortings (stable sorts,
        // applied minor-to-major)
        matches.sort_by(|a, b| a.0.cmp(&b.0));
        for sorting in sort_and_limit.sortings.iter().rev() {
            matches.sort_by(|a, b| {
                let ord = compare_values(a.1.get(&sorting.prop), b.1.get(&sorting.prop));
                match sorting.order {
                    SortOrder::Asc => ord,
                    SortOrder::Desc => ord.reverse(),
                }
            });
        }

        let count = matches.len();
        let limits = sort_and_limit.limits;
        let mut items = Vec::new();
        for (uid, record) in matches.into_iter().skip(limits.offset) {
            // page bound enforced before appending
            if limits.batch > 0 && items.len() >= limits.batch {
                break;
            }
            let mut dao = template.blank_clone();
            if let Ok(uri) = ObjectUri::parse(&uid) {
                dao.set_uri(uri);
            }
            dao.hydrate(&record)?;
            dao.set_persisted(true);
            items.push(dao);
        }

        Ok(QueryResult {
            items,
            meta: QueryMeta {
                batch: limits.batch,
                offset: limits.offset,
                count,
            },
        })
    }
}

fn matches_filter(record: &Map<String, Value>, filter: &Filter) -> bool {
    let value = record.get(&filter.prop);
    match filter.operator {
        FilterOperator::Equals => value == Some(&filter.value),
        FilterOperator::NotEquals => value != Some(&filter.value),
        FilterOperator::Greater
        | FilterOperator::GreaterOrEquals
        | FilterOperator::Lower
        | FilterOperator::LowerOrEquals => {
            let Some(value) = value else { return false };
            let ord = compare_scalar(value, &filter.value);
            match filter.operator {
                FilterOperator::Greater => ord == Some(Ordering::Greater),
                FilterOperator::GreaterOrEquals => {
                    matches!(ord, Some(Ordering::Greater | Ordering::Equal))
                }
                FilterOperator::Lower => ord == Some(Ordering::Less),
                FilterOperator::LowerOrEquals => {
                    matches!(ord, Some(Ordering::Less | Ordering::Equal))
                }
                _ => unreachable!(),
            }
        }
        FilterOperator::Contains => match (value, &filter.value) {
            (Some(Value::Array(items)), needle) => items.contains(needle),
            (Some(Value::String(s)), Value::String(sub)) => s.contains(sub.as_str()),
            _ => false,
        },
    }
}

fn compare_scalar(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64().partial_cmp(&y.as_f64()),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => compare_scalar(x, y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}
