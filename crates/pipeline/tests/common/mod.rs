//! In-memory doubles for the storage seams.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;

use arena_core::pagination::{Page, Pagination};
use arena_core::types::DbId;
use arena_db::models::import_error::NewImportError;
use arena_db::record::Record;
use arena_db::store::{ImportErrorStore, RecordStore};
use arena_db::{DataError, DataResult};
use async_trait::async_trait;
use serde_json::Value;

/// Stores records as JSON per table. Inserts whose serialized form contains
/// `fail_marker` fail with a driver error.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<&'static str, BTreeMap<DbId, Value>>>,
    next_id: AtomicI64,
    pub insert_calls: AtomicUsize,
    pub last_page: Mutex<Option<Pagination>>,
    pub fail_marker: Option<String>,
}

impl MemoryStore {
    pub fn failing_on(marker: &str) -> Self {
        Self {
            fail_marker: Some(marker.to_string()),
            ..Default::default()
        }
    }

    pub fn inserts(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    pub fn rows<R: Record>(&self) -> Vec<R> {
        let tables = self.tables.lock().unwrap();
        tables
            .get(R::TABLE)
            .map(|t| {
                t.values()
                    .map(|v| serde_json::from_value(v.clone()).unwrap())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn decode<R: Record>(value: Value) -> DataResult<R> {
        serde_json::from_value(value)
            .map_err(|e| DataError::Database(sqlx::Error::Decode(Box::new(e))))
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert<R: Record>(&self, record: &mut R) -> DataResult<()> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);

        let mut value = serde_json::to_value(&*record).unwrap();
        if let Some(marker) = &self.fail_marker {
            if value.to_string().contains(marker.as_str()) {
                return Err(sqlx::Error::Protocol("duplicate key value".into()).into());
            }
        }

        let key = if R::KEY == "id" {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            value["id"] = Value::from(id);
            id
        } else {
            record.key()
        };
        self.tables
            .lock()
            .unwrap()
            .entry(R::TABLE)
            .or_default()
            .insert(key, value.clone());
        *record = Self::decode(value)?;
        Ok(())
    }

    async fn fetch<R: Record>(&self, id: DbId) -> DataResult<R> {
        let value = self
            .tables
            .lock()
            .unwrap()
            .get(R::TABLE)
            .and_then(|t| t.get(&id).cloned());
        match value {
            Some(v) => Self::decode(v),
            None => Err(DataError::not_found(R::ENTITY, id)),
        }
    }

    async fn list<R: Record>(&self, _filter: &R::Filter, page: Pagination) -> DataResult<Page<R>> {
        *self.last_page.lock().unwrap() = Some(page);
        let all = self.rows::<R>();
        let total = all.len() as i64;
        let items = all
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .collect();
        Ok(Page { items, total })
    }

    async fn update<R: Record>(&self, id: DbId, record: &mut R) -> DataResult<()> {
        let mut tables = self.tables.lock().unwrap();
        let Some(slot) = tables.get_mut(R::TABLE).and_then(|t| t.get_mut(&id)) else {
            return Err(DataError::not_found(R::ENTITY, id));
        };
        let mut value = serde_json::to_value(&*record).unwrap();
        value[R::KEY] = Value::from(id);
        *slot = value.clone();
        drop(tables);
        *record = Self::decode(value)?;
        Ok(())
    }

    async fn remove<R: Record>(&self, id: DbId) -> DataResult<()> {
        let removed = self
            .tables
            .lock()
            .unwrap()
            .get_mut(R::TABLE)
            .and_then(|t| t.remove(&id));
        match removed {
            Some(_) => Ok(()),
            None => Err(DataError::not_found(R::ENTITY, id)),
        }
    }
}

/// Collects audit records; optionally refuses every write.
#[derive(Default)]
pub struct MemoryErrors {
    pub entries: Mutex<Vec<NewImportError>>,
    pub broken: bool,
}

impl MemoryErrors {
    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Default::default()
        }
    }

    pub fn entries(&self) -> Vec<NewImportError> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImportErrorStore for MemoryErrors {
    async fn append(&self, entry: NewImportError) -> DataResult<()> {
        if self.broken {
            return Err(sqlx::Error::PoolTimedOut.into());
        }
        self.entries.lock().unwrap().push(entry);
        Ok(())
    }
}
