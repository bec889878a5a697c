//! Validation-then-persist services, one generic implementation for every
//! entity.

mod rules;

pub use rules::{DomainRecord, WriteMode};

use arena_core::pagination::Page;
use arena_core::types::DbId;
use arena_db::error::DataResult;
use arena_db::record::{ListFilter, Record};
use arena_db::store::RecordStore;

/// Applies the entity's write rules before delegating to the store.
#[derive(Debug, Clone)]
pub struct RecordService<S> {
    store: S,
}

impl<S: RecordStore> RecordService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validate, default and insert. On success `record` holds the stored row.
    pub async fn create<R: DomainRecord>(&self, record: &mut R) -> DataResult<()> {
        record.prepare(WriteMode::Create)?;
        self.store.insert(record).await?;
        tracing::debug!(entity = R::ENTITY, id = record.key(), "Record created");
        Ok(())
    }

    pub async fn get<R: Record>(&self, id: DbId) -> DataResult<R> {
        self.store.fetch(id).await
    }

    /// List with normalized paging.
    pub async fn list<R: Record>(&self, filter: &R::Filter) -> DataResult<Page<R>> {
        let page = filter.pagination().normalized();
        let result = self.store.list::<R>(filter, page).await?;
        tracing::debug!(
            entity = R::ENTITY,
            limit = page.limit,
            offset = page.offset,
            total = result.total,
            "Listed records",
        );
        Ok(result)
    }

    /// Validate and replace the row keyed by `id`.
    pub async fn update<R: DomainRecord>(&self, id: DbId, record: &mut R) -> DataResult<()> {
        record.prepare(WriteMode::Update)?;
        self.store.update(id, record).await?;
        tracing::debug!(entity = R::ENTITY, id, "Record updated");
        Ok(())
    }

    pub async fn delete<R: Record>(&self, id: DbId) -> DataResult<()> {
        self.store.remove::<R>(id).await?;
        tracing::debug!(entity = R::ENTITY, id, "Record deleted");
        Ok(())
    }
}
