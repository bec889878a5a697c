//! Storage seams the pipeline is written against.
//!
//! [`PgPool`] implements both traits by delegating to the repositories, and
//! `Arc<T>` forwards to `T` so one store can be shared;
//! tests substitute in-memory doubles.

use std::sync::Arc;

use arena_core::pagination::{Page, Pagination};
use arena_core::types::DbId;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::DataResult;
use crate::models::import_error::NewImportError;
use crate::record::Record;
use crate::repositories::{ImportErrorRepo, RecordRepo};

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert and overwrite `record` with the stored row.
    async fn insert<R: Record>(&self, record: &mut R) -> DataResult<()>;

    async fn fetch<R: Record>(&self, id: DbId) -> DataResult<R>;

    async fn list<R: Record>(&self, filter: &R::Filter, page: Pagination) -> DataResult<Page<R>>;

    /// Update and overwrite `record` with the stored row.
    async fn update<R: Record>(&self, id: DbId, record: &mut R) -> DataResult<()>;

    async fn remove<R: Record>(&self, id: DbId) -> DataResult<()>;
}

#[async_trait]
pub trait ImportErrorStore: Send + Sync {
    async fn append(&self, entry: NewImportError) -> DataResult<()>;
}

#[async_trait]
impl RecordStore for PgPool {
    async fn insert<R: Record>(&self, record: &mut R) -> DataResult<()> {
        *record = RecordRepo::create(self, record).await?;
        Ok(())
    }

    async fn fetch<R: Record>(&self, id: DbId) -> DataResult<R> {
        RecordRepo::find_by_id(self, id).await
    }

    async fn list<R: Record>(&self, filter: &R::Filter, page: Pagination) -> DataResult<Page<R>> {
        RecordRepo::list(self, filter, page).await
    }

    async fn update<R: Record>(&self, id: DbId, record: &mut R) -> DataResult<()> {
        *record = RecordRepo::update(self, id, record).await?;
        Ok(())
    }

    async fn remove<R: Record>(&self, id: DbId) -> DataResult<()> {
        RecordRepo::delete::<R>(self, id).await
    }
}

#[async_trait]
impl ImportErrorStore for PgPool {
    async fn append(&self, entry: NewImportError) -> DataResult<()> {
        ImportErrorRepo::append(self, &entry).await?;
        Ok(())
    }
}

#[async_trait]
impl<T: RecordStore> RecordStore for Arc<T> {
    async fn insert<R: Record>(&self, record: &mut R) -> DataResult<()> {
        (**self).insert(record).await
    }

    async fn fetch<R: Record>(&self, id: DbId) -> DataResult<R> {
        (**self).fetch(id).await
    }

    async fn list<R: Record>(&self, filter: &R::Filter, page: Pagination) -> DataResult<Page<R>> {
        (**self).list::<R>(filter, page).await
    }

    async fn update<R: Record>(&self, id: DbId, record: &mut R) -> DataResult<()> {
        (**self).update(id, record).await
    }

    async fn remove<R: Record>(&self, id: DbId) -> DataResult<()> {
        (**self).remove::<R>(id).await
    }
}

#[async_trait]
impl<T: ImportErrorStore + ?Sized> ImportErrorStore for Arc<T> {
    async fn append(&self, entry: NewImportError) -> DataResult<()> {
        (**self).append(entry).await
    }
}
