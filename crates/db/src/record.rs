//! The shape every stored entity shares.
//!
//! One [`Record`] impl per table tells the generic repository where the rows
//! live, which columns to read back, how listings are ordered, and which
//! `(column, value)` pairs a write should send.

use arena_core::pagination::Pagination;
use arena_core::query::{ListSource, Predicates, SqlValue};
use arena_core::types::DbId;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::FromRow;

pub trait Record:
    for<'r> FromRow<'r, PgRow> + Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static
{
    /// Singular lower-case name used in not-found messages.
    const ENTITY: &'static str;
    const TABLE: &'static str;
    /// Column addressed by `find_by_id`, `update` and `delete`.
    const KEY: &'static str = "id";
    const COLUMNS: &'static str;
    /// Always ends with a unique tiebreaker.
    const ORDER_BY: &'static str;

    type Filter: ListFilter;

    fn key(&self) -> DbId;

    /// Columns sent on insert, in order. Excludes server-assigned columns.
    fn writable(&self) -> Vec<(&'static str, SqlValue)>;

    fn list_source() -> ListSource<'static> {
        ListSource {
            table: Self::TABLE,
            columns: Self::COLUMNS,
            order_by: Self::ORDER_BY,
        }
    }
}

/// A decoded listing request: optional predicates plus paging.
pub trait ListFilter: Send + Sync {
    fn predicates(&self) -> Predicates;

    fn pagination(&self) -> Pagination;
}
