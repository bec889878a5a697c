//! Audit rows for failed import rows.

use arena_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the append-only `batch_import_errors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ImportError {
    pub id: DbId,
    pub source: String,
    pub row_data: serde_json::Value,
    pub error_message: String,
    pub created_at: Timestamp,
}

/// Insert payload for [`ImportError`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewImportError {
    pub source: String,
    pub row_data: serde_json::Value,
    pub error_message: String,
}
