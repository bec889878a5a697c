//! Best-effort audit trail for failed import rows.

use arena_db::models::import_error::NewImportError;
use arena_db::store::ImportErrorStore;

use super::row::RawRow;

/// Persists one audit record per failed row.
///
/// A failure to persist is logged and swallowed; it never changes the
/// outcome of the import.
#[derive(Debug, Clone)]
pub struct ErrorRecorder<E> {
    store: E,
}

impl<E: ImportErrorStore> ErrorRecorder<E> {
    pub fn new(store: E) -> Self {
        Self { store }
    }

    pub async fn record(&self, source: &str, row: &RawRow, error: impl std::fmt::Display) {
        let entry = NewImportError {
            source: source.to_string(),
            row_data: row.to_json(),
            error_message: error.to_string(),
        };
        if let Err(e) = self.store.append(entry).await {
            tracing::warn!(source, error = %e, "Failed to record import error");
        }
    }
}
