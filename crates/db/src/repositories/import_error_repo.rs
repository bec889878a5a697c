//! Repository for the append-only `batch_import_errors` table.

use sqlx::PgPool;

use crate::models::import_error::{ImportError, NewImportError};

const COLUMNS: &str = "id, source, row_data, error_message, created_at";

pub struct ImportErrorRepo;

impl ImportErrorRepo {
    /// Append one failed-row record.
    pub async fn append(pool: &PgPool, input: &NewImportError) -> Result<ImportError, sqlx::Error> {
        let query = format!(
            "INSERT INTO batch_import_errors (source, row_data, error_message)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ImportError>(&query)
            .bind(&input.source)
            .bind(&input.row_data)
            .bind(&input.error_message)
            .fetch_one(pool)
            .await
    }

    /// Records for one source tag, oldest first.
    pub async fn list_by_source(
        pool: &PgPool,
        source: &str,
    ) -> Result<Vec<ImportError>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM batch_import_errors WHERE source = $1 ORDER BY id ASC"
        );
        sqlx::query_as::<_, ImportError>(&query)
            .bind(source)
            .fetch_all(pool)
            .await
    }
}
