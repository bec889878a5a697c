use thiserror::Error;

/// File-level failures while turning a payload into raw rows.
///
/// Row-level problems never surface here; they end up in the import summary.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("payload must be a JSON array of objects: {0}")]
    Json(#[from] serde_json::Error),

    #[error("payload must be a JSON array, got {0}")]
    NotAnArray(&'static str),

    #[error("unreadable CSV: {0}")]
    Csv(#[from] csv::Error),
}
