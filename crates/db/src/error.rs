use arena_core::error::{CoreError, FailureKind};

/// Error type for everything that reaches the database.
///
/// Mirrors the two-layer shape used above it: domain failures from
/// `arena-core` pass through untouched, driver failures are wrapped.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl DataError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Core(e) => e.kind(),
            Self::Database(_) => FailureKind::Storage,
        }
    }

    pub fn not_found(entity: &'static str, id: arena_core::types::DbId) -> Self {
        Self::Core(CoreError::NotFound { entity, id })
    }
}

pub type DataResult<T> = Result<T, DataError>;
