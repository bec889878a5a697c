use crate::types::DbId;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// A domain rule was violated. Displays as the bare rule message.
    #[error("{0}")]
    Validation(String),

    /// A raw import row could not be parsed into a domain shape.
    #[error("conversion failed: {0}")]
    Conversion(String),
}

impl CoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conversion(msg: impl Into<String>) -> Self {
        Self::Conversion(msg.into())
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::NotFound { .. } => FailureKind::NotFound,
            Self::Validation(_) => FailureKind::Validation,
            Self::Conversion(_) => FailureKind::Conversion,
        }
    }
}

/// Coarse classification of a failed operation.
///
/// The boundary above uses this to pick a response; the import pipeline
/// uses it for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NotFound,
    Validation,
    Conversion,
    Storage,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Validation => "validation",
            Self::Conversion => "conversion",
            Self::Storage => "storage",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_displays_bare_message() {
        let err = CoreError::validation("nickname is required");
        assert_eq!(err.to_string(), "nickname is required");
        assert_eq!(err.kind(), FailureKind::Validation);
    }

    #[test]
    fn conversion_is_tagged() {
        let err = CoreError::conversion("invalid start_time");
        assert_eq!(err.to_string(), "conversion failed: invalid start_time");
        assert_eq!(err.kind(), FailureKind::Conversion);
    }

    #[test]
    fn not_found_names_entity() {
        let err = CoreError::NotFound {
            entity: "player",
            id: 42,
        };
        assert_eq!(err.to_string(), "player with id 42 not found");
        assert_eq!(err.kind(), FailureKind::NotFound);
    }
}
