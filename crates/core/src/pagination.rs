//! Page-size and offset bounds for every listing call.

use serde::{Deserialize, Serialize};

/// Page size used when the caller asks for zero or a negative number of rows.
pub const DEFAULT_LIMIT: i64 = 20;

/// Largest page a single listing call may return.
pub const MAX_LIMIT: i64 = 100;

/// Clamp a requested `(limit, offset)` pair to safe bounds.
///
/// - `limit <= 0` becomes [`DEFAULT_LIMIT`]
/// - `limit > MAX_LIMIT` becomes [`MAX_LIMIT`]
/// - `offset < 0` becomes 0
pub fn normalize(limit: i64, offset: i64) -> (i64, i64) {
    let limit = if limit <= 0 {
        DEFAULT_LIMIT
    } else {
        limit.min(MAX_LIMIT)
    };
    (limit, offset.max(0))
}

/// A `LIMIT`/`OFFSET` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Pagination {
    pub fn new(limit: i64, offset: i64) -> Self {
        Self { limit, offset }
    }

    /// Same pair after [`normalize`].
    pub fn normalized(self) -> Self {
        let (limit, offset) = normalize(self.limit, self.offset);
        Self { limit, offset }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// One page of results plus the number of rows matching the filter overall.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}
