pub mod application;
pub mod lead;

use serde::Deserialize;

const DEFAULT_LIMIT: u64 = 100;

/// Offset/limit window for list endpoints. `limit` has no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub skip: u64,
    pub limit: u64,
}

impl Pagination {
    /// `(limit, offset)` as SQL `BIGINT` binds, saturating at `i64::MAX`.
    pub fn sql_bounds(&self) -> (i64, i64) {
        (
            i64::try_from(self.limit).unwrap_or(i64::MAX),
            i64::try_from(self.skip).unwrap_or(i64::MAX),
        )
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}
