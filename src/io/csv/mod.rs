//! CSV format reading and writing operations.

mod read;
mod write;

pub use read::*;
pub use write::*;

/// Columns with fixed meaning; every other column is a demographic dimension.
pub(crate) const ID_COLUMN: &str = "id";
pub(crate) const POLL_COLUMN: &str = "poll";
pub(crate) const CANDIDATE_COLUMN: &str = "candidate";
pub(crate) const WEIGHT_COLUMN: &str = "weight";

pub(crate) fn is_reserved(column: &str) -> bool {
    matches!(column, ID_COLUMN | POLL_COLUMN | CANDIDATE_COLUMN | WEIGHT_COLUMN)
}
