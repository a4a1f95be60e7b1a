//! Storage collaborators that supply responses and persist updated weights.

mod csv;
mod memory;

pub use csv::CsvStore;
pub use memory::MemoryStore;

use anyhow::Result;

use crate::survey::SurveyRecord;

/// Source of survey responses and sink for their recomputed weights.
pub trait ResponseStore {
    /// All responses recorded for `poll`, in storage order.
    fn responses(&self, poll: &str) -> Result<Vec<SurveyRecord>>;

    /// Persist the `weight` of every record in `records`, matched by id.
    /// Other fields are left as stored.
    fn update_weights(&mut self, records: &[SurveyRecord]) -> Result<()>;
}
