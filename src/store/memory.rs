use std::collections::HashMap;

use anyhow::{anyhow, bail, Result};

use crate::survey::SurveyRecord;
use super::ResponseStore;

/// Responses held in memory, indexed by id.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<SurveyRecord>,
    index: HashMap<u64, usize>, // record id -> position in `records`
    writes: usize,
}

impl MemoryStore {
    /// Index `records` by id. Ids must be unique across all polls.
    pub fn new(records: Vec<SurveyRecord>) -> Result<Self> {
        let mut index = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            if index.insert(record.id, i).is_some() {
                bail!("[store::memory] Duplicate response id {}", record.id);
            }
        }
        Ok(Self { records, index, writes: 0 })
    }

    /// Every stored record, across all polls.
    #[inline] pub fn records(&self) -> &[SurveyRecord] { &self.records }

    /// Number of bulk weight updates applied so far.
    #[inline] pub fn writes(&self) -> usize { self.writes }
}

impl ResponseStore for MemoryStore {
    fn responses(&self, poll: &str) -> Result<Vec<SurveyRecord>> {
        Ok(self.records.iter().filter(|record| record.poll == poll).cloned().collect())
    }

    fn update_weights(&mut self, records: &[SurveyRecord]) -> Result<()> {
        // Resolve every id before touching anything so a bad batch changes nothing.
        let positions = records.iter()
            .map(|record| self.index.get(&record.id).copied()
                .ok_or_else(|| anyhow!("[store::memory] No stored response with id {}", record.id)))
            .collect::<Result<Vec<_>>>()?;

        for (record, i) in records.iter().zip(positions) {
            self.records[i].weight = record.weight;
        }
        self.writes += 1;
        Ok(())
    }
}
