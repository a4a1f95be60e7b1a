use std::{collections::{HashMap, HashSet}, path::{Path, PathBuf}};

use anyhow::{ensure, Result};

use crate::{io::csv::{read_records, write_records}, survey::SurveyRecord};
use super::ResponseStore;

/// Responses stored in a single CSV file shared by all polls.
///
/// Reads load the whole file; a weight update rewrites it once.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[inline] pub fn path(&self) -> &Path { &self.path }

    /// Every response in the file.
    pub fn all(&self) -> Result<Vec<SurveyRecord>> {
        read_records(&self.path)
    }
}

impl ResponseStore for CsvStore {
    fn responses(&self, poll: &str) -> Result<Vec<SurveyRecord>> {
        let mut records = self.all()?;
        records.retain(|record| record.poll == poll);
        Ok(records)
    }

    fn update_weights(&mut self, records: &[SurveyRecord]) -> Result<()> {
        let weights = records.iter()
            .map(|record| (record.id, record.weight))
            .collect::<HashMap<_, _>>();

        // Stored ids are unique; `all` rejects files that repeat one.
        let mut stored = self.all()?;
        let mut matched = HashSet::with_capacity(weights.len());
        for record in stored.iter_mut() {
            if let Some(&weight) = weights.get(&record.id) {
                record.weight = weight;
                matched.insert(record.id);
            }
        }
        ensure!(matched.len() == weights.len(),
            "[store::csv] {} of {} updated responses not found in {}",
            weights.len() - matched.len(), weights.len(), self.path.display());

        write_records(&stored, &self.path)
    }
}
