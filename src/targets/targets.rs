use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Target population proportions: dimension -> category -> proportion.
///
/// Insertion order is significant. Raking adjusts dimensions sequentially
/// in this order, so two target maps with the same entries in a
/// different order produce different (though equally valid) weights.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetWeights(IndexMap<String, IndexMap<String, f64>>);

impl TargetWeights {
    pub fn new() -> Self { Self::default() }

    /// Builder-style insertion of one dimension's proportions.
    pub fn with<I, C>(mut self, dimension: impl Into<String>, proportions: I) -> Self
    where
        I: IntoIterator<Item = (C, f64)>,
        C: Into<String>,
    {
        self.insert(dimension, proportions);
        self
    }

    /// Insert (or replace, keeping its position) one dimension's proportions.
    pub fn insert<I, C>(&mut self, dimension: impl Into<String>, proportions: I)
    where
        I: IntoIterator<Item = (C, f64)>,
        C: Into<String>,
    {
        let proportions = proportions.into_iter()
            .map(|(category, value)| (category.into(), value))
            .collect();
        self.0.insert(dimension.into(), proportions);
    }

    /// Parse a JSON object `{dimension: {category: proportion}}`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .context("[targets::from_json_str] Failed to parse target weights")
    }

    /// Read target weights from a JSON file at `path`.
    pub fn read_json(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("[targets::read_json] Failed to open {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("[targets::read_json] Failed to parse {}", path.display()))
    }

    #[inline] pub fn len(&self) -> usize { self.0.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Proportions for a single dimension.
    #[inline]
    pub fn get(&self, dimension: &str) -> Option<&IndexMap<String, f64>> {
        self.0.get(dimension)
    }

    /// Dimensions and their proportions, in raking order.
    pub fn dimensions(&self) -> impl Iterator<Item = (&str, &IndexMap<String, f64>)> + '_ {
        self.0.iter().map(|(dimension, proportions)| (dimension.as_str(), proportions))
    }

    /// Scale every proportion by `total_weight`, giving the weighted count
    /// each category should reach.
    pub fn target_totals(&self, total_weight: f64) -> IndexMap<String, IndexMap<String, f64>> {
        self.0.iter()
            .map(|(dimension, proportions)| {
                let totals = proportions.iter()
                    .map(|(category, proportion)| (category.clone(), proportion * total_weight))
                    .collect();
                (dimension.clone(), totals)
            })
            .collect()
    }
}
