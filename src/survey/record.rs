use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Dimension;

/// A single survey response: who answered, which candidate they chose,
/// their demographic categories, and their current weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyRecord {
    pub id: u64,
    pub poll: String,
    pub candidate: String,
    pub demographics: BTreeMap<String, String>, // dimension name -> category
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 { 1.0 }

impl SurveyRecord {
    /// Create a record with unit weight and no demographics.
    pub fn new(id: u64, poll: impl Into<String>, candidate: impl Into<String>) -> Self {
        Self {
            id,
            poll: poll.into(),
            candidate: candidate.into(),
            demographics: BTreeMap::new(),
            weight: default_weight(),
        }
    }

    /// Builder-style setter for a single dimension.
    pub fn with(mut self, dimension: impl Into<String>, category: impl Into<String>) -> Self {
        self.demographics.insert(dimension.into(), category.into());
        self
    }

    /// Builder-style setter for the weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Category held by this record for `dimension`, if any.
    #[inline]
    pub fn category(&self, dimension: &str) -> Option<&str> {
        self.demographics.get(dimension).map(String::as_str)
    }

    /// Category held for one of the standard dimensions.
    #[inline]
    pub fn standard(&self, dimension: Dimension) -> Option<&str> {
        self.category(dimension.to_str())
    }
}
