use indexmap::IndexMap;

use super::SurveyRecord;

/// All responses loaded for one poll.
///
/// Records keep stable indices for the lifetime of the set; reweighting
/// mutates weights in place and the whole set is persisted afterwards.
#[derive(Debug, Clone, Default)]
pub struct ResponseSet {
    poll: String,
    records: Vec<SurveyRecord>,
}

impl ResponseSet {
    pub fn new(poll: impl Into<String>, records: Vec<SurveyRecord>) -> Self {
        Self { poll: poll.into(), records }
    }

    #[inline] pub fn poll(&self) -> &str { &self.poll }

    #[inline] pub fn len(&self) -> usize { self.records.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.records.is_empty() }

    #[inline] pub fn records(&self) -> &[SurveyRecord] { &self.records }

    #[inline] pub fn records_mut(&mut self) -> &mut [SurveyRecord] { &mut self.records }

    #[inline] pub fn into_records(self) -> Vec<SurveyRecord> { self.records }

    /// Sum of all current weights.
    pub fn total_weight(&self) -> f64 {
        self.records.iter().map(|record| record.weight).sum()
    }

    /// Weighted total per category of `dimension`, in first-seen order.
    /// Records lacking the dimension are ignored.
    pub fn weighted_totals(&self, dimension: &str) -> IndexMap<String, f64> {
        let mut totals = IndexMap::new();
        for record in &self.records {
            if let Some(category) = record.category(dimension) {
                *totals.entry(category.to_string()).or_insert(0.0) += record.weight;
            }
        }
        totals
    }

    /// Overwrite every weight with `weight`.
    pub fn reset_weights(&mut self, weight: f64) {
        self.records.iter_mut().for_each(|record| record.weight = weight);
    }
}
