use indexmap::IndexMap;

use crate::survey::SurveyRecord;

/// One raked dimension, resolved against a fixed record slice.
///
/// `members[i]` is the index into `targets` of the category record `i`
/// holds, or `None` when the record lacks the dimension or holds a category
/// with no target. Those records are never counted or adjusted here.
#[derive(Debug)]
pub(super) struct Margin {
    pub name: String,
    pub targets: Vec<f64>,
    pub members: Vec<Option<usize>>,
}

impl Margin {
    /// Resolve one dimension's fixed category totals against `records`.
    pub(super) fn new(name: &str, totals: &IndexMap<String, f64>, records: &[SurveyRecord]) -> Self {
        let members = records.iter()
            .map(|record| record.category(name).and_then(|category| totals.get_index_of(category)))
            .collect();

        Self {
            name: name.to_string(),
            targets: totals.values().copied().collect(),
            members,
        }
    }

    /// Current weighted total for each target category.
    pub(super) fn current_totals(&self, records: &[SurveyRecord]) -> Vec<f64> {
        let mut totals = vec![0.0; self.targets.len()];
        for (record, member) in records.iter().zip(&self.members) {
            if let Some(category) = *member {
                totals[category] += record.weight;
            }
        }
        totals
    }

    /// Sum of absolute differences between current and target totals.
    pub(super) fn l1_error(&self, records: &[SurveyRecord]) -> f64 {
        self.current_totals(records).iter()
            .zip(&self.targets)
            .map(|(current, target)| (current - target).abs())
            .sum()
    }
}

/// Scale factor moving a category from `current` to `target`.
///
/// A category with no current weight cannot be scaled; returns `None` and
/// the caller leaves its records untouched.
#[inline]
pub(super) fn multiplier(target: f64, current: f64) -> Option<f64> {
    if current > 0.0 { Some(target / current) } else { None }
}
