use std::collections::HashSet;

use crate::survey::SurveyRecord;
use super::{TargetError, TargetWeights};

/// Maximum allowed deviation of a dimension's proportion sum from 1.0.
const SUM_TOLERANCE: f64 = 1e-5;

impl TargetWeights {
    /// Strict check of the targets against the responses they will rake.
    ///
    /// Rejects every input the engine would otherwise degrade on silently:
    /// empty dimensions, proportions outside [0, 1] or not summing to 1,
    /// dimensions no response carries, and categories present on one side
    /// but not the other.
    pub fn validate(&self, records: &[SurveyRecord]) -> Result<(), TargetError> {
        if self.is_empty() { return Err(TargetError::Empty) }

        for (dimension, proportions) in self.dimensions() {
            if proportions.is_empty() {
                return Err(TargetError::EmptyDimension(dimension.into()));
            }

            for (category, &value) in proportions {
                if !(0.0..=1.0).contains(&value) {
                    return Err(TargetError::ProportionOutOfRange {
                        dimension: dimension.into(),
                        category: category.clone(),
                        value,
                    });
                }
            }

            let sum = proportions.values().sum::<f64>();
            if (sum - 1.0).abs() >= SUM_TOLERANCE {
                return Err(TargetError::ProportionSum { dimension: dimension.into(), sum });
            }

            let observed = records.iter()
                .filter_map(|record| record.category(dimension))
                .collect::<HashSet<_>>();

            if observed.is_empty() {
                return Err(TargetError::UnknownDimension(dimension.into()));
            }

            if let Some(category) = proportions.keys().find(|c| !observed.contains(c.as_str())) {
                return Err(TargetError::UnobservedCategory {
                    dimension: dimension.into(),
                    category: category.clone(),
                });
            }

            // First offending record wins, so the error is deterministic.
            if let Some(category) = records.iter()
                .filter_map(|record| record.category(dimension))
                .find(|c| !proportions.contains_key(*c))
            {
                return Err(TargetError::UnmappedCategory {
                    dimension: dimension.into(),
                    category: category.to_string(),
                });
            }
        }

        Ok(())
    }
}
