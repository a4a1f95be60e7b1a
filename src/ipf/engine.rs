use tracing::{debug, warn};

use crate::{survey::{ResponseSet, SurveyRecord}, targets::TargetWeights};
use super::{margin::{multiplier, Margin}, IpfReport};

/// Rake `records` towards `targets` by iterative proportional fitting.
///
/// Each pass adjusts the dimensions one at a time, in the order they appear
/// in `targets`, scaling every record so its category's weighted total hits
/// `proportion * total_weight`. Target totals are fixed from the weights
/// passed in, not recomputed between passes. The run stops once the largest
/// single weight change in a pass drops below `tolerance`, or after
/// `max_iterations` passes.
///
/// Malformed targets are tolerated: records missing a dimension, or holding
/// a category without a target, are left alone by that dimension, and
/// categories with zero current weight are skipped rather than divided by.
///
/// An empty record slice returns the default report without doing any work.
pub fn rake(records: &mut [SurveyRecord], targets: &TargetWeights, tolerance: f64, max_iterations: usize) -> IpfReport {
    if records.is_empty() { return IpfReport::default() }

    let total_weight = records.iter().map(|record| record.weight).sum::<f64>();
    let margins = targets.target_totals(total_weight).iter()
        .map(|(name, totals)| Margin::new(name, totals, records))
        .collect::<Vec<_>>();

    let mut iteration = 0;
    let mut max_diff = 0.0;
    let mut l1_errors = Vec::new();

    while iteration < max_iterations {
        max_diff = 0.0;
        for margin in &margins {
            max_diff = f64::max(max_diff, adjust(margin, records));
        }

        let l1_error = margins.iter().map(|margin| margin.l1_error(records)).sum::<f64>();
        l1_errors.push(l1_error);
        debug!("[ipf::rake] pass {iteration}: max_diff={max_diff:.6e} l1={l1_error:.6e}");

        if max_diff < tolerance { break }
        iteration += 1;
    }

    if iteration == max_iterations && max_iterations > 0 {
        warn!("[ipf::rake] no convergence after {max_iterations} passes (max_diff={max_diff:.6e}, tolerance={tolerance})");
    }

    IpfReport { iterations: iteration, final_change: max_diff, l1_errors }
}

/// Scale every member of `margin` to its category target.
/// Returns the largest absolute weight change applied.
fn adjust(margin: &Margin, records: &mut [SurveyRecord]) -> f64 {
    let current = margin.current_totals(records);
    let factors = margin.targets.iter().zip(&current)
        .map(|(&target, &current)| multiplier(target, current))
        .collect::<Vec<_>>();

    let mut max_diff = 0.0;
    for (record, member) in records.iter_mut().zip(&margin.members) {
        let Some(factor) = member.and_then(|category| factors[category]) else { continue };

        let old_weight = record.weight;
        record.weight *= factor;
        max_diff = f64::max(max_diff, (record.weight - old_weight).abs());
    }

    if factors.iter().any(Option::is_none) {
        debug!("[ipf::adjust] skipped zero-weight categories in '{}'", margin.name);
    }

    max_diff
}

impl ResponseSet {
    /// Rake this poll's responses in place. See [`rake`].
    #[inline]
    pub fn rake(&mut self, targets: &TargetWeights, tolerance: f64, max_iterations: usize) -> IpfReport {
        rake(self.records_mut(), targets, tolerance, max_iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gender_records() -> Vec<SurveyRecord> {
        ["M", "M", "F", "F"].iter().enumerate()
            .map(|(i, &g)| SurveyRecord::new(i as u64, "P", "A").with("gender", g))
            .collect()
    }

    #[test]
    fn empty_records_do_no_work() {
        let targets = TargetWeights::new().with("gender", [("M", 0.5), ("F", 0.5)]);
        let report = rake(&mut [], &targets, 0.001, 100);
        assert_eq!(report.into_tuple(), (0, 0.0, vec![]));
    }

    #[test]
    fn single_dimension_converges_on_second_pass() {
        let mut records = gender_records();
        let targets = TargetWeights::new().with("gender", [("M", 0.25), ("F", 0.75)]);

        let report = rake(&mut records, &targets, 0.001, 100);

        let weights = records.iter().map(|r| r.weight).collect::<Vec<_>>();
        assert_eq!(weights, vec![0.5, 0.5, 1.5, 1.5]);
        assert_eq!(report.iterations, 1);
        assert_eq!(report.final_change, 0.0);
        assert_eq!(report.l1_errors, vec![0.0, 0.0]);
    }

    #[test]
    fn first_pass_change_is_tracked() {
        let mut records = gender_records();
        let targets = TargetWeights::new().with("gender", [("M", 0.25), ("F", 0.75)]);

        // A single pass cannot observe convergence.
        let report = rake(&mut records, &targets, 0.001, 1);
        assert_eq!(report.iterations, 1);
        assert_eq!(report.final_change, 0.5);
        assert_eq!(report.l1_errors.len(), 1);
    }

    #[test]
    fn zero_max_iterations_leaves_weights() {
        let mut records = gender_records();
        let targets = TargetWeights::new().with("gender", [("M", 0.25), ("F", 0.75)]);

        let report = rake(&mut records, &targets, 0.001, 0);
        assert_eq!(report.into_tuple(), (0, 0.0, vec![]));
        assert!(records.iter().all(|r| r.weight == 1.0));
    }

    #[test]
    fn zero_total_category_is_skipped() {
        let mut records = vec![
            SurveyRecord::new(0, "P", "A").with("gender", "M"),
            SurveyRecord::new(1, "P", "A").with("gender", "F").with_weight(0.0),
            SurveyRecord::new(2, "P", "A").with("gender", "F").with_weight(0.0),
        ];
        let targets = TargetWeights::new().with("gender", [("M", 0.5), ("F", 0.5)]);

        let report = rake(&mut records, &targets, 0.001, 10);

        // M scales to half the total; F has nothing to scale.
        assert_eq!(records[0].weight, 0.5);
        assert_eq!(records[1].weight, 0.0);
        assert_eq!(records[2].weight, 0.0);
        assert_eq!(report.iterations, 1);
        assert_eq!(report.l1_errors, vec![0.5, 0.5]);
    }

    #[test]
    fn unknown_dimension_and_category_are_tolerated() {
        let mut records = gender_records();
        records.push(SurveyRecord::new(9, "P", "A").with("gender", "X"));
        let targets = TargetWeights::new()
            .with("income", [("<50k", 1.0)])
            .with("gender", [("M", 0.5), ("F", 0.5)]);

        let report = rake(&mut records, &targets, 0.001, 10);

        // total = 5, so M and F each target 2.5; the X record is untouched.
        assert_eq!(records[0].weight, 1.25);
        assert_eq!(records[2].weight, 1.25);
        assert_eq!(records[4].weight, 1.0);
        // income contributes its full unreachable target to the error.
        assert_eq!(report.l1_errors.last().copied(), Some(5.0));
        assert_eq!(report.iterations, 1);
    }

    #[test]
    fn response_set_rakes_in_place() {
        let mut set = ResponseSet::new("P", gender_records());
        let targets = TargetWeights::new().with("gender", [("M", 0.25), ("F", 0.75)]);

        let report = set.rake(&targets, 0.001, 100);
        assert_eq!(report.iterations, 1);
        assert_eq!(set.weighted_totals("gender")["M"], 1.0);
        assert_eq!(set.weighted_totals("gender")["F"], 3.0);
    }
}
