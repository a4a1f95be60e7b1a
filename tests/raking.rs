// Integration tests for raking behaviour:
//   worked example, marginal matching, convergence, dimension order, idempotence

use pollweight::{rake, IpfReport, ResponseSet, SurveyRecord, TargetWeights};

/// 100 responses over gender x age with a lopsided joint distribution.
fn lopsided() -> Vec<SurveyRecord> {
    let cells = [("M", "young", 10), ("M", "old", 30), ("F", "young", 40), ("F", "old", 20)];
    let mut id = 0;
    let mut records = Vec::new();
    for (gender, age, count) in cells {
        for _ in 0..count {
            records.push(SurveyRecord::new(id, "P", "A").with("gender", gender).with("age", age));
            id += 1;
        }
    }
    records
}

fn even_targets() -> TargetWeights {
    TargetWeights::new()
        .with("gender", [("M", 0.5), ("F", 0.5)])
        .with("age", [("young", 0.3), ("old", 0.7)])
}

#[test]
fn worked_example_from_four_responses() {
    let mut records = ["M", "M", "F", "F"].iter().enumerate()
        .map(|(i, &g)| SurveyRecord::new(i as u64, "P", "A").with("gender", g))
        .collect::<Vec<_>>();
    let targets = TargetWeights::from_json_str(r#"{"gender": {"M": 0.25, "F": 0.75}}"#).unwrap();

    let (iterations, final_change, l1_errors) = rake(&mut records, &targets, 0.001, 100).into_tuple();

    assert_eq!(records.iter().map(|r| r.weight).collect::<Vec<_>>(), vec![0.5, 0.5, 1.5, 1.5]);
    assert_eq!(iterations, 1);
    assert_eq!(final_change, 0.0);
    assert_eq!(l1_errors.len(), 2);
}

#[test]
fn converged_run_matches_marginals() {
    let mut set = ResponseSet::new("P", lopsided());
    let total = set.total_weight();
    let tolerance = 1e-9;

    let report = set.rake(&even_targets(), tolerance, 1000);
    assert!(report.iterations < 1000, "did not converge: {report:?}");
    assert!(report.final_change < tolerance);

    for (dimension, proportions) in even_targets().dimensions() {
        let totals = set.weighted_totals(dimension);
        for (category, proportion) in proportions {
            let expected = proportion * total;
            assert!((totals[category] - expected).abs() < 1e-6,
                "{dimension}={category}: {} vs {expected}", totals[category]);
        }
    }
}

#[test]
fn error_shrinks_to_nothing() {
    let mut records = lopsided();
    let report = rake(&mut records, &even_targets(), 1e-9, 1000);

    let first = report.l1_errors[0];
    let last = report.final_l1_error().unwrap();
    assert!(first > 0.0);
    assert!(last < first);
    assert!(last < 1e-6);

    // Non-increasing up to numeric noise.
    for pair in report.l1_errors.windows(2) {
        assert!(pair[1] <= pair[0] + 1e-9, "{:?}", report.l1_errors);
    }
}

#[test]
fn last_dimension_in_order_is_matched_after_one_pass() {
    let targets = even_targets();
    let mut records = lopsided();
    rake(&mut records, &targets, 1e-12, 1);

    let set = ResponseSet::new("P", records);
    let age = set.weighted_totals("age");
    let gender = set.weighted_totals("gender");
    assert!((age["young"] - 30.0).abs() < 1e-9);
    assert!((age["old"] - 70.0).abs() < 1e-9);
    assert!((gender["M"] - 50.0).abs() > 0.1);

    // Reversing the order reverses which margin is exact.
    let reversed = TargetWeights::new()
        .with("age", [("young", 0.3), ("old", 0.7)])
        .with("gender", [("M", 0.5), ("F", 0.5)]);
    let mut records = lopsided();
    rake(&mut records, &reversed, 1e-12, 1);

    let set = ResponseSet::new("P", records);
    assert!((set.weighted_totals("gender")["M"] - 50.0).abs() < 1e-9);
    assert!((set.weighted_totals("age")["young"] - 30.0).abs() > 0.1);
}

#[test]
fn rerun_on_converged_weights_is_immediate() {
    let tolerance = 1e-6;
    let mut records = lopsided();
    rake(&mut records, &even_targets(), tolerance, 1000);
    let converged = records.clone();

    let report = rake(&mut records, &even_targets(), tolerance, 1000);
    assert!(report.iterations <= 1, "{report:?}");
    assert!(report.final_change < tolerance);
    for (after, before) in records.iter().zip(&converged) {
        assert!((after.weight - before.weight).abs() < tolerance);
    }
}

#[test]
fn exhausting_iterations_reports_the_bound() {
    let mut records = lopsided();
    let report = rake(&mut records, &even_targets(), 1e-15, 3);
    assert_eq!(report.iterations, 3);
    assert_eq!(report.passes(), 3);
    assert!(report.final_change > 0.0);
}

#[test]
fn empty_category_leaves_weights_alone() {
    let mut records = lopsided();
    let targets = TargetWeights::new().with("age", [("young", 0.3), ("old", 0.5), ("unborn", 0.2)]);

    let report = rake(&mut records, &targets, 1e-9, 100);
    assert_ne!(report, IpfReport::default());

    let set = ResponseSet::new("P", records);
    assert!((set.weighted_totals("age")["young"] - 30.0).abs() < 1e-9);
    assert!((set.weighted_totals("age")["old"] - 50.0).abs() < 1e-9);
    assert!(!set.weighted_totals("age").contains_key("unborn"));
    // The unreachable category keeps contributing its full target to the error.
    assert!((report.final_l1_error().unwrap() - 20.0).abs() < 1e-9);
}
