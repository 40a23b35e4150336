//! Tests for the approximation-ratio pipeline with mock evaluators.

use std::f64::consts::PI;

use approx::assert_relative_eq;
use linqaoa_core::{
    CoreError, Counts, FnEvaluator, OutcomeDistribution, ParameterVector, PenaltyWeight,
    ProblemInstance, Shgo, approximation_ratio, ratio_for_distribution,
    sampled_approximation_ratio,
};

fn two_item_problem() -> ProblemInstance {
    ProblemInstance::new(vec![1.0, 2.0], vec![1.0, 1.0], 1.0).unwrap()
}

// ---------------------------------------------------------------------------
// Ratio of fixed distributions
// ---------------------------------------------------------------------------

#[test]
fn ratio_is_independent_of_entry_order() {
    let problem = ProblemInstance::new(vec![1.0, 1.0, 2.0], vec![1.0, 1.0, 1.0], 2.0).unwrap();
    let entries = vec![
        ("101", 0.4),
        ("011", 0.1),
        ("111", 0.2),
        ("110", 0.3),
    ];
    let forward = OutcomeDistribution::from_probabilities(entries.clone()).unwrap();
    let backward = OutcomeDistribution::from_probabilities(entries.into_iter().rev()).unwrap();

    let a = ratio_for_distribution(&forward, &problem).unwrap();
    let b = ratio_for_distribution(&backward, &problem).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.best_value, 3.0);
    // 0.4 * 3 + 0.1 * 2 + 0.2 * 0 + 0.3 * 3
    assert_relative_eq!(a.expectation, 2.3, epsilon = 1e-12);
}

#[test]
fn ratio_undefined_when_nothing_fits() {
    let problem = ProblemInstance::new(vec![1.0, 1.0], vec![3.0, 3.0], 1.0).unwrap();
    let dist = OutcomeDistribution::from_probabilities([("00", 0.5), ("11", 0.5)]).unwrap();
    let report = ratio_for_distribution(&dist, &problem).unwrap();
    assert!(report.ratio.is_nan());
}

// ---------------------------------------------------------------------------
// Exact variant
// ---------------------------------------------------------------------------

#[test]
fn exact_variant_marginalizes_ancilla_bits() {
    let problem = two_item_problem();
    // Width 5: three ancilla bits ahead of the two choice bits.
    let evaluator = FnEvaluator::new("mock", |params: &ParameterVector, _| {
        let q = (params.betas()[0] / PI).clamp(0.0, 1.0);
        Ok(OutcomeDistribution::from_probabilities([
            ("00010", q / 2.0),
            ("10010", q / 2.0),
            ("00011", 1.0 - q),
        ])?)
    });

    let quality =
        approximation_ratio(&evaluator, &problem, 1, PenaltyWeight::integer(10), &Shgo::new())
            .unwrap();

    assert_eq!(quality.distribution.width(), Some(2));
    assert!(quality.report.ratio > 0.95);
    assert!(quality.report.ratio <= 1.0 + 1e-12);
}

#[test]
fn evaluator_failure_reaches_caller_unchanged() {
    let evaluator = FnEvaluator::new("broken", |_: &ParameterVector, _| {
        Err("backend unavailable".into())
    });
    let err = approximation_ratio(
        &evaluator,
        &two_item_problem(),
        2,
        PenaltyWeight::default(),
        &Shgo::new(),
    )
    .unwrap_err();
    assert!(matches!(err, CoreError::Evaluator(_)));
    assert_eq!(err.to_string(), "backend unavailable");
}

// ---------------------------------------------------------------------------
// Sampled variant
// ---------------------------------------------------------------------------

#[test]
fn sampled_prefix_aggregation() {
    let mut counts = Counts::new();
    counts.insert("000", 1024);
    counts.insert("100", 1024);
    let dist = OutcomeDistribution::from_counts(&counts, 2048)
        .unwrap()
        .marginalize(2)
        .unwrap();
    assert_eq!(dist.len(), 1);
    assert_eq!(dist.get("00"), 1.0);
}

#[test]
fn sampled_variant_scores_frequencies() {
    let problem = two_item_problem();
    let evaluator = FnEvaluator::new("shots", |_: &ParameterVector, _| {
        let mut counts = Counts::new();
        counts.insert("110", 1536);
        counts.insert("001", 512);
        Ok(OutcomeDistribution::from_counts(&counts, 2048)?)
    });
    let params = ParameterVector::from_interleaved(&[0.1, 0.2]).unwrap();

    let quality =
        sampled_approximation_ratio(&evaluator, &problem, &params, PenaltyWeight::default())
            .unwrap();

    assert_eq!(quality.distribution.get("10"), 0.75);
    assert_eq!(quality.distribution.get("01"), 0.25);
    // 0.75 * 2 + 0.25 * 1 over a best value of 2.
    assert_relative_eq!(quality.report.ratio, 0.875, epsilon = 1e-12);
}

#[test]
fn sampled_ratio_above_one_is_reported_unclamped() {
    let problem = two_item_problem();
    // More observations than requested shots, all on the optimum.
    let evaluator = FnEvaluator::new("noisy-shots", |_: &ParameterVector, _| {
        let mut counts = Counts::new();
        counts.insert("010", 1280);
        counts.insert("110", 1280);
        Ok(OutcomeDistribution::from_counts(&counts, 2048)?)
    });
    let params = ParameterVector::from_interleaved(&[0.1, 0.2]).unwrap();

    let quality =
        sampled_approximation_ratio(&evaluator, &problem, &params, PenaltyWeight::default())
            .unwrap();

    assert_eq!(quality.distribution.get("10"), 1.25);
    assert_relative_eq!(quality.report.expectation, 2.5, epsilon = 1e-12);
    assert_relative_eq!(quality.report.ratio, 1.25, epsilon = 1e-12);
    assert!(quality.report.is_defined());

    let direct = ratio_for_distribution(&quality.distribution, &problem).unwrap();
    assert_relative_eq!(direct.ratio, 1.25, epsilon = 1e-12);
}
