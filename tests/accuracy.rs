use std::collections::HashSet;

use ndv_estimator::{Mode, NdvEstimator, WyHash64};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Small-cardinality streams are counted exactly, duplicates and all.
#[test]
fn test_small_stream_is_exact() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut estimator: NdvEstimator = NdvEstimator::new();
    let mut seen = HashSet::new();

    for _ in 0..100 {
        let tuple = (rng.gen_range(0..50), rng.gen_range(0..50));
        estimator.insert_tuple(tuple);
        seen.insert(tuple);
        assert_eq!(estimator.estimate(), seen.len() as f64);
    }
    assert_eq!(estimator.mode(), Mode::Exact);
}

/// A constant stream never leaves the exact phase and estimates one.
#[test]
fn test_constant_stream_estimates_one() {
    let mut estimator: NdvEstimator = NdvEstimator::new();
    for _ in 0..1_000_000 {
        estimator.insert_tuple((42, 42));
    }
    assert_eq!(estimator.mode(), Mode::Exact);
    assert_eq!(estimator.estimate(), 1.0);
}

/// A million-tuple uniform stream lands within the documented tolerance band.
#[test]
fn test_uniform_stream_within_tolerance() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut estimator: NdvEstimator = NdvEstimator::new();
    let mut seen = HashSet::new();

    for _ in 0..1_000_000 {
        let tuple = (rng.gen_range(0..100_000), rng.gen_range(0..100_000));
        estimator.insert_tuple(tuple);
        seen.insert(tuple);
    }

    assert_eq!(estimator.mode(), Mode::Approximate);
    let actual = seen.len() as f64;
    let relative_error = (estimator.estimate() - actual).abs() / actual;
    assert!(
        relative_error < 0.05,
        "estimate {} vs {} distinct: relative error {relative_error}",
        estimator.estimate(),
        actual,
    );
}

/// The mode flips on the insert that pushes the distinct count past capacity,
/// and estimates come from the sketch from then on.
#[test]
fn test_transition_at_capacity_plus_one() {
    let mut estimator: NdvEstimator = NdvEstimator::new();
    for i in 0..10_000 {
        estimator.insert_tuple((i, i));
    }
    assert_eq!(estimator.mode(), Mode::Exact);
    assert_eq!(estimator.estimate(), 10_000.0);

    estimator.insert_tuple((10_000, 10_000));
    assert_eq!(estimator.mode(), Mode::Approximate);
}

/// Keys tracked during the exact phase are not replayed into the sketch: right
/// after the transition the estimate collapses to roughly one. Pins the known
/// information loss at the transition rather than fixing it by replay.
#[test]
fn test_estimate_collapses_at_transition() {
    let mut estimator: NdvEstimator = NdvEstimator::new();
    for i in 0..10_001 {
        estimator.insert_tuple((i, i));
    }
    assert_eq!(estimator.mode(), Mode::Approximate);
    let estimate = estimator.estimate();
    assert!(
        (1.0..2.0).contains(&estimate),
        "sketch should hold only the overflowing key, estimate = {estimate}"
    );
}

/// Once approximate, always approximate, no matter how few keys follow.
#[test]
fn test_mode_never_reverts_without_reset() {
    let mut estimator: NdvEstimator = NdvEstimator::new();
    for i in 0..10_001 {
        estimator.insert_tuple((i, i));
    }
    for _ in 0..1_000 {
        estimator.insert_tuple((1, 1));
    }
    assert_eq!(estimator.mode(), Mode::Approximate);

    estimator.reset();
    assert_eq!(estimator.mode(), Mode::Exact);
    assert_eq!(estimator.estimate(), 0.0);
}

/// The sketch recovers accuracy as the stream keeps flowing past the transition.
#[test]
fn test_post_transition_accuracy_recovers() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut estimator = NdvEstimator::<WyHash64, 14, 1_000>::new();
    let mut seen = HashSet::new();

    for _ in 0..500_000 {
        let tuple = (rng.gen(), rng.gen());
        estimator.insert_tuple(tuple);
        seen.insert(tuple);
    }

    assert_eq!(estimator.mode(), Mode::Approximate);
    // 1000 discarded keys out of ~500k distinct: the residual understatement
    // is far below the sketch's own error band
    let actual = seen.len() as f64;
    let relative_error = (estimator.estimate() - actual).abs() / actual;
    assert!(
        relative_error < 0.05,
        "estimate {} vs {} distinct: relative error {relative_error}",
        estimator.estimate(),
        actual,
    );
}
