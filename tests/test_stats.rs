//! Unit tests for the descriptive-statistics engine.

use salesmart::Statistics;

fn approx(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

// ---------------------------------------------------------------------------
// Degenerate inputs
// ---------------------------------------------------------------------------

#[test]
fn empty_input_returns_all_zero_record() {
    let stats = Statistics::from_values(&[]);
    assert_eq!(stats, Statistics::default());
    assert_eq!(stats.count, 0);
    assert_eq!(stats.mean, 0.0);
    assert_eq!(stats.median, 0.0);
    assert_eq!(stats.mode, 0.0);
    assert_eq!(stats.stddev, 0.0);
    assert_eq!(stats.q1, 0.0);
    assert_eq!(stats.q2, 0.0);
    assert_eq!(stats.q3, 0.0);
    assert_eq!(stats.iqr, 0.0);
    assert_eq!(stats.min, 0.0);
    assert_eq!(stats.max, 0.0);
}

#[test]
fn single_value_has_zero_stddev_not_nan() {
    let stats = Statistics::from_values(&[42.0]);
    assert_eq!(stats.count, 1);
    approx(stats.mean, 42.0);
    approx(stats.median, 42.0);
    approx(stats.min, 42.0);
    approx(stats.max, 42.0);
    assert_eq!(stats.stddev, 0.0);
    assert!(!stats.stddev.is_nan());
}

// ---------------------------------------------------------------------------
// Quartiles and spread
// ---------------------------------------------------------------------------

#[test]
fn four_values_quartiles_interpolate_between_pairs() {
    let stats = Statistics::from_values(&[10.0, 20.0, 30.0, 40.0]);
    assert_eq!(stats.count, 4);
    approx(stats.mean, 25.0);
    approx(stats.median, 25.0);
    approx(stats.q1, 15.0);
    approx(stats.q2, 25.0);
    approx(stats.q3, 35.0);
    approx(stats.iqr, 20.0);
    approx(stats.min, 10.0);
    approx(stats.max, 40.0);
}

#[test]
fn odd_length_median_is_middle_element() {
    let stats = Statistics::from_values(&[5.0, 1.0, 3.0, 2.0, 4.0]);
    approx(stats.median, 3.0);
    approx(stats.min, 1.0);
    approx(stats.max, 5.0);
}

#[test]
fn unsorted_input_is_sorted_internally() {
    let a = Statistics::from_values(&[40.0, 10.0, 30.0, 20.0]);
    let b = Statistics::from_values(&[10.0, 20.0, 30.0, 40.0]);
    assert_eq!(a, b);
}

#[test]
fn sample_stddev_uses_n_minus_one() {
    // Values 2, 4, 4, 4, 5, 5, 7, 9: mean 5, sum of squared deviations 32,
    // sample variance 32/7.
    let stats = Statistics::from_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
    approx(stats.mean, 5.0);
    approx(stats.stddev, (32.0_f64 / 7.0).sqrt());
}

// ---------------------------------------------------------------------------
// Mode policy
// ---------------------------------------------------------------------------

#[test]
fn mode_falls_back_to_mean_when_all_distinct() {
    let stats = Statistics::from_values(&[10.0, 20.0, 30.0, 40.0]);
    approx(stats.mode, 25.0);
}

#[test]
fn mode_picks_most_frequent_value() {
    let stats = Statistics::from_values(&[1.0, 2.0, 2.0, 2.0, 3.0, 3.0]);
    approx(stats.mode, 2.0);
}

#[test]
fn mode_frequency_tie_breaks_toward_smallest() {
    let stats = Statistics::from_values(&[3.0, 3.0, 1.0, 1.0, 2.0]);
    approx(stats.mode, 1.0);
}
