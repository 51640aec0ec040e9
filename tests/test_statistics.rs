//! Descriptive-statistics query tests against the sample warehouse.

mod common;

use salesmart::{FilterSet, StatColumn, StatGroup};

fn approx(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn unfiltered_totals_statistics() {
    let mart = common::setup_sample_mart();
    let stats = mart
        .stats()
        .descriptive(&FilterSet::unfiltered(), StatColumn::Total, None, None)
        .unwrap();

    // Totals: 50, 100, 150, 200, 300.
    assert_eq!(stats.count, 5);
    approx(stats.mean, 160.0);
    approx(stats.median, 150.0);
    approx(stats.min, 50.0);
    approx(stats.max, 300.0);
    assert!(stats.stddev > 0.0);
    approx(stats.iqr, stats.q3 - stats.q1);
}

#[test]
fn group_with_value_adds_an_equality_predicate() {
    let mart = common::setup_sample_mart();
    let stats = mart
        .stats()
        .descriptive(
            &FilterSet::unfiltered(),
            StatColumn::Total,
            Some(StatGroup::CustomerState),
            Some("SP"),
        )
        .unwrap();

    // SP totals: 100, 200, 300.
    assert_eq!(stats.count, 3);
    approx(stats.mean, 200.0);
    approx(stats.median, 200.0);
}

#[test]
fn group_without_value_is_a_no_op() {
    let mart = common::setup_sample_mart();
    let baseline = mart
        .stats()
        .descriptive(&FilterSet::unfiltered(), StatColumn::Total, None, None)
        .unwrap();
    let grouped = mart
        .stats()
        .descriptive(
            &FilterSet::unfiltered(),
            StatColumn::Total,
            Some(StatGroup::CustomerState),
            None,
        )
        .unwrap();
    let blank_value = mart
        .stats()
        .descriptive(
            &FilterSet::unfiltered(),
            StatColumn::Total,
            Some(StatGroup::CustomerState),
            Some(""),
        )
        .unwrap();

    assert_eq!(grouped, baseline);
    assert_eq!(blank_value, baseline);
}

#[test]
fn value_without_group_is_also_a_no_op() {
    let mart = common::setup_sample_mart();
    let baseline = mart
        .stats()
        .descriptive(&FilterSet::unfiltered(), StatColumn::Total, None, None)
        .unwrap();
    let value_only = mart
        .stats()
        .descriptive(&FilterSet::unfiltered(), StatColumn::Total, None, Some("SP"))
        .unwrap();

    assert_eq!(value_only, baseline);
}

#[test]
fn statistics_compose_with_the_shared_filters() {
    let mart = common::setup_sample_mart();
    let filters = FilterSet::unfiltered().with_dates("2018-01-01", "2018-12-31");
    let stats = mart
        .stats()
        .descriptive(&filters, StatColumn::Total, None, None)
        .unwrap();

    // 2018 totals: 100, 200, 150.
    assert_eq!(stats.count, 3);
    approx(stats.mean, 150.0);
}

#[test]
fn freight_column_is_selectable() {
    let mart = common::setup_sample_mart();
    let stats = mart
        .stats()
        .descriptive(&FilterSet::unfiltered(), StatColumn::FreightValue, None, None)
        .unwrap();

    // Freights: 5, 10, 10, 20, 20.
    assert_eq!(stats.count, 5);
    approx(stats.mean, 13.0);
    approx(stats.min, 5.0);
    approx(stats.max, 20.0);
    // 10 appears twice and 20 appears twice; the tie breaks low.
    approx(stats.mode, 10.0);
}

#[test]
fn empty_match_yields_the_zero_record() {
    let mart = common::setup_sample_mart();
    let filters = FilterSet::unfiltered().with_dates("1990-01-01", "1990-12-31");
    let stats = mart
        .stats()
        .descriptive(&filters, StatColumn::Total, None, None)
        .unwrap();

    assert_eq!(stats, salesmart::Statistics::default());
}

#[test]
fn or_zero_variant_degrades_on_missing_tables() {
    let mart = common::setup_empty_mart();
    let stats = mart.stats().descriptive_or_zero(
        &FilterSet::unfiltered(),
        StatColumn::Total,
        None,
        None,
    );
    assert_eq!(stats, salesmart::Statistics::default());
}
