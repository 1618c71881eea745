//! Property-based tests for the Relia engine.
//!
//! These tests use proptest to generate random inputs and verify that
//! the engine maintains its invariants under all conditions.
//!
//! # Testing Philosophy
//!
//! 1. **No panics**: resolution and scoring never crash on any input
//! 2. **Determinism**: same input always produces the same output
//! 3. **Bounds**: operating time and risk scores stay in their ranges
//! 4. **Degradation**: zero denominators always yield zero results

use proptest::prelude::*;

use relia::{
    AnalysisSettings, BindingOverrides, ColumnBindings, ColumnRole, EventTable, MemorySheets,
    SheetStatus, TimeUnit, cost, metrics, resolve_column, risk,
};

// =============================================================================
// Test Strategies
// =============================================================================

/// Arbitrary cell content, numeric or junk.
fn cell() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..3000).prop_map(|v| v.to_string()),
        (-500i32..500).prop_map(|v| v.to_string()),
        (0.0f64..5000.0).prop_map(|v| format!("{v:.2}")),
        "[a-zA-Z /]{0,12}",
        Just(String::new()),
    ]
}

/// Department names, mixing MAINTENANCE spellings with others.
fn department() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("MAINTENANCE".to_string()),
        Just(" maintenance ".to_string()),
        Just("OPS".to_string()),
        Just("ELECTRICAL".to_string()),
        "[A-Z]{2,10}",
    ]
}

/// Non-negative downtime values in minutes.
fn downtime_series(len: impl Into<proptest::collection::SizeRange>) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec((0u32..2000).prop_map(f64::from), len)
}

fn downtime_table(values: &[f64], departments: Option<&[String]>) -> EventTable {
    let mut headers = vec!["Equipment Downtime (Minutes)".to_string()];
    if departments.is_some() {
        headers.push("Department".to_string());
    }
    let rows = values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let mut row = vec![v.to_string()];
            if let Some(depts) = departments {
                row.push(depts[i].clone());
            }
            row
        })
        .collect();
    EventTable::new(headers, rows)
}

fn bindings(table: &EventTable) -> ColumnBindings {
    ColumnBindings::resolve(table, &BindingOverrides::new()).expect("non-empty header row")
}

// =============================================================================
// Column Resolution Properties
// =============================================================================

proptest! {
    /// The resolver never panics on arbitrary headers and seeds.
    #[test]
    fn resolver_never_panics(
        headers in prop::collection::vec("[ -~]{0,30}", 0..12),
        seed in prop::option::of("[ -~]{0,30}"),
    ) {
        for role in [
            ColumnRole::Downtime,
            ColumnRole::RepairTime,
            ColumnRole::Department,
            ColumnRole::Cost,
            ColumnRole::Reason,
        ] {
            let _ = resolve_column(&headers, role, seed.as_deref());
        }
    }

    /// Whatever the resolver returns is a column that exists.
    #[test]
    fn resolver_returns_existing_column(
        headers in prop::collection::vec("[ -~]{1,30}", 1..12),
        seed in prop::option::of("[ -~]{1,30}"),
    ) {
        for role in [ColumnRole::Downtime, ColumnRole::Department, ColumnRole::Cost] {
            if let Some(name) = resolve_column(&headers, role, seed.as_deref()) {
                // Either the literal seed present in the sheet, or an
                // actual header.
                prop_assert!(headers.contains(&name));
            }
        }
    }
}

// =============================================================================
// Reliability Metric Properties
// =============================================================================

proptest! {
    /// Operating time per record stays within [0, observation_period].
    #[test]
    fn operating_time_stays_bounded(values in downtime_series(0..40)) {
        let table = downtime_table(&values, None);
        let settings = AnalysisSettings::default().with_unit(TimeUnit::Minutes);
        let (_, series) = metrics::compute(&table, &bindings(&table), &settings);

        for &op in &series.operating {
            prop_assert!(op >= 0.0);
            prop_assert!(op <= settings.observation_period);
        }
    }

    /// Zero failures force MTTF and failure rate to zero, and likewise
    /// for repairs.
    #[test]
    fn zero_denominators_degrade_to_zero(values in downtime_series(0..40)) {
        let table = downtime_table(&values, None);
        let settings = AnalysisSettings::default().with_unit(TimeUnit::Minutes);
        let (m, _) = metrics::compute(&table, &bindings(&table), &settings);

        if m.num_failures == 0 {
            prop_assert_eq!(m.mttf, 0.0);
            prop_assert_eq!(m.failure_rate, 0.0);
        }
        if m.num_repairs == 0 {
            prop_assert_eq!(m.mttr, 0.0);
            prop_assert_eq!(m.repair_rate, 0.0);
        }
    }

    /// The MAINTENANCE filter only ever touches the repair track.
    #[test]
    fn exclusion_never_changes_failure_metrics(
        values in downtime_series(1..30),
        depts in prop::collection::vec(department(), 30),
    ) {
        let with_dept = downtime_table(&values, Some(&depts[..values.len()]));
        let without_dept = downtime_table(&values, None);
        let settings = AnalysisSettings::default().with_unit(TimeUnit::Minutes);

        let (a, _) = metrics::compute(&with_dept, &bindings(&with_dept), &settings);
        let (b, _) = metrics::compute(&without_dept, &bindings(&without_dept), &settings);

        prop_assert_eq!(a.num_failures, b.num_failures);
        prop_assert_eq!(a.mttf, b.mttf);
        prop_assert_eq!(a.failure_rate, b.failure_rate);
        prop_assert_eq!(a.total_operating_time, b.total_operating_time);
    }

    /// Metric computation is deterministic.
    #[test]
    fn metrics_are_deterministic(
        values in downtime_series(0..30),
        cells in prop::collection::vec(cell(), 30),
    ) {
        let rows: Vec<Vec<String>> = values
            .iter()
            .zip(&cells)
            .map(|(v, c)| vec![v.to_string(), c.clone()])
            .collect();
        let table = EventTable::new(
            vec!["Equipment Downtime (Minutes)".to_string(), "Department".to_string()],
            rows,
        );
        let settings = AnalysisSettings::default();

        let first = metrics::compute(&table, &bindings(&table), &settings);
        let second = metrics::compute(&table, &bindings(&table), &settings);
        prop_assert_eq!(first, second);
    }
}

// =============================================================================
// Cost Reconciliation Properties
// =============================================================================

proptest! {
    /// The grand total is the sum of the per-sheet rows, regardless of
    /// sheet order (integer-valued costs keep the sums exact).
    #[test]
    fn grand_total_is_order_independent(
        sheets in prop::collection::vec(prop::collection::vec(0u32..10_000, 0..8), 1..6),
    ) {
        let make = |order: &[Vec<u32>]| {
            let mut wb = MemorySheets::new();
            for (i, costs) in order.iter().enumerate() {
                let table = EventTable::new(
                    vec!["Repairing Cost".to_string()],
                    costs.iter().map(|c| vec![c.to_string()]).collect(),
                );
                wb = wb.with_sheet(format!("Sheet{i}"), table);
            }
            cost::reconcile(&mut wb, Some("Repairing Cost"), None)
        };

        let forward = make(&sheets);
        let reversed_sheets: Vec<Vec<u32>> = sheets.iter().rev().cloned().collect();
        let reversed = make(&reversed_sheets);

        prop_assert_eq!(forward.grand_total.all_cost, reversed.grand_total.all_cost);

        let row_sum: f64 = forward.rows.iter().map(|r| r.all_cost).sum();
        prop_assert_eq!(forward.grand_total.all_cost, row_sum);
    }

    /// A failing sheet contributes exactly zero and flips nothing else.
    #[test]
    fn failing_sheet_contributes_zero(costs in prop::collection::vec(0u32..10_000, 0..8)) {
        let table = EventTable::new(
            vec!["Repairing Cost".to_string()],
            costs.iter().map(|c| vec![c.to_string()]).collect(),
        );
        let expected: f64 = costs.iter().map(|&c| f64::from(c)).sum();

        let mut wb = MemorySheets::new()
            .with_sheet("Good", table)
            .with_failing_sheet("Bad", "boom");
        let summary = cost::reconcile(&mut wb, Some("Repairing Cost"), None);

        prop_assert_eq!(summary.grand_total.all_cost, expected);
        let is_read_error = matches!(summary.rows[1].status, SheetStatus::ReadError { .. });
        prop_assert!(is_read_error);
    }
}

// =============================================================================
// Risk Scoring Properties
// =============================================================================

proptest! {
    /// Every risk score stays within [0, 100].
    #[test]
    fn risk_scores_stay_bounded(values in downtime_series(10..60)) {
        let profile = risk::score(&values).expect("enough records");

        for point in &profile.points {
            prop_assert!(point.score >= 0.0);
            prop_assert!(point.score <= 100.0);
        }
        prop_assert!(profile.current_risk >= 0.0 && profile.current_risk <= 100.0);
        prop_assert!(profile.avg_risk >= 0.0 && profile.avg_risk <= 100.0);
        prop_assert!(profile.recent_failures <= 10);
    }

    /// Below ten records there is never a score.
    #[test]
    fn short_series_never_score(values in downtime_series(0..10)) {
        prop_assert!(risk::score(&values).is_none());
    }

    /// The forecast, when present, is internally consistent.
    #[test]
    fn forecast_is_consistent(values in downtime_series(10..60)) {
        let profile = risk::score(&values).expect("enough records");

        if let Some(forecast) = &profile.forecast {
            prop_assert!(forecast.avg_interval > 0.0);
            prop_assert!(forecast.std_interval >= 0.0);
            prop_assert!(forecast.estimated_records_until_next_failure >= 0.0);
            prop_assert!(forecast.confidence >= 0.0 && forecast.confidence <= 100.0);
        }

        // Fewer than two failures can never produce a forecast.
        let failures = values.iter().filter(|v| **v > 0.0).count();
        if failures < 2 {
            prop_assert!(profile.forecast.is_none());
        }
    }

    /// Scoring is deterministic.
    #[test]
    fn risk_is_deterministic(values in downtime_series(10..40)) {
        prop_assert_eq!(risk::score(&values), risk::score(&values));
    }
}
