//! Reliability metrics: MTTF, MTTR, failure and repair rates.

use serde::{Deserialize, Serialize};

use super::settings::{AnalysisSettings, TimeUnit};
use crate::input::EventTable;
use crate::resolve::ColumnBindings;

/// Rows from this department are excluded from repair aggregates.
const EXCLUDED_DEPARTMENT: &str = "MAINTENANCE";

/// Aggregate reliability metrics for one sheet.
///
/// Every mean/rate degrades to 0 when its denominator is 0; none of these
/// computations can divide by zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityMetrics {
    /// Unit the durations are expressed in.
    pub unit: TimeUnit,
    /// Total operating time across all records.
    pub total_operating_time: f64,
    /// Records with strictly positive downtime.
    pub num_failures: usize,
    /// Mean time to failure.
    pub mttf: f64,
    /// Failure rate (lambda), the reciprocal of MTTF.
    pub failure_rate: f64,
    /// Total repair time over the repair track.
    pub total_repair_time: f64,
    /// Records with strictly positive repair time, over the repair track.
    pub num_repairs: usize,
    /// Mean time to repair.
    pub mttr: f64,
    /// Repair rate (mu), the reciprocal of MTTR.
    pub repair_rate: f64,
    /// Rows excluded from the repair track by the MAINTENANCE filter.
    pub maintenance_excluded: usize,
}

/// Per-record time series in display units, for chart collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSeries {
    pub operating: Vec<f64>,
    pub downtime: Vec<f64>,
}

/// Check whether a department cell names the excluded department.
/// Matching is exact after trimming and upper-casing.
pub fn is_excluded_department(cell: &str) -> bool {
    cell.trim().to_uppercase() == EXCLUDED_DEPARTMENT
}

/// Compute reliability metrics and the per-record series for one sheet.
///
/// The failure track always uses every record; the repair track excludes
/// MAINTENANCE rows when a department column is bound. The two tracks
/// intentionally aggregate over different row populations.
pub fn compute(
    table: &EventTable,
    bindings: &ColumnBindings,
    settings: &AnalysisSettings,
) -> (ReliabilityMetrics, EventSeries) {
    let n = table.row_count();
    let downtime = table
        .numeric_column(&bindings.downtime)
        .unwrap_or_else(|| vec![0.0; n]);
    let repair = table
        .numeric_column(&bindings.repair_time)
        .unwrap_or_else(|| vec![0.0; n]);

    let period = settings.observation_period;
    let factor = settings.unit.factor();

    let operating: Vec<f64> = downtime
        .iter()
        .map(|d| (period - d).clamp(0.0, period))
        .collect();
    let total_operating_time = operating.iter().sum::<f64>() / factor;
    let num_failures = downtime.iter().filter(|d| **d > 0.0).count();

    let in_repair_track: Vec<bool> = match bindings
        .department
        .as_deref()
        .and_then(|name| table.column_index(name))
    {
        Some(col) => table
            .rows
            .iter()
            .map(|row| {
                let cell = row.get(col).map(|s| s.as_str()).unwrap_or("");
                !is_excluded_department(cell)
            })
            .collect(),
        None => vec![true; n],
    };
    let maintenance_excluded = in_repair_track.iter().filter(|keep| !**keep).count();

    let total_repair_time = repair
        .iter()
        .zip(&in_repair_track)
        .filter(|(_, keep)| **keep)
        .map(|(r, _)| *r)
        .sum::<f64>()
        / factor;
    let num_repairs = repair
        .iter()
        .zip(&in_repair_track)
        .filter(|(r, keep)| **keep && **r > 0.0)
        .count();

    let mttf = if num_failures > 0 {
        total_operating_time / num_failures as f64
    } else {
        0.0
    };
    let failure_rate = if mttf > 0.0 { 1.0 / mttf } else { 0.0 };

    let mttr = if num_repairs > 0 {
        total_repair_time / num_repairs as f64
    } else {
        0.0
    };
    let repair_rate = if mttr > 0.0 { 1.0 / mttr } else { 0.0 };

    let series = EventSeries {
        operating: operating.iter().map(|v| v / factor).collect(),
        downtime: downtime.iter().map(|v| v / factor).collect(),
    };

    let metrics = ReliabilityMetrics {
        unit: settings.unit,
        total_operating_time,
        num_failures,
        mttf,
        failure_rate,
        total_repair_time,
        num_repairs,
        mttr,
        repair_rate,
        maintenance_excluded,
    };

    (metrics, series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::BindingOverrides;

    fn table_with(downtime: &[&str], department: Option<&[&str]>) -> EventTable {
        let mut headers = vec!["Equipment Downtime (Minutes)".to_string()];
        if department.is_some() {
            headers.push("Department".to_string());
        }
        let rows = downtime
            .iter()
            .enumerate()
            .map(|(i, d)| {
                let mut row = vec![d.to_string()];
                if let Some(dept) = department {
                    row.push(dept[i].to_string());
                }
                row
            })
            .collect();
        EventTable::new(headers, rows)
    }

    fn bindings(table: &EventTable) -> ColumnBindings {
        ColumnBindings::resolve(table, &BindingOverrides::new()).unwrap()
    }

    fn minutes() -> AnalysisSettings {
        AnalysisSettings::default().with_unit(TimeUnit::Minutes)
    }

    #[test]
    fn test_scenario_a_mttf() {
        // downtime [15, 30, 10, 0, 45] over a 1440-minute period
        let t = table_with(&["15", "30", "10", "0", "45"], None);
        let (m, _) = compute(&t, &bindings(&t), &minutes());

        assert_eq!(m.num_failures, 4);
        assert_eq!(m.total_operating_time, 7100.0);
        assert_eq!(m.mttf, 1775.0);
        assert_eq!(m.failure_rate, 1.0 / 1775.0);
    }

    #[test]
    fn test_scenario_b_maintenance_exclusion() {
        let t = table_with(
            &["15", "30", "10", "20", "45"],
            Some(&["MAINTENANCE", "OPS", "ops ", " Maintenance", "OPS"]),
        );
        let (m, _) = compute(&t, &bindings(&t), &minutes());

        assert_eq!(m.maintenance_excluded, 2);
        // Repair track loses rows 0 and 3 (15 + 20 minutes).
        assert_eq!(m.total_repair_time, 30.0 + 10.0 + 45.0);
        assert_eq!(m.num_repairs, 3);
        // The failure track never filters.
        assert_eq!(m.num_failures, 5);
    }

    #[test]
    fn test_exclusion_does_not_touch_failure_track() {
        let with_dept = table_with(&["30", "0", "60"], Some(&["MAINTENANCE", "OPS", "OPS"]));
        let without_dept = table_with(&["30", "0", "60"], None);

        let (a, _) = compute(&with_dept, &bindings(&with_dept), &minutes());
        let (b, _) = compute(&without_dept, &bindings(&without_dept), &minutes());

        assert_eq!(a.num_failures, b.num_failures);
        assert_eq!(a.mttf, b.mttf);
        assert_eq!(a.failure_rate, b.failure_rate);
    }

    #[test]
    fn test_no_department_binding_means_no_exclusion() {
        let t = table_with(&["30", "45"], None);
        let (m, _) = compute(&t, &bindings(&t), &minutes());

        assert_eq!(m.maintenance_excluded, 0);
        assert_eq!(m.num_repairs, 2);
    }

    #[test]
    fn test_zero_failures_degrade_to_zero() {
        let t = table_with(&["0", "0", "junk"], None);
        let (m, _) = compute(&t, &bindings(&t), &minutes());

        assert_eq!(m.num_failures, 0);
        assert_eq!(m.mttf, 0.0);
        assert_eq!(m.failure_rate, 0.0);
        assert_eq!(m.num_repairs, 0);
        assert_eq!(m.mttr, 0.0);
        assert_eq!(m.repair_rate, 0.0);
    }

    #[test]
    fn test_downtime_beyond_period_floors_operating_time() {
        let t = table_with(&["2000"], None);
        let (m, series) = compute(&t, &bindings(&t), &minutes());

        assert_eq!(series.operating[0], 0.0);
        assert_eq!(m.total_operating_time, 0.0);
        assert_eq!(m.num_failures, 1);
        assert_eq!(m.mttf, 0.0);
    }

    #[test]
    fn test_negative_downtime_caps_operating_time_at_period() {
        let t = table_with(&["-50"], None);
        let (m, series) = compute(&t, &bindings(&t), &minutes());

        assert_eq!(series.operating[0], 1440.0);
        assert_eq!(m.num_failures, 0);
    }

    #[test]
    fn test_hours_conversion() {
        let t = table_with(&["15", "30", "10", "0", "45"], None);
        let settings = AnalysisSettings::default().with_unit(TimeUnit::Hours);
        let (m, series) = compute(&t, &bindings(&t), &settings);

        assert!((m.total_operating_time - 7100.0 / 60.0).abs() < 1e-9);
        assert!((m.mttf - 1775.0 / 60.0).abs() < 1e-9);
        assert!((series.downtime[1] - 0.5).abs() < 1e-9);
        // Counts never convert.
        assert_eq!(m.num_failures, 4);
    }

    #[test]
    fn test_is_excluded_department() {
        assert!(is_excluded_department("MAINTENANCE"));
        assert!(is_excluded_department("  maintenance "));
        assert!(!is_excluded_department("OPS"));
        assert!(!is_excluded_department("MAINTENANCE DEPT"));
        assert!(!is_excluded_department(""));
    }
}
