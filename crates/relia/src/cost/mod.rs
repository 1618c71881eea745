//! Multi-sheet cost reconciliation.
//!
//! Every sheet of the workbook resolves its own cost and department
//! columns from the primary-sheet seeds, so differently named or cased
//! columns on different sheets still reconcile. One sheet's failure is
//! recorded in its row and never aborts the remaining sheets.

use serde::{Deserialize, Serialize};

use crate::input::{EventTable, SheetReader};
use crate::metrics::is_excluded_department;
use crate::resolve::{ColumnRole, resolve_column};

/// Error text kept for display on a failed sheet.
const ERROR_PREVIEW_LEN: usize = 30;

/// Outcome of reconciling one sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SheetStatus {
    /// A cost column resolved and was summed.
    Success,
    /// No cost column matched; the sheet contributes zero.
    MissingCostColumn,
    /// The sheet could not be read; the rest still process.
    ReadError { message: String },
}

impl SheetStatus {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            SheetStatus::Success => "Success",
            SheetStatus::MissingCostColumn => "Cost Column Missing",
            SheetStatus::ReadError { .. } => "Error",
        }
    }
}

/// Per-sheet cost aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSummaryRow {
    pub sheet: String,
    /// Sum of the resolved cost column.
    pub all_cost: f64,
    /// Cost excluding MAINTENANCE rows; equals `all_cost` when no
    /// department column resolves.
    pub exclude_maintenance: f64,
    pub status: SheetStatus,
}

/// Field-wise sum over all sheets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GrandTotal {
    pub all_cost: f64,
    pub exclude_maintenance: f64,
}

/// The whole reconciliation: one row per sheet plus grand totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSummary {
    pub rows: Vec<CostSummaryRow>,
    pub grand_total: GrandTotal,
}

impl CostSummary {
    /// Count sheets that reconciled successfully.
    pub fn successful_sheets(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.status == SheetStatus::Success)
            .count()
    }
}

/// Reconcile costs across every sheet of the workbook.
pub fn reconcile(
    reader: &mut dyn SheetReader,
    cost_seed: Option<&str>,
    department_seed: Option<&str>,
) -> CostSummary {
    let mut rows = Vec::new();

    for sheet in reader.sheet_names() {
        let row = match reader.read_sheet(&sheet) {
            Ok(table) => reconcile_sheet(&sheet, &table, cost_seed, department_seed),
            Err(e) => CostSummaryRow {
                sheet,
                all_cost: 0.0,
                exclude_maintenance: 0.0,
                status: SheetStatus::ReadError {
                    message: truncate(&e.to_string(), ERROR_PREVIEW_LEN),
                },
            },
        };
        rows.push(row);
    }

    let grand_total = rows.iter().fold(GrandTotal::default(), |mut acc, row| {
        acc.all_cost += row.all_cost;
        acc.exclude_maintenance += row.exclude_maintenance;
        acc
    });

    CostSummary { rows, grand_total }
}

fn reconcile_sheet(
    sheet: &str,
    table: &EventTable,
    cost_seed: Option<&str>,
    department_seed: Option<&str>,
) -> CostSummaryRow {
    let Some(cost_col) = resolve_column(&table.headers, ColumnRole::Cost, cost_seed) else {
        return CostSummaryRow {
            sheet: sheet.to_string(),
            all_cost: 0.0,
            exclude_maintenance: 0.0,
            status: SheetStatus::MissingCostColumn,
        };
    };

    let costs = table
        .numeric_column(&cost_col)
        .unwrap_or_else(|| vec![0.0; table.row_count()]);
    let all_cost: f64 = costs.iter().sum();

    let department = resolve_column(&table.headers, ColumnRole::Department, department_seed)
        .and_then(|name| table.column_index(&name));
    let exclude_maintenance = match department {
        Some(dept_idx) => table
            .rows
            .iter()
            .zip(&costs)
            .filter(|(row, _)| {
                let cell = row.get(dept_idx).map(|s| s.as_str()).unwrap_or("");
                !is_excluded_department(cell)
            })
            .map(|(_, cost)| *cost)
            .sum(),
        // Nothing to filter on means nothing is excluded.
        None => all_cost,
    };

    CostSummaryRow {
        sheet: sheet.to_string(),
        all_cost,
        exclude_maintenance,
        status: SheetStatus::Success,
    }
}

fn truncate(message: &str, limit: usize) -> String {
    if message.chars().count() <= limit {
        message.to_string()
    } else {
        let cut: String = message.chars().take(limit).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MemorySheets;

    fn sheet(headers: &[&str], rows: &[&[&str]]) -> EventTable {
        EventTable::new(
            headers.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_scenario_c_exact_and_substring_resolution() {
        // Sheet1 carries the seed name exactly; Sheet2 only matches the
        // "cost" substring.
        let mut wb = MemorySheets::new()
            .with_sheet(
                "Sheet1",
                sheet(&["Repairing Cost"], &[&["100"], &["200"]]),
            )
            .with_sheet("Sheet2", sheet(&["Cost (INR)"], &[&["50"], &["50"]]));

        let summary = reconcile(&mut wb, Some("Repairing Cost"), None);

        assert_eq!(summary.rows.len(), 2);
        assert_eq!(summary.rows[0].all_cost, 300.0);
        assert_eq!(summary.rows[1].all_cost, 100.0);
        assert!(summary.rows.iter().all(|r| r.status == SheetStatus::Success));
        assert_eq!(summary.grand_total.all_cost, 400.0);
        assert_eq!(summary.grand_total.exclude_maintenance, 400.0);
    }

    #[test]
    fn test_maintenance_exclusion_per_sheet() {
        let mut wb = MemorySheets::new().with_sheet(
            "Sheet1",
            sheet(
                &["Repairing Cost", "Department"],
                &[&["100", "MAINTENANCE"], &["200", "OPS"], &["50", " maintenance "]],
            ),
        );

        let summary = reconcile(&mut wb, Some("Repairing Cost"), Some("Department"));

        assert_eq!(summary.rows[0].all_cost, 350.0);
        assert_eq!(summary.rows[0].exclude_maintenance, 200.0);
    }

    #[test]
    fn test_no_department_column_excludes_nothing() {
        let mut wb = MemorySheets::new()
            .with_sheet("Sheet1", sheet(&["Repairing Cost"], &[&["100"], &["200"]]));

        let summary = reconcile(&mut wb, Some("Repairing Cost"), Some("Department"));

        assert_eq!(summary.rows[0].exclude_maintenance, 300.0);
    }

    #[test]
    fn test_missing_cost_column() {
        let mut wb = MemorySheets::new()
            .with_sheet("Sheet1", sheet(&["Repairing Cost"], &[&["100"]]))
            .with_sheet("Notes", sheet(&["Comment"], &[&["hello"]]));

        let summary = reconcile(&mut wb, Some("Repairing Cost"), None);

        assert_eq!(summary.rows[1].status, SheetStatus::MissingCostColumn);
        assert_eq!(summary.rows[1].all_cost, 0.0);
        assert_eq!(summary.grand_total.all_cost, 100.0);
        assert_eq!(summary.successful_sheets(), 1);
    }

    #[test]
    fn test_read_error_isolated_per_sheet() {
        let mut wb = MemorySheets::new()
            .with_sheet("Good", sheet(&["Cost"], &[&["100"]]))
            .with_failing_sheet("Bad", "corrupt record in row 7")
            .with_sheet("AlsoGood", sheet(&["Cost"], &[&["25"]]));

        let summary = reconcile(&mut wb, None, None);

        assert_eq!(summary.rows.len(), 3);
        assert!(matches!(summary.rows[1].status, SheetStatus::ReadError { .. }));
        assert_eq!(summary.rows[1].all_cost, 0.0);
        assert_eq!(summary.grand_total.all_cost, 125.0);
        assert_eq!(summary.successful_sheets(), 2);
    }

    #[test]
    fn test_error_message_truncated() {
        let long = "x".repeat(100);
        let mut wb = MemorySheets::new().with_failing_sheet("Bad", long);

        let summary = reconcile(&mut wb, None, None);

        let SheetStatus::ReadError { message } = &summary.rows[0].status else {
            panic!("expected read error");
        };
        assert!(message.chars().count() <= ERROR_PREVIEW_LEN + 3);
        assert!(message.ends_with("..."));
    }

    #[test]
    fn test_non_numeric_costs_coerce_to_zero() {
        let mut wb = MemorySheets::new().with_sheet(
            "Sheet1",
            sheet(&["Cost"], &[&["100"], &["n/a"], &["50"]]),
        );

        let summary = reconcile(&mut wb, None, None);

        assert_eq!(summary.rows[0].all_cost, 150.0);
    }
}
