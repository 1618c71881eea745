//! Failure-reason distribution.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::input::EventTable;
use crate::resolve::ColumnBindings;

/// Reasons beyond the top N collapse into one bucket.
const TOP_REASONS: usize = 10;
const OTHERS_LABEL: &str = "OTHERS";

/// Failure-reason counts over failure rows, in descending order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasonBreakdown {
    /// The reason column the counts came from.
    pub column: String,
    /// Count per reason, descending; at most ten entries plus "OTHERS".
    pub counts: IndexMap<String, usize>,
}

/// Count reasons across rows with positive downtime.
///
/// Returns `None` when no reason column is bound. Blank reasons are
/// skipped; ties keep first-occurrence order.
pub fn breakdown(table: &EventTable, bindings: &ColumnBindings) -> Option<ReasonBreakdown> {
    let column = bindings.reason.as_deref()?;
    let reason_idx = table.column_index(column)?;
    let downtime = table.numeric_column(&bindings.downtime)?;

    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for (row, dt) in table.rows.iter().zip(&downtime) {
        if *dt <= 0.0 {
            continue;
        }
        let reason = row
            .get(reason_idx)
            .map(|s| s.trim())
            .unwrap_or_default();
        if reason.is_empty() {
            continue;
        }
        *counts.entry(reason.to_string()).or_insert(0) += 1;
    }

    counts.sort_by(|_, a, _, b| b.cmp(a));

    if counts.len() > TOP_REASONS {
        let others: usize = counts.values().skip(TOP_REASONS).sum();
        counts.truncate(TOP_REASONS);
        counts.insert(OTHERS_LABEL.to_string(), others);
    }

    Some(ReasonBreakdown {
        column: column.to_string(),
        counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::BindingOverrides;

    fn table(rows: &[(&str, &str)]) -> EventTable {
        EventTable::new(
            vec!["Equipment Downtime (Minutes)".to_string(), "Reason".to_string()],
            rows.iter()
                .map(|(d, r)| vec![d.to_string(), r.to_string()])
                .collect(),
        )
    }

    fn bindings(t: &EventTable) -> ColumnBindings {
        ColumnBindings::resolve(t, &BindingOverrides::new()).unwrap()
    }

    #[test]
    fn test_counts_failure_rows_only() {
        let t = table(&[
            ("30", "CRANE"),
            ("0", "OK"),
            ("15", "CRANE"),
            ("45", "MOTOR"),
        ]);
        let b = breakdown(&t, &bindings(&t)).unwrap();

        assert_eq!(b.counts.get("CRANE"), Some(&2));
        assert_eq!(b.counts.get("MOTOR"), Some(&1));
        // Zero-downtime rows never contribute a reason.
        assert_eq!(b.counts.get("OK"), None);
    }

    #[test]
    fn test_descending_order() {
        let t = table(&[("10", "A"), ("10", "B"), ("10", "B"), ("10", "B"), ("10", "A")]);
        let b = breakdown(&t, &bindings(&t)).unwrap();

        let order: Vec<&str> = b.counts.keys().map(|k| k.as_str()).collect();
        assert_eq!(order, vec!["B", "A"]);
    }

    #[test]
    fn test_others_bucket() {
        let rows: Vec<(String, String)> = (0..12)
            .flat_map(|i| {
                // reason i appears (12 - i) times so the tail is deterministic
                std::iter::repeat_n(("10".to_string(), format!("R{i:02}")), 12 - i)
            })
            .collect();
        let rows: Vec<(&str, &str)> = rows.iter().map(|(d, r)| (d.as_str(), r.as_str())).collect();
        let t = table(&rows);
        let b = breakdown(&t, &bindings(&t)).unwrap();

        assert_eq!(b.counts.len(), TOP_REASONS + 1);
        // R10 appears twice, R11 once; both fold into OTHERS.
        assert_eq!(b.counts.get(OTHERS_LABEL), Some(&3));
        assert_eq!(b.counts.get("R10"), None);
    }

    #[test]
    fn test_blank_reasons_skipped() {
        let t = table(&[("30", ""), ("15", "  "), ("45", "MOTOR")]);
        let b = breakdown(&t, &bindings(&t)).unwrap();

        assert_eq!(b.counts.len(), 1);
        assert_eq!(b.counts.get("MOTOR"), Some(&1));
    }

    #[test]
    fn test_no_reason_column() {
        let t = EventTable::new(
            vec!["Equipment Downtime (Minutes)".to_string()],
            vec![vec!["30".to_string()]],
        );
        assert_eq!(breakdown(&t, &bindings(&t)), None);
    }
}
