//! Column resolution: semantic roles to concrete sheet columns.
//!
//! Matching is deliberately simple: exact on the seed name, then case-
//! and whitespace-insensitive on the seed, then first-in-order substring
//! on the role keywords. No edit distance; when several columns match a
//! keyword, the earliest column in sheet order wins.

use serde::{Deserialize, Serialize};

use crate::error::{ReliaError, Result};
use crate::input::EventTable;

/// Semantic role a column can play in the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    /// Equipment downtime per record, in minutes.
    Downtime,
    /// Repair time per record, in minutes.
    RepairTime,
    /// Department that handled the event.
    Department,
    /// Repair cost per record.
    Cost,
    /// Free-text failure reason.
    Reason,
}

impl ColumnRole {
    /// Substring keywords searched when no seed name matches.
    ///
    /// The repair-time role has none: its default seed is the resolved
    /// downtime column.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            ColumnRole::Downtime => &["equipment downtime"],
            ColumnRole::RepairTime => &[],
            ColumnRole::Department => &["department", "dept"],
            ColumnRole::Cost => &["cost"],
            ColumnRole::Reason => &["reason"],
        }
    }

    /// Get a human-readable label for the role.
    pub fn label(&self) -> &'static str {
        match self {
            ColumnRole::Downtime => "Downtime",
            ColumnRole::RepairTime => "Repair Time",
            ColumnRole::Department => "Department",
            ColumnRole::Cost => "Cost",
            ColumnRole::Reason => "Reason",
        }
    }
}

/// Resolve a role against a sheet's column names.
///
/// Returns the matched concrete column name, or `None` when nothing
/// matches. Callers treat `None` as "skip/zero contribution", never as a
/// fatal error.
pub fn resolve_column(headers: &[String], role: ColumnRole, seed: Option<&str>) -> Option<String> {
    if let Some(seed) = seed {
        // 1. The literal seed name exists on this sheet.
        if headers.iter().any(|h| h == seed) {
            return Some(seed.to_string());
        }
        // 2. Same name modulo case and surrounding whitespace.
        let normalized = seed.trim().to_lowercase();
        if let Some(hit) = headers.iter().find(|h| h.trim().to_lowercase() == normalized) {
            return Some(hit.clone());
        }
    }

    // 3. First column containing a role keyword, in sheet order.
    headers
        .iter()
        .find(|h| {
            let lower = h.to_lowercase();
            role.keywords().iter().any(|kw| lower.contains(kw))
        })
        .cloned()
}

/// User-confirmed column names, used as matching seeds on every sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingOverrides {
    pub downtime: Option<String>,
    pub repair_time: Option<String>,
    pub department: Option<String>,
    pub cost: Option<String>,
}

impl BindingOverrides {
    /// No overrides; every role resolves by keyword.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the downtime column name.
    pub fn with_downtime(mut self, name: impl Into<String>) -> Self {
        self.downtime = Some(name.into());
        self
    }

    /// Set the repair-time column name.
    pub fn with_repair_time(mut self, name: impl Into<String>) -> Self {
        self.repair_time = Some(name.into());
        self
    }

    /// Set the department column name.
    pub fn with_department(mut self, name: impl Into<String>) -> Self {
        self.department = Some(name.into());
        self
    }

    /// Set the cost column name.
    pub fn with_cost(mut self, name: impl Into<String>) -> Self {
        self.cost = Some(name.into());
        self
    }
}

/// Concrete column bindings for the primary sheet.
///
/// A binding is either a column name present on the sheet or explicitly
/// absent, never a silent partial match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnBindings {
    pub downtime: String,
    pub repair_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ColumnBindings {
    /// Resolve bindings for the primary sheet.
    ///
    /// Downtime falls back to the first column when nothing matches (the
    /// run then degrades to zero metrics plus a warning rather than
    /// aborting); the repair column defaults to the downtime column; the
    /// optional roles stay absent when unmatched.
    pub fn resolve(table: &EventTable, overrides: &BindingOverrides) -> Result<Self> {
        let headers = &table.headers;
        if headers.is_empty() {
            return Err(ReliaError::EmptyData("sheet has no columns".to_string()));
        }

        let downtime = resolve_column(headers, ColumnRole::Downtime, overrides.downtime.as_deref())
            .unwrap_or_else(|| headers[0].clone());

        let repair_seed = overrides.repair_time.as_deref().unwrap_or(&downtime);
        let repair_time = resolve_column(headers, ColumnRole::RepairTime, Some(repair_seed))
            .unwrap_or_else(|| downtime.clone());

        let department =
            resolve_column(headers, ColumnRole::Department, overrides.department.as_deref());
        let cost = resolve_column(headers, ColumnRole::Cost, overrides.cost.as_deref());
        let reason = resolve_column(headers, ColumnRole::Reason, None);

        Ok(Self {
            downtime,
            repair_time,
            department,
            cost,
            reason,
        })
    }
}
