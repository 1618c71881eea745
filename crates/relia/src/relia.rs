//! Main Relia engine and dashboard report.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::cost::{self, CostSummary, SheetStatus};
use crate::diagnostic::{Diagnostic, Severity};
use crate::error::{ReliaError, Result};
use crate::input::{SheetReader, SourceMetadata, open_workbook};
use crate::metrics::{self, AnalysisSettings, EventSeries, ReasonBreakdown, ReliabilityMetrics};
use crate::resolve::{BindingOverrides, ColumnBindings, ColumnRole};
use crate::risk::{self, HealthStatus, RiskProfile};

/// Configuration for a dashboard analysis.
///
/// This is the explicit, immutable request context: every analysis takes
/// the whole configuration up front and recomputes the full report from
/// the raw sheets. No partial state is cached between calls.
#[derive(Debug, Clone, Default)]
pub struct ReliaConfig {
    /// Sheet to analyze (None = first sheet).
    pub sheet: Option<String>,
    /// Title rows discarded before the header row, on every sheet.
    pub skip_rows: usize,
    /// Observation period and display unit.
    pub settings: AnalysisSettings,
    /// User-confirmed column names used as matching seeds.
    pub overrides: BindingOverrides,
}

/// Result of analyzing a workbook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardReport {
    /// Metadata about the source workbook.
    pub source: SourceMetadata,
    /// Column bindings resolved on the primary sheet.
    pub bindings: ColumnBindings,
    /// Reliability metrics for the primary sheet.
    pub reliability: ReliabilityMetrics,
    /// Per-record operating/downtime series, in display units.
    pub series: EventSeries,
    /// Failure-reason distribution, when a reason column is present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasons: Option<ReasonBreakdown>,
    /// Sheet-by-sheet cost reconciliation.
    pub costs: CostSummary,
    /// Risk profile, when the sheet has enough records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk: Option<RiskProfile>,
    /// Non-fatal warnings and notes.
    pub diagnostics: Vec<Diagnostic>,
    /// Headline numbers and a recommendation.
    pub summary: DashboardSummary,
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub record_count: usize,
    pub sheet_count: usize,
    pub failure_count: usize,
    pub grand_total_cost: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<HealthStatus>,
    pub alert: bool,
    /// Human-readable recommendation.
    pub recommendation: String,
}

/// The main analysis engine.
pub struct Relia {
    config: ReliaConfig,
}

impl Relia {
    /// Create a new engine with default configuration.
    pub fn new() -> Self {
        Self::with_config(ReliaConfig::default())
    }

    /// Create an engine with custom configuration.
    pub fn with_config(config: ReliaConfig) -> Self {
        Self { config }
    }

    /// Analyze a workbook file and produce the dashboard report.
    pub fn analyze(&self, path: impl AsRef<Path>) -> Result<DashboardReport> {
        let path = path.as_ref();

        // Hash the raw bytes for provenance before parsing.
        let mut file = File::open(path).map_err(|e| ReliaError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| ReliaError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());
        let size_bytes = contents.len() as u64;
        drop(contents);

        let mut reader = open_workbook(path, self.config.skip_rows)?;
        let mut report = self.analyze_sheets(reader.as_mut())?;

        report.source.file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        report.source.path = path.to_path_buf();
        report.source.hash = hash;
        report.source.size_bytes = size_bytes;
        report.source.format = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        Ok(report)
    }

    /// Analyze an already-open sheet source.
    ///
    /// This is the entry point for in-memory workbooks; `analyze` wraps
    /// it with file provenance.
    pub fn analyze_sheets(&self, reader: &mut dyn SheetReader) -> Result<DashboardReport> {
        self.config.settings.validate()?;

        let names = reader.sheet_names();
        if names.is_empty() {
            return Err(ReliaError::EmptyData("workbook has no sheets".to_string()));
        }

        let primary = match &self.config.sheet {
            Some(wanted) => names
                .iter()
                .find(|n| *n == wanted)
                .cloned()
                .ok_or_else(|| ReliaError::SheetNotFound(wanted.clone()))?,
            None => names[0].clone(),
        };

        // The primary sheet must parse; everything downstream degrades.
        let table = reader.read_sheet(&primary)?;
        if table.headers.is_empty() {
            return Err(ReliaError::EmptyData(format!(
                "sheet '{primary}' has no columns"
            )));
        }

        let bindings = ColumnBindings::resolve(&table, &self.config.overrides)?;
        let mut diagnostics = Vec::new();
        self.check_overrides(&table.headers, &mut diagnostics);

        let (reliability, series) = metrics::compute(&table, &bindings, &self.config.settings);

        let downtime = table
            .numeric_column(&bindings.downtime)
            .unwrap_or_default();
        if !table.rows.is_empty() && downtime.iter().sum::<f64>() == 0.0 {
            diagnostics.push(Diagnostic::warning(format!(
                "Column '{}' contains only zeros or non-numeric data; select the correct downtime column",
                bindings.downtime
            )));
        }

        if let Some(department) = bindings.department.as_deref() {
            if reliability.maintenance_excluded > 0 {
                diagnostics.push(Diagnostic::info(format!(
                    "{} MAINTENANCE rows excluded from repair metrics",
                    reliability.maintenance_excluded
                )));
            } else {
                diagnostics.push(Diagnostic::info(format!(
                    "No MAINTENANCE rows found in '{department}'"
                )));
            }
        }

        let reasons = metrics::breakdown(&table, &bindings);
        if reasons.is_none() {
            diagnostics.push(Diagnostic::info(
                "No reason column found; reason distribution skipped",
            ));
        }

        let costs = cost::reconcile(
            reader,
            bindings.cost.as_deref(),
            bindings.department.as_deref(),
        );
        for row in &costs.rows {
            if let SheetStatus::ReadError { message } = &row.status {
                diagnostics.push(Diagnostic::error(format!(
                    "Sheet '{}' could not be read: {message}",
                    row.sheet
                )));
            }
        }

        let risk = risk::score(&downtime);
        if risk.is_none() {
            diagnostics.push(Diagnostic::info(format!(
                "At least {} records are needed for risk scoring; found {}",
                risk::MIN_RECORDS,
                table.row_count()
            )));
        }

        let summary = build_summary(
            table.row_count(),
            names.len(),
            &reliability,
            &costs,
            risk.as_ref(),
            &diagnostics,
        );

        Ok(DashboardReport {
            source: SourceMetadata::in_memory(
                &primary,
                names.len(),
                table.row_count(),
                table.column_count(),
            ),
            bindings,
            reliability,
            series,
            reasons,
            costs,
            risk,
            diagnostics,
            summary,
        })
    }

    /// Warn about user-chosen column names that do not exist on the
    /// primary sheet; the run continues on the fuzzy fallback.
    fn check_overrides(&self, headers: &[String], diagnostics: &mut Vec<Diagnostic>) {
        let overrides = &self.config.overrides;
        let chosen = [
            (ColumnRole::Downtime, overrides.downtime.as_deref()),
            (ColumnRole::RepairTime, overrides.repair_time.as_deref()),
            (ColumnRole::Department, overrides.department.as_deref()),
            (ColumnRole::Cost, overrides.cost.as_deref()),
        ];

        for (role, name) in chosen {
            let Some(name) = name else { continue };
            let wanted = name.trim().to_lowercase();
            let present = headers.iter().any(|h| h.trim().to_lowercase() == wanted);
            if !present {
                diagnostics.push(Diagnostic::warning(format!(
                    "Selected {} column '{name}' was not found on the primary sheet",
                    role.label()
                )));
            }
        }
    }
}

impl Default for Relia {
    fn default() -> Self {
        Self::new()
    }
}

fn build_summary(
    record_count: usize,
    sheet_count: usize,
    reliability: &ReliabilityMetrics,
    costs: &CostSummary,
    risk: Option<&RiskProfile>,
    diagnostics: &[Diagnostic],
) -> DashboardSummary {
    let warnings = diagnostics
        .iter()
        .filter(|d| d.severity >= Severity::Warning)
        .count();

    let recommendation = generate_recommendation(risk, warnings);

    DashboardSummary {
        record_count,
        sheet_count,
        failure_count: reliability.num_failures,
        grand_total_cost: costs.grand_total.all_cost,
        health: risk.map(|r| r.health),
        alert: risk.is_some_and(|r| r.alert),
        recommendation,
    }
}

/// Generate a recommendation from the risk profile and warning count.
fn generate_recommendation(risk: Option<&RiskProfile>, warnings: usize) -> String {
    if let Some(risk) = risk {
        if risk.alert {
            if let Some(forecast) = &risk.forecast {
                return format!(
                    "Failure expected within {:.0} records at {:.0}% confidence; schedule an inspection now.",
                    forecast.estimated_records_until_next_failure, forecast.confidence
                );
            }
        }
        match risk.health {
            HealthStatus::Critical => {
                return format!(
                    "Current risk score is {:.0}; investigate the most recent downtime events before the next failure.",
                    risk.current_risk
                );
            }
            HealthStatus::Warning => {
                return "Risk trend is elevated. Review the highest-downtime events.".to_string();
            }
            HealthStatus::Good => {}
        }
    }

    if warnings > 0 {
        format!("Review {warnings} warning(s) before trusting these metrics.")
    } else {
        "Equipment health looks good. No action required.".to_string()
    }
}
