//! Relia: reliability and failure analytics for spreadsheet event data.
//!
//! Relia turns a workbook of equipment failure/repair events into
//! classical reliability metrics (MTTF, MTTR, failure and repair rates),
//! a sheet-by-sheet cost reconciliation, and a rolling risk profile with
//! a next-failure forecast.
//!
//! # Core Principles
//!
//! - **Degrade, don't abort**: bad cells coerce to zero, zero
//!   denominators yield zero rates, and one broken sheet never stops the
//!   others. Only an unparseable workbook is fatal.
//! - **Deterministic resolution**: columns match by exact or substring
//!   name; when several match, the first in sheet order wins.
//! - **Plain-value results**: every output is a serializable value with
//!   no behavior, recomputed wholesale per request.
//!
//! # Example
//!
//! ```no_run
//! use relia::Relia;
//!
//! let relia = Relia::new();
//! let report = relia.analyze("failure_data.xlsx").unwrap();
//!
//! println!("MTTF: {:.2} {}", report.reliability.mttf, report.reliability.unit.label());
//! println!("Grand total cost: {:.2}", report.costs.grand_total.all_cost);
//! ```

pub mod cost;
pub mod diagnostic;
pub mod error;
pub mod input;
pub mod metrics;
pub mod resolve;
pub mod risk;

mod relia;

pub use crate::relia::{DashboardReport, DashboardSummary, Relia, ReliaConfig};
pub use cost::{CostSummary, CostSummaryRow, GrandTotal, SheetStatus};
pub use diagnostic::{Diagnostic, Severity};
pub use error::{ReliaError, Result};
pub use input::{
    CsvWorkbook, EventTable, ExcelWorkbook, MemorySheets, SheetReader, SourceMetadata,
    open_workbook,
};
pub use metrics::{AnalysisSettings, EventSeries, ReasonBreakdown, ReliabilityMetrics, TimeUnit};
pub use resolve::{BindingOverrides, ColumnBindings, ColumnRole, resolve_column};
pub use risk::{FailureForecast, HealthStatus, RiskPoint, RiskProfile};
