//! Rolling risk scoring and next-failure forecasting.
//!
//! The record index is the time axis: rolling windows and failure
//! intervals are measured in records, not timestamps.

use serde::{Deserialize, Serialize};

/// Minimum records before any score is produced.
pub const MIN_RECORDS: usize = 10;
/// Trailing window for the downtime moving average.
const AVG_WINDOW: usize = 3;
/// Trailing window for failure frequency and recent-failure counts.
const FREQUENCY_WINDOW: usize = 10;
/// Minimum records before a forecast is attempted.
const MIN_FORECAST_RECORDS: usize = 5;
/// A forecast this close, combined with high current risk, raises the alert.
const ALERT_HORIZON: f64 = 5.0;
const ALERT_RISK_FLOOR: f64 = 60.0;

/// Health tier derived from the current risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Good,
    Warning,
    Critical,
}

impl HealthStatus {
    /// Classify a current risk score.
    pub fn from_score(score: f64) -> Self {
        if score > 75.0 {
            HealthStatus::Critical
        } else if score > 50.0 {
            HealthStatus::Warning
        } else {
            HealthStatus::Good
        }
    }

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::Good => "Good",
            HealthStatus::Warning => "Warning",
            HealthStatus::Critical => "Critical",
        }
    }
}

/// Per-record risk features and score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskPoint {
    pub index: usize,
    pub downtime: f64,
    /// Trailing mean of downtime over the current and up to 2 preceding
    /// records.
    pub avg_downtime: f64,
    /// Failures in the trailing window of up to 10 records.
    pub failure_frequency: usize,
    /// Blended risk score in [0, 100].
    pub score: f64,
}

/// Next-failure estimate from historical failure spacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureForecast {
    /// Mean spacing between failures, in records.
    pub avg_interval: f64,
    /// Population standard deviation of the spacing.
    pub std_interval: f64,
    pub records_since_last_failure: usize,
    pub estimated_records_until_next_failure: f64,
    /// 100 minus the relative spread of the intervals, floored at 0.
    pub confidence: f64,
}

/// Risk trend for the whole table plus summary scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskProfile {
    pub points: Vec<RiskPoint>,
    /// Score of the last record.
    pub current_risk: f64,
    /// Mean score over all records.
    pub avg_risk: f64,
    /// Failures within the last 10 records.
    pub recent_failures: usize,
    pub health: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast: Option<FailureForecast>,
    /// Set when a failure is forecast within 5 records and current risk
    /// exceeds 60.
    pub alert: bool,
}

/// Score a downtime series.
///
/// Returns `None` below [`MIN_RECORDS`]; the scores are recomputed
/// wholesale on every call, never incrementally. The forecast
/// additionally needs at least two failure positions, and is omitted
/// (not zeroed) when that history is missing.
pub fn score(downtime: &[f64]) -> Option<RiskProfile> {
    let n = downtime.len();
    if n < MIN_RECORDS {
        return None;
    }

    let flags: Vec<usize> = downtime.iter().map(|d| usize::from(*d > 0.0)).collect();

    let avg_downtime: Vec<f64> = (0..n)
        .map(|i| {
            let start = i.saturating_sub(AVG_WINDOW - 1);
            let window = &downtime[start..=i];
            window.iter().sum::<f64>() / window.len() as f64
        })
        .collect();

    let frequency: Vec<usize> = (0..n)
        .map(|i| {
            let start = i.saturating_sub(FREQUENCY_WINDOW - 1);
            flags[start..=i].iter().sum()
        })
        .collect();

    let max_downtime = downtime.iter().fold(0.0_f64, |acc, d| acc.max(*d));
    let max_avg = avg_downtime.iter().fold(0.0_f64, |acc, d| acc.max(*d));

    let points: Vec<RiskPoint> = (0..n)
        .map(|i| {
            let magnitude = if max_downtime > 0.0 { downtime[i] / max_downtime } else { 0.0 };
            let trend = if max_avg > 0.0 { avg_downtime[i] / max_avg } else { 0.0 };
            let recurrence = frequency[i] as f64 / FREQUENCY_WINDOW as f64;
            let score = ((magnitude + trend + recurrence) / 3.0 * 100.0).clamp(0.0, 100.0);

            RiskPoint {
                index: i,
                downtime: downtime[i],
                avg_downtime: avg_downtime[i],
                failure_frequency: frequency[i],
                score,
            }
        })
        .collect();

    let current_risk = points.last().map(|p| p.score).unwrap_or(0.0);
    let avg_risk = points.iter().map(|p| p.score).sum::<f64>() / n as f64;
    let recent_failures = flags[n.saturating_sub(FREQUENCY_WINDOW)..].iter().sum();

    let positions: Vec<usize> = flags
        .iter()
        .enumerate()
        .filter(|(_, flag)| **flag == 1)
        .map(|(i, _)| i)
        .collect();
    let forecast = forecast_next_failure(&positions, n);

    let alert = matches!(
        &forecast,
        Some(f) if f.estimated_records_until_next_failure < ALERT_HORIZON
    ) && current_risk > ALERT_RISK_FLOOR;

    Some(RiskProfile {
        current_risk,
        avg_risk,
        recent_failures,
        health: HealthStatus::from_score(current_risk),
        forecast,
        alert,
        points,
    })
}

/// Estimate the next failure from the spacing of past failures.
fn forecast_next_failure(positions: &[usize], n: usize) -> Option<FailureForecast> {
    if n < MIN_FORECAST_RECORDS || positions.len() < 2 {
        return None;
    }

    let intervals: Vec<f64> = positions.windows(2).map(|w| (w[1] - w[0]) as f64).collect();
    let avg_interval = intervals.iter().sum::<f64>() / intervals.len() as f64;
    let variance = intervals
        .iter()
        .map(|v| (v - avg_interval).powi(2))
        .sum::<f64>()
        / intervals.len() as f64;
    let std_interval = variance.sqrt();

    let last = *positions.last()?;
    let records_since_last_failure = (n - 1) - last;
    let estimated = (avg_interval - records_since_last_failure as f64).max(0.0);
    let confidence = if avg_interval > 0.0 {
        (100.0 - std_interval / avg_interval * 100.0).max(0.0)
    } else {
        0.0
    };

    Some(FailureForecast {
        avg_interval,
        std_interval,
        records_since_last_failure,
        estimated_records_until_next_failure: estimated,
        confidence,
    })
}
