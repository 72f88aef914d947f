use crate::gateway::GatewayError;
use crate::query::period::Period;
use chrono::NaiveDate;
use thiserror::Error;

/// Failures surfaced by report queries.
///
/// Every variant carries the input that caused it so callers can log or
/// report the failure without re-deriving context.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("invalid period: start date {start} is after end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("max_results must be at least 1")]
    InvalidMaxResults,

    #[error(
        "analytics gateway failed for metrics [{}]{}: {source}",
        .metrics.join(","),
        .period.map(|p| format!(" over {p}")).unwrap_or_default()
    )]
    Gateway {
        metrics: Vec<String>,
        /// `None` for real-time queries.
        period: Option<Period>,
        #[source]
        source: GatewayError,
    },

    #[error("malformed response row {row:?}: {reason}")]
    MalformedResponse { row: Vec<String>, reason: String },
}

impl ReportError {
    pub(crate) fn malformed(row: &[String], reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            row: row.to_vec(),
            reason: reason.into(),
        }
    }
}
