//! Boundary to the remote analytics provider.
//!
//! The report engine only ever talks to an [`AnalyticsGateway`]; transport,
//! authentication and retry policy belong to the implementation.

pub mod http;

use crate::query::rows::RawRow;
use crate::query::spec::QuerySpec;
use chrono::NaiveDate;
use thiserror::Error;

/// Provider-side failures: authentication, quota, transport, non-2xx.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode provider response: {0}")]
    Decode(String),

    #[error("gateway misconfigured: {0}")]
    Config(String),
}

/// Executes queries against one analytics provider.
///
/// Calls block until the provider answers or fails. Implementations own their
/// connection limits and timeouts and report both as [`GatewayError`].
pub trait AnalyticsGateway: Send + Sync {
    /// Run a bounded historical report over `start_date..=end_date`.
    fn execute(
        &self,
        view_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        query: &QuerySpec,
    ) -> Result<Vec<RawRow>, GatewayError>;

    /// Run a real-time query. `None` when the provider reports no rows.
    fn execute_realtime(
        &self,
        view_id: &str,
        query: &QuerySpec,
    ) -> Result<Option<RawRow>, GatewayError>;
}
