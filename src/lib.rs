//! Typed report queries over a remote web analytics reporting API.
//!
//! [`query::ReportEngine`] turns a [`query::Period`] into provider queries,
//! runs them through an [`gateway::AnalyticsGateway`] and maps the tabular
//! rows that come back into report records.

pub mod api;
pub mod config;
pub mod gateway;
pub mod query;
pub mod server;
