//! Core Reporting API client.
//!
//! Issues `GET {base}/data/ga` and `GET {base}/data/realtime` with a bearer
//! access token. Obtaining and refreshing that token is the caller's job.

use crate::config::GatewayConfig;
use crate::gateway::{AnalyticsGateway, GatewayError};
use crate::query::rows::RawRow;
use crate::query::spec::QuerySpec;
use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;

/// Tabular response body shared by the report and real-time endpoints.
#[derive(Debug, Deserialize)]
struct DataResponse {
    #[serde(default)]
    rows: Option<Vec<Vec<serde_json::Value>>>,
}

impl DataResponse {
    fn into_rows(self) -> Vec<RawRow> {
        self.rows
            .unwrap_or_default()
            .into_iter()
            .map(|cells| cells.into_iter().map(cell_to_string).collect())
            .collect()
    }
}

fn cell_to_string(cell: serde_json::Value) -> String {
    match cell {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Blocking HTTP implementation of [`AnalyticsGateway`].
///
/// Do not call from inside an async task; run it on a blocking thread.
pub struct HttpGateway {
    http_client: reqwest::blocking::Client,
    base_url: String,
    access_token: String,
}

impl HttpGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let access_token = config
            .access_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| GatewayError::Config("access_token is required".to_string()))?
            .to_string();

        let base_url = config.api_base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(GatewayError::Config("api_base_url is required".to_string()));
        }

        let http_client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GatewayError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            base_url,
            access_token,
        })
    }

    fn fetch(&self, path: &str, params: &[(String, String)]) -> Result<Vec<RawRow>, GatewayError> {
        let url = format!("{}/{path}", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(params)
            .send()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            tracing::warn!(
                status = status.as_u16(),
                url = %url,
                "Analytics provider rejected query"
            );
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: DataResponse = response
            .json()
            .map_err(|e| GatewayError::Decode(e.to_string()))?;
        Ok(body.into_rows())
    }
}

impl AnalyticsGateway for HttpGateway {
    fn execute(
        &self,
        view_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        query: &QuerySpec,
    ) -> Result<Vec<RawRow>, GatewayError> {
        let mut params = vec![
            ("ids".to_string(), view_param(view_id)),
            ("start-date".to_string(), start_date.format("%Y-%m-%d").to_string()),
            ("end-date".to_string(), end_date.format("%Y-%m-%d").to_string()),
        ];
        push_query_params(&mut params, query);
        self.fetch("data/ga", &params)
    }

    fn execute_realtime(
        &self,
        view_id: &str,
        query: &QuerySpec,
    ) -> Result<Option<RawRow>, GatewayError> {
        let mut params = vec![("ids".to_string(), view_param(view_id))];
        push_query_params(&mut params, query);
        Ok(self.fetch("data/realtime", &params)?.into_iter().next())
    }
}

/// The API addresses views as `ga:<id>`; accept ids given either way.
fn view_param(view_id: &str) -> String {
    if view_id.starts_with("ga:") {
        view_id.to_string()
    } else {
        format!("ga:{view_id}")
    }
}

fn push_query_params(params: &mut Vec<(String, String)>, query: &QuerySpec) {
    params.push(("metrics".to_string(), query.metrics().join(",")));
    if !query.dimensions().is_empty() {
        params.push(("dimensions".to_string(), query.dimensions().join(",")));
    }
    if let Some(sort) = query.sort() {
        params.push(("sort".to_string(), sort.to_param()));
    }
    if let Some(max) = query.max_results() {
        params.push(("max-results".to_string(), max.to_string()));
    }
    for (key, value) in query.extra() {
        params.push((key.clone(), value.clone()));
    }
}
