use crate::config::Config;
use crate::gateway::AnalyticsGateway;
use crate::query::breakdowns::{self, BrowserRecord, PageStatRecord, ReferrerRecord};
use crate::query::errors::ReportError;
use crate::query::period::Period;
use crate::query::realtime;
use crate::query::rows::RawRow;
use crate::query::spec::QuerySpec;
use crate::query::summarize::summarize_top_browsers;
use crate::query::timeseries::{self, DateMetricRecord, PageMetricRecord};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Runs the pre-defined reports for one analytics view.
///
/// Each call builds its own [`QuerySpec`], makes exactly one gateway call and
/// maps the rows it gets back. The engine holds no mutable state, so clones
/// can be used from any number of threads at once.
#[derive(Clone)]
pub struct ReportEngine {
    gateway: Arc<dyn AnalyticsGateway>,
    view_id: String,
}

impl fmt::Debug for ReportEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportEngine")
            .field("view_id", &self.view_id)
            .finish_non_exhaustive()
    }
}

impl ReportEngine {
    pub fn new(
        gateway: Arc<dyn AnalyticsGateway>,
        view_id: impl Into<String>,
    ) -> Result<Self, ReportError> {
        let view_id = validate_view_id(view_id.into())?;
        Ok(Self { gateway, view_id })
    }

    /// Build an engine for the view named in `config`.
    pub fn from_config(
        gateway: Arc<dyn AnalyticsGateway>,
        config: &Config,
    ) -> Result<Self, ReportError> {
        let view_id = config.view_id.clone().ok_or_else(|| {
            ReportError::InvalidConfiguration("view_id is not configured".to_string())
        })?;
        Self::new(gateway, view_id)
    }

    /// Same gateway, different view.
    pub fn with_view_id(&self, view_id: impl Into<String>) -> Result<Self, ReportError> {
        Self::new(Arc::clone(&self.gateway), view_id)
    }

    pub fn view_id(&self) -> &str {
        &self.view_id
    }

    /// Visitors and pageviews per day and page title.
    pub fn visitors_and_page_views_by_date_and_page(
        &self,
        period: Period,
    ) -> Result<Vec<PageMetricRecord>, ReportError> {
        let spec = timeseries::visitors_by_date_and_page_query();
        self.run_report("visitors_by_date_and_page", period, &spec, |row| {
            timeseries::map_page_metric_row(row, &spec)
        })
    }

    /// Visitors and pageviews per day.
    pub fn total_visitors_and_page_views_by_date(
        &self,
        period: Period,
    ) -> Result<Vec<DateMetricRecord>, ReportError> {
        let spec = timeseries::visitors_by_date_query();
        self.run_report("visitors_by_date", period, &spec, |row| {
            timeseries::map_date_metric_row(row, &spec)
        })
    }

    pub fn most_visited_pages(
        &self,
        period: Period,
        max_results: usize,
    ) -> Result<Vec<PageStatRecord>, ReportError> {
        let spec = breakdowns::most_visited_pages_query(provider_limit(max_results)?);
        self.run_report("most_visited_pages", period, &spec, |row| {
            breakdowns::map_page_stat_row(row, &spec)
        })
    }

    pub fn top_referrers(
        &self,
        period: Period,
        max_results: usize,
    ) -> Result<Vec<ReferrerRecord>, ReportError> {
        let spec = breakdowns::top_referrers_query(provider_limit(max_results)?);
        self.run_report("top_referrers", period, &spec, |row| {
            breakdowns::map_referrer_row(row, &spec)
        })
    }

    /// Browsers by sessions. When more than `max_results` browsers come back,
    /// the tail is folded into a single "Others" entry.
    pub fn top_browsers(
        &self,
        period: Period,
        max_results: usize,
    ) -> Result<Vec<BrowserRecord>, ReportError> {
        if max_results == 0 {
            return Err(ReportError::InvalidMaxResults);
        }
        let spec = breakdowns::top_browsers_query();
        let ranked = self.run_report("top_browsers", period, &spec, |row| {
            breakdowns::map_browser_row(row, &spec)
        })?;
        Ok(summarize_top_browsers(ranked, max_results))
    }

    /// Users on the site right now.
    pub fn active_users_now(&self, extra: BTreeMap<String, String>) -> Result<u64, ReportError> {
        let spec = realtime::active_users_query(extra);
        let row = self.realtime_query(&spec)?;
        realtime::map_active_users(row.as_ref(), &spec).inspect_err(|e| {
            tracing::warn!(view_id = %self.view_id, error = %e, "Malformed active users row");
        })
    }

    /// Run a caller-built historical query and return the raw rows.
    pub fn query(&self, period: Period, spec: &QuerySpec) -> Result<Vec<RawRow>, ReportError> {
        self.gateway
            .execute(&self.view_id, period.start_date(), period.end_date(), spec)
            .map_err(|source| {
                tracing::error!(
                    view_id = %self.view_id,
                    period = %period,
                    error = %source,
                    "Report query failed"
                );
                ReportError::Gateway {
                    metrics: spec.metrics().to_vec(),
                    period: Some(period),
                    source,
                }
            })
    }

    /// Run a caller-built real-time query and return its first row, if any.
    pub fn realtime_query(&self, spec: &QuerySpec) -> Result<Option<RawRow>, ReportError> {
        self.gateway
            .execute_realtime(&self.view_id, spec)
            .map_err(|source| {
                tracing::error!(view_id = %self.view_id, error = %source, "Real-time query failed");
                ReportError::Gateway {
                    metrics: spec.metrics().to_vec(),
                    period: None,
                    source,
                }
            })
    }

    fn run_report<T>(
        &self,
        report: &'static str,
        period: Period,
        spec: &QuerySpec,
        map: impl Fn(&RawRow) -> Result<T, ReportError>,
    ) -> Result<Vec<T>, ReportError> {
        let rows = self.query(period, spec)?;
        tracing::debug!(
            report,
            view_id = %self.view_id,
            period = %period,
            rows = rows.len(),
            "Report query completed"
        );
        rows.iter().map(map).collect::<Result<Vec<_>, _>>().inspect_err(|e| {
            tracing::warn!(report, view_id = %self.view_id, error = %e, "Malformed report row");
        })
    }
}

fn validate_view_id(view_id: String) -> Result<String, ReportError> {
    if view_id.trim().is_empty() {
        return Err(ReportError::InvalidConfiguration(
            "view_id must not be empty".to_string(),
        ));
    }
    Ok(view_id)
}

fn provider_limit(max_results: usize) -> Result<u32, ReportError> {
    if max_results == 0 {
        return Err(ReportError::InvalidMaxResults);
    }
    Ok(u32::try_from(max_results).unwrap_or(u32::MAX))
}
