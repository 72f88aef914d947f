use crate::api::errors::ApiError;
use crate::query::breakdowns::{
    BrowserRecord, PageStatRecord, ReferrerRecord, DEFAULT_MAX_BROWSERS, DEFAULT_MAX_PAGES,
    DEFAULT_MAX_REFERRERS,
};
use crate::query::timeseries::{DateMetricRecord, PageMetricRecord};
use crate::query::{Period, ReportEngine};
use axum::extract::{Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Shared state for the report handlers.
pub struct AppState {
    pub engine: ReportEngine,
}

/// Query parameters selecting the reporting period.
#[derive(Debug, Deserialize)]
pub struct PeriodParams {
    #[serde(default = "default_period")]
    pub period: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

fn default_period() -> String {
    "30d".to_string()
}

impl PeriodParams {
    /// Resolve the period against today's UTC date.
    pub fn resolve(&self) -> Result<Period, ApiError> {
        self.resolve_at(chrono::Utc::now().date_naive())
    }

    /// Resolve the period from explicit dates or a named range ending on `today`.
    ///
    /// Explicit `start_date` and `end_date` are both inclusive and take
    /// precedence over `period`.
    pub fn resolve_at(&self, today: NaiveDate) -> Result<Period, ApiError> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => return Ok(Period::create(start, end)?),
            (None, None) => {}
            _ => {
                return Err(ApiError::BadRequest(
                    "start_date and end_date must be given together".to_string(),
                ));
            }
        }

        let period = match self.period.as_str() {
            "day" | "today" => Period::days_ending(0, today),
            "7d" => Period::days_ending(7, today),
            "30d" => Period::days_ending(30, today),
            "90d" => Period::days_ending(90, today),
            "month" => Period::month_to_date(today),
            "year" => Period::year_to_date(today),
            _ => {
                return Err(ApiError::BadRequest(format!(
                    "Invalid period: {}. Use 'today', '7d', '30d', '90d', 'month', 'year', or provide start_date and end_date.",
                    self.period
                )));
            }
        };
        Ok(period)
    }
}

/// Query parameters for ranked reports.
#[derive(Debug, Deserialize)]
pub struct RankingParams {
    #[serde(default = "default_period")]
    pub period: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub limit: Option<usize>,
}

impl RankingParams {
    fn period(&self) -> Result<Period, ApiError> {
        PeriodParams {
            period: self.period.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
        }
        .resolve()
    }
}

/// Real-time query parameters. `filters` is forwarded to the provider as-is.
#[derive(Debug, Deserialize)]
pub struct RealtimeParams {
    pub filters: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActiveUsers {
    pub active_users: u64,
}

/// Run a blocking engine call off the async executor.
async fn run_blocking<T, F>(state: &AppState, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(ReportEngine) -> Result<T, crate::query::ReportError> + Send + 'static,
{
    let engine = state.engine.clone();
    let result = tokio::task::spawn_blocking(move || f(engine))
        .await
        .map_err(|e| ApiError::Internal(format!("Query task panicked: {e}")))??;
    Ok(result)
}

/// GET /api/reports/visitors: Visitors and pageviews per day and page title.
pub async fn get_visitors(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PeriodParams>,
) -> Result<Json<Vec<PageMetricRecord>>, ApiError> {
    let period = params.resolve()?;
    let result = run_blocking(&state, move |engine| {
        engine.visitors_and_page_views_by_date_and_page(period)
    })
    .await?;
    Ok(Json(result))
}

/// GET /api/reports/totals: Visitors and pageviews per day.
pub async fn get_totals(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PeriodParams>,
) -> Result<Json<Vec<DateMetricRecord>>, ApiError> {
    let period = params.resolve()?;
    let result = run_blocking(&state, move |engine| {
        engine.total_visitors_and_page_views_by_date(period)
    })
    .await?;
    Ok(Json(result))
}

/// GET /api/reports/pages: Most visited pages.
pub async fn get_pages(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RankingParams>,
) -> Result<Json<Vec<PageStatRecord>>, ApiError> {
    let period = params.period()?;
    let limit = params.limit.unwrap_or(DEFAULT_MAX_PAGES);
    let result = run_blocking(&state, move |engine| {
        engine.most_visited_pages(period, limit)
    })
    .await?;
    Ok(Json(result))
}

/// GET /api/reports/referrers: Top referrers.
pub async fn get_referrers(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RankingParams>,
) -> Result<Json<Vec<ReferrerRecord>>, ApiError> {
    let period = params.period()?;
    let limit = params.limit.unwrap_or(DEFAULT_MAX_REFERRERS);
    let result = run_blocking(&state, move |engine| engine.top_referrers(period, limit)).await?;
    Ok(Json(result))
}

/// GET /api/reports/browsers: Top browsers, tail folded into "Others".
pub async fn get_browsers(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RankingParams>,
) -> Result<Json<Vec<BrowserRecord>>, ApiError> {
    let period = params.period()?;
    let limit = params.limit.unwrap_or(DEFAULT_MAX_BROWSERS);
    let result = run_blocking(&state, move |engine| engine.top_browsers(period, limit)).await?;
    Ok(Json(result))
}

/// GET /api/realtime/active-users: Users on the site right now.
pub async fn get_active_users(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RealtimeParams>,
) -> Result<Json<ActiveUsers>, ApiError> {
    let mut extra = BTreeMap::new();
    if let Some(filters) = params.filters {
        extra.insert("filters".to_string(), filters);
    }
    let active_users = run_blocking(&state, move |engine| engine.active_users_now(extra)).await?;
    Ok(Json(ActiveUsers { active_users }))
}
