use crate::query::errors::ReportError;
use crate::query::rows::{Columns, RawRow};
use crate::query::spec::{Dimension, Metric, QuerySpec, Sort};
use serde::{Deserialize, Serialize};

/// A page ranked by pageviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageStatRecord {
    pub url: String,
    pub page_title: String,
    pub page_views: u64,
}

/// A referrer ranked by the pageviews it sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferrerRecord {
    pub url: String,
    pub page_views: u64,
}

/// A browser ranked by sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserRecord {
    pub browser: String,
    pub sessions: u64,
}

pub const DEFAULT_MAX_PAGES: usize = 20;
pub const DEFAULT_MAX_REFERRERS: usize = 20;
pub const DEFAULT_MAX_BROWSERS: usize = 10;

/// `ga:pagePath, ga:pageTitle | ga:pageviews`, top `max_results` by pageviews.
pub fn most_visited_pages_query(max_results: u32) -> QuerySpec {
    QuerySpec::for_metrics(&[Metric::Pageviews])
        .grouped_by(&[Dimension::PagePath, Dimension::PageTitle])
        .with_sort(Sort::descending(Metric::Pageviews.api_name()))
        .with_max_results(max_results)
}

/// `ga:fullReferrer | ga:pageviews`, top `max_results` by pageviews.
pub fn top_referrers_query(max_results: u32) -> QuerySpec {
    QuerySpec::for_metrics(&[Metric::Pageviews])
        .grouped_by(&[Dimension::FullReferrer])
        .with_sort(Sort::descending(Metric::Pageviews.api_name()))
        .with_max_results(max_results)
}

/// `ga:browser | ga:sessions`, all browsers by sessions.
///
/// Unlimited on purpose: the tail is folded into "Others" locally, which
/// needs every row to get the sum right.
pub fn top_browsers_query() -> QuerySpec {
    QuerySpec::for_metrics(&[Metric::Sessions])
        .grouped_by(&[Dimension::Browser])
        .with_sort(Sort::descending(Metric::Sessions.api_name()))
}

pub fn map_page_stat_row(row: &RawRow, spec: &QuerySpec) -> Result<PageStatRecord, ReportError> {
    let cols = Columns::check(row, spec)?;
    Ok(PageStatRecord {
        url: cols.text(0),
        page_title: cols.text(1),
        page_views: cols.count(2)?,
    })
}

pub fn map_referrer_row(row: &RawRow, spec: &QuerySpec) -> Result<ReferrerRecord, ReportError> {
    let cols = Columns::check(row, spec)?;
    Ok(ReferrerRecord {
        url: cols.text(0),
        page_views: cols.count(1)?,
    })
}

pub fn map_browser_row(row: &RawRow, spec: &QuerySpec) -> Result<BrowserRecord, ReportError> {
    let cols = Columns::check(row, spec)?;
    Ok(BrowserRecord {
        browser: cols.text(0),
        sessions: cols.count(1)?,
    })
}
