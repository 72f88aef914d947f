use crate::query::errors::ReportError;
use crate::query::rows::{Columns, RawRow};
use crate::query::spec::{Dimension, Metric, QuerySpec};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Visitors and pageviews for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateMetricRecord {
    pub date: NaiveDate,
    pub visitors: u64,
    pub page_views: u64,
}

/// Visitors and pageviews for one page title on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetricRecord {
    pub date: NaiveDate,
    pub page_title: String,
    pub visitors: u64,
    pub page_views: u64,
}

/// `ga:date, ga:pageTitle | ga:users, ga:pageviews`
pub fn visitors_by_date_and_page_query() -> QuerySpec {
    QuerySpec::for_metrics(&[Metric::Users, Metric::Pageviews])
        .grouped_by(&[Dimension::Date, Dimension::PageTitle])
}

/// `ga:date | ga:users, ga:pageviews`
pub fn visitors_by_date_query() -> QuerySpec {
    QuerySpec::for_metrics(&[Metric::Users, Metric::Pageviews]).grouped_by(&[Dimension::Date])
}

pub fn map_page_metric_row(
    row: &RawRow,
    spec: &QuerySpec,
) -> Result<PageMetricRecord, ReportError> {
    let cols = Columns::check(row, spec)?;
    Ok(PageMetricRecord {
        date: cols.date(0)?,
        page_title: cols.text(1),
        visitors: cols.count(2)?,
        page_views: cols.count(3)?,
    })
}

pub fn map_date_metric_row(
    row: &RawRow,
    spec: &QuerySpec,
) -> Result<DateMetricRecord, ReportError> {
    let cols = Columns::check(row, spec)?;
    Ok(DateMetricRecord {
        date: cols.date(0)?,
        visitors: cols.count(1)?,
        page_views: cols.count(2)?,
    })
}
