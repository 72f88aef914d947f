use crate::query::errors::ReportError;
use crate::query::rows::{Columns, RawRow};
use crate::query::spec::{Metric, QuerySpec};
use std::collections::BTreeMap;

/// `rt:activeUsers`, with caller-supplied provider options.
///
/// A `dimensions` option becomes part of the query shape so its columns are
/// accounted for when the row is read back.
pub fn active_users_query(mut extra: BTreeMap<String, String>) -> QuerySpec {
    let dimensions: Vec<String> = extra
        .remove("dimensions")
        .map(|list| {
            list.split(',')
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    QuerySpec::for_metrics(&[Metric::ActiveUsers])
        .with_dimensions(dimensions)
        .with_extras(extra)
}

/// No row means nobody is on the site right now.
pub fn map_active_users(row: Option<&RawRow>, spec: &QuerySpec) -> Result<u64, ReportError> {
    let Some(row) = row else {
        return Ok(0);
    };
    // Dimension values come first, then the metric.
    Columns::check(row, spec)?.count(spec.dimensions().len())
}
