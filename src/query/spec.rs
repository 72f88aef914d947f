use std::collections::BTreeMap;

/// Metrics the built-in reports request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Users,
    Pageviews,
    Sessions,
    ActiveUsers,
}

impl Metric {
    pub const fn api_name(self) -> &'static str {
        match self {
            Self::Users => "ga:users",
            Self::Pageviews => "ga:pageviews",
            Self::Sessions => "ga:sessions",
            Self::ActiveUsers => "rt:activeUsers",
        }
    }
}

/// Dimensions the built-in reports group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Date,
    PageTitle,
    PagePath,
    FullReferrer,
    Browser,
}

impl Dimension {
    pub const fn api_name(self) -> &'static str {
        match self {
            Self::Date => "ga:date",
            Self::PageTitle => "ga:pageTitle",
            Self::PagePath => "ga:pagePath",
            Self::FullReferrer => "ga:fullReferrer",
            Self::Browser => "ga:browser",
        }
    }
}

/// Result ordering on a single metric or dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub descending: bool,
}

impl Sort {
    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }

    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    /// Wire form: `-field` for descending, `field` for ascending.
    pub fn to_param(&self) -> String {
        if self.descending {
            format!("-{}", self.field)
        } else {
            self.field.clone()
        }
    }
}

/// One analytics request, independent of the provider that executes it.
///
/// Built with the consuming `with_*` methods and never changed afterwards.
/// Rows returned for a query list the dimensions first, then the metrics,
/// each in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuerySpec {
    metrics: Vec<String>,
    dimensions: Vec<String>,
    sort: Option<Sort>,
    max_results: Option<u32>,
    extra: BTreeMap<String, String>,
}

impl QuerySpec {
    pub fn new<I, S>(metrics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            metrics: metrics.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub(crate) fn for_metrics(metrics: &[Metric]) -> Self {
        Self::new(metrics.iter().map(|m| m.api_name()))
    }

    #[must_use]
    pub fn with_dimensions<I, S>(mut self, dimensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dimensions = dimensions.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub(crate) fn grouped_by(self, dimensions: &[Dimension]) -> Self {
        self.with_dimensions(dimensions.iter().map(|d| d.api_name()))
    }

    #[must_use]
    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    #[must_use]
    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = Some(max_results);
        self
    }

    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_extras(mut self, extra: BTreeMap<String, String>) -> Self {
        self.extra.extend(extra);
        self
    }

    pub fn metrics(&self) -> &[String] {
        &self.metrics
    }

    pub fn dimensions(&self) -> &[String] {
        &self.dimensions
    }

    pub const fn sort(&self) -> Option<&Sort> {
        self.sort.as_ref()
    }

    pub const fn max_results(&self) -> Option<u32> {
        self.max_results
    }

    pub const fn extra(&self) -> &BTreeMap<String, String> {
        &self.extra
    }

    /// Number of fields a well-formed row for this query carries.
    pub fn column_count(&self) -> usize {
        self.dimensions.len() + self.metrics.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_param() {
        assert_eq!(Sort::descending("ga:pageviews").to_param(), "-ga:pageviews");
        assert_eq!(Sort::ascending("ga:date").to_param(), "ga:date");
    }

    #[test]
    fn test_builder() {
        let spec = QuerySpec::for_metrics(&[Metric::Users, Metric::Pageviews])
            .grouped_by(&[Dimension::Date, Dimension::PageTitle])
            .with_sort(Sort::ascending("ga:date"))
            .with_max_results(5)
            .with_extra("filters", "ga:pagePath==/");

        assert_eq!(spec.metrics(), ["ga:users", "ga:pageviews"]);
        assert_eq!(spec.dimensions(), ["ga:date", "ga:pageTitle"]);
        assert_eq!(spec.sort(), Some(&Sort::ascending("ga:date")));
        assert_eq!(spec.max_results(), Some(5));
        assert_eq!(spec.extra().get("filters").map(String::as_str), Some("ga:pagePath==/"));
        assert_eq!(spec.column_count(), 4);
    }

    #[test]
    fn test_with_extras_merges() {
        let mut extra = BTreeMap::new();
        extra.insert("segment".to_string(), "gaid::-1".to_string());
        let spec = QuerySpec::new(["ga:sessions"])
            .with_extra("filters", "ga:browser==Chrome")
            .with_extras(extra);
        assert_eq!(spec.extra().len(), 2);
        assert!(spec.dimensions().is_empty());
        assert_eq!(spec.column_count(), 1);
    }
}
