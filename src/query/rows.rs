use crate::query::errors::ReportError;
use crate::query::spec::QuerySpec;
use chrono::NaiveDate;

/// One row of tabular provider output: dimensions first, then metrics.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRow(Vec<String>);

impl RawRow {
    pub const fn new(fields: Vec<String>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_fields(self) -> Vec<String> {
        self.0
    }
}

impl<S: Into<String>> FromIterator<S> for RawRow {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<String>> for RawRow {
    fn from(fields: Vec<String>) -> Self {
        Self(fields)
    }
}

/// Positional view over a row that has already been checked against its query.
pub(crate) struct Columns<'a> {
    fields: &'a [String],
}

impl<'a> Columns<'a> {
    /// Rows shorter than the query's declared columns are rejected.
    /// Trailing extra fields are ignored.
    pub(crate) fn check(row: &'a RawRow, spec: &QuerySpec) -> Result<Self, ReportError> {
        let expected = spec.column_count();
        if row.len() < expected {
            return Err(ReportError::malformed(
                row.fields(),
                format!("expected {expected} columns, got {}", row.len()),
            ));
        }
        Ok(Self {
            fields: row.fields(),
        })
    }

    pub(crate) fn text(&self, index: usize) -> String {
        self.fields[index].clone()
    }

    pub(crate) fn count(&self, index: usize) -> Result<u64, ReportError> {
        parse_count(&self.fields[index]).ok_or_else(|| {
            ReportError::malformed(
                self.fields,
                format!(
                    "column {index} is not a non-negative integer: {:?}",
                    self.fields[index]
                ),
            )
        })
    }

    pub(crate) fn date(&self, index: usize) -> Result<NaiveDate, ReportError> {
        parse_compact_date(&self.fields[index]).ok_or_else(|| {
            ReportError::malformed(
                self.fields,
                format!(
                    "column {index} is not a YYYYMMDD date: {:?}",
                    self.fields[index]
                ),
            )
        })
    }
}

/// Parse the provider's compact `YYYYMMDD` date format.
pub fn parse_compact_date(value: &str) -> Option<NaiveDate> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = value[0..4].parse().ok()?;
    let month = value[4..6].parse().ok()?;
    let day = value[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse a non-negative integer cell. Some providers render whole-number
/// metrics with a trailing `.0`, which is accepted.
pub fn parse_count(value: &str) -> Option<u64> {
    let value = value.trim();
    let digits = value.strip_suffix(".0").unwrap_or(value);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compact_date() {
        assert_eq!(
            parse_compact_date("20240105"),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
        assert_eq!(
            parse_compact_date("20240229"),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
    }

    #[test]
    fn test_parse_compact_date_rejects_garbage() {
        assert_eq!(parse_compact_date("abc"), None);
        assert_eq!(parse_compact_date("2024010"), None);
        assert_eq!(parse_compact_date("202401055"), None);
        assert_eq!(parse_compact_date("2024-1-5"), None);
        assert_eq!(parse_compact_date("20230229"), None);
        assert_eq!(parse_compact_date("20241301"), None);
        assert_eq!(parse_compact_date(""), None);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("25"), Some(25));
        assert_eq!(parse_count("0"), Some(0));
        assert_eq!(parse_count(" 7 "), Some(7));
        assert_eq!(parse_count("12.0"), Some(12));
    }

    #[test]
    fn test_parse_count_rejects_negative_and_fractional() {
        assert_eq!(parse_count("-1"), None);
        assert_eq!(parse_count("1.5"), None);
        assert_eq!(parse_count(""), None);
        assert_eq!(parse_count("ten"), None);
    }

    #[test]
    fn test_columns_rejects_short_row() {
        let spec = QuerySpec::new(["ga:users", "ga:pageviews"]).with_dimensions(["ga:date"]);
        let row: RawRow = ["20240105", "10"].into_iter().collect();
        let err = Columns::check(&row, &spec).err().unwrap();
        assert!(matches!(err, ReportError::MalformedResponse { .. }));
    }

    #[test]
    fn test_columns_ignores_trailing_fields() {
        let spec = QuerySpec::new(["ga:sessions"]).with_dimensions(["ga:browser"]);
        let row: RawRow = ["Chrome", "100", "extra"].into_iter().collect();
        let cols = Columns::check(&row, &spec).unwrap();
        assert_eq!(cols.text(0), "Chrome");
        assert_eq!(cols.count(1).unwrap(), 100);
    }
}
