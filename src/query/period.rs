use crate::query::errors::ReportError;
use chrono::{Datelike, Days, Months, NaiveDate, Utc};
use std::fmt;

/// An inclusive date range that every historical report is scoped to.
///
/// The start never falls after the end. Constructors that are relative to
/// "today" use the UTC calendar date; each has an `*_ending` variant that
/// takes the reference date explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl Period {
    /// Build a period from explicit bounds.
    pub fn create(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self, ReportError> {
        if start_date > end_date {
            return Err(ReportError::InvalidRange {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// The last `n` days, ending today.
    pub fn days(n: u64) -> Self {
        Self::days_ending(n, today())
    }

    pub fn days_ending(n: u64, end_date: NaiveDate) -> Self {
        let start_date = end_date
            .checked_sub_days(Days::new(n))
            .unwrap_or(NaiveDate::MIN);
        Self {
            start_date,
            end_date,
        }
    }

    /// The last `n` calendar months, ending today.
    pub fn months(n: u32) -> Self {
        Self::months_ending(n, today())
    }

    /// Days past the end of a shorter month clamp to its last day,
    /// so 31 March minus one month starts on the last day of February.
    pub fn months_ending(n: u32, end_date: NaiveDate) -> Self {
        let start_date = end_date
            .checked_sub_months(Months::new(n))
            .unwrap_or(NaiveDate::MIN);
        Self {
            start_date,
            end_date,
        }
    }

    /// The last `n` years, ending today.
    pub fn years(n: u32) -> Self {
        Self::years_ending(n, today())
    }

    pub fn years_ending(n: u32, end_date: NaiveDate) -> Self {
        Self::months_ending(n.saturating_mul(12), end_date)
    }

    /// From the first of the current month through today.
    pub fn this_month() -> Self {
        Self::month_to_date(today())
    }

    pub fn month_to_date(end_date: NaiveDate) -> Self {
        Self {
            start_date: end_date.with_day(1).unwrap_or(end_date),
            end_date,
        }
    }

    /// From January 1st of the current year through today.
    pub fn this_year() -> Self {
        Self::year_to_date(today())
    }

    pub fn year_to_date(end_date: NaiveDate) -> Self {
        Self {
            start_date: end_date.with_ordinal(1).unwrap_or(end_date),
            end_date,
        }
    }

    pub const fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub const fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Number of calendar days covered, counting both ends.
    pub fn num_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start_date, self.end_date)
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}
