//! Date-range selection over statements.
//!
//! Calendar-date inputs become a half-open `[start, end)` range of
//! timestamps at midnight. A missing endpoint falls back to a sentinel so
//! that stores always receive two concrete bounds. Without an end date the
//! range still includes the `9999-12-31 23:59:59` sentinel itself.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::{debug, error};

use crate::error::{Result, StatementError};
use crate::statement::StatementRecord;

/// Canonical width of a `YYYY-MM-DD` date.
pub const DATE_INPUT_LENGTH: usize = 10;

pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// Lower bound used when no start date is given.
pub fn min_operation_date() -> NaiveDateTime {
    NaiveDateTime::MIN
}

/// Latest operation date a query without an end date covers, `9999-12-31 23:59:59`.
pub fn max_operation_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(9999, 12, 31)
        .and_then(|d| d.and_hms_opt(23, 59, 59))
        .unwrap_or(NaiveDateTime::MAX)
}

/// Exclusive end used when no end date is given, one second past
/// [`max_operation_date`].
fn open_end_bound() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(10000, 1, 1)
        .map(at_midnight)
        .unwrap_or(NaiveDateTime::MAX)
}

/// Parses a `YYYY-MM-DD` date argument.
pub fn parse_date_input(raw: &str) -> Result<NaiveDate> {
    if raw.len() != DATE_INPUT_LENGTH {
        error!("Input date has unexpected length: {}", raw);
        return Err(StatementError::invalid_date_input(format!(
            "'{}' is not a YYYY-MM-DD date",
            raw
        )));
    }

    NaiveDate::parse_from_str(raw, DATE_INPUT_FORMAT).map_err(|e| {
        error!("Input date is invalid: {}", e);
        StatementError::invalid_date_input(format!("'{}': {}", raw, e))
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self> {
        for date in start.iter().chain(end.iter()) {
            check_date_width(date)?;
        }

        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                error!("Input date range is invalid.");
                return Err(StatementError::InvalidDateRange { start, end });
            }
        }

        let range = Self {
            start: start.map_or_else(min_operation_date, at_midnight),
            end: end.map_or_else(open_end_bound, at_midnight),
        };
        debug!("Filtering operation dates in [{}, {})", range.start, range.end);

        Ok(range)
    }

    pub fn full() -> Self {
        Self {
            start: min_operation_date(),
            end: open_end_bound(),
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at < self.end
    }
}

fn check_date_width(date: &NaiveDate) -> Result<()> {
    // years past 9999 or before 0 render wider than YYYY-MM-DD
    let rendered = date.to_string();
    if rendered.len() != DATE_INPUT_LENGTH {
        error!("Input date is out of range: {}", rendered);
        return Err(StatementError::invalid_date_input(format!(
            "'{}' is not a YYYY-MM-DD date",
            rendered
        )));
    }
    Ok(())
}

fn at_midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Returns the statements whose operation date falls in `range`.
pub fn filter_statements<'a, I>(statements: I, range: &DateRange) -> Vec<StatementRecord>
where
    I: IntoIterator<Item = &'a StatementRecord>,
{
    statements
        .into_iter()
        .filter(|s| range.contains(s.operation_date))
        .cloned()
        .collect()
}
