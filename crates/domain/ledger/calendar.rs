use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime};

use super::errors::{LedgerError, LedgerResult};

/// Advances `date` by whole calendar months.
///
/// Days past the end of the target month clamp to its last day, so Jan 31 plus one
/// month is Feb 29 in a leap year and Feb 28 otherwise. The clamp applies to the
/// final month only: Jan 31 plus two months is Mar 31.
pub fn add_calendar_months(date: NaiveDate, months: i32) -> LedgerResult<NaiveDate> {
    let months = u32::try_from(months).map_err(|_| {
        LedgerError::InvalidArgument(format!("cannot advance a date by {months} months"))
    })?;

    date.checked_add_months(Months::new(months)).ok_or_else(|| {
        LedgerError::InvalidArgument(format!("{date} plus {months} months is out of range"))
    })
}

/// Whole calendar days from `from` to `to`; negative when `to` is earlier.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// First day of `date`'s month and first day of the following month.
pub fn month_bounds(date: NaiveDate) -> LedgerResult<(NaiveDate, NaiveDate)> {
    let month_start = date
        .with_day(1)
        .ok_or_else(|| LedgerError::InvalidArgument(format!("{date} has no first day")))?;
    let next_month_start = add_calendar_months(month_start, 1)?;
    Ok((month_start, next_month_start))
}

/// Parses a calendar date sent by a client.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive `YYYY-MM-DDTHH:MM:SS`
/// timestamps. Any time component is dropped; RFC 3339 input keeps the calendar
/// date of its own offset.
pub fn parse_calendar_date(raw: &str) -> LedgerResult<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::InvalidArgument("date is empty".to_string()));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.date_naive());
    }

    if let Ok(timestamp) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(timestamp.date());
    }

    Err(LedgerError::InvalidArgument(format!(
        "`{trimmed}` is not a calendar date (expected YYYY-MM-DD)"
    )))
}
