use time::{macros::format_description, Date, Duration};

use super::Error;

/// Length of the "last year" window ending at the most recent measurement.
pub const LOOKBACK_DAYS: i64 = 365;

pub fn parse_date(value: &str) -> Result<Date, Error> {
    Date::parse(value, format_description!("[year]-[month]-[day]")).map_err(|source| {
        Error::InvalidDate {
            date: value.to_owned(),
            source,
        }
    })
}

pub fn format_date(date: Date) -> Result<String, Error> {
    Ok(date.format(format_description!("[year]-[month]-[day]"))?)
}

/// Cutoff for the last-year queries: `most_recent` minus [`LOOKBACK_DAYS`]
/// calendar days, rendered back as `YYYY-MM-DD`.
pub fn one_year_before(most_recent: &str) -> Result<String, Error> {
    let date = parse_date(most_recent)?;
    let cutoff = date
        .checked_sub(Duration::days(LOOKBACK_DAYS))
        .ok_or_else(|| Error::DateOutOfRange(most_recent.to_owned()))?;
    format_date(cutoff)
}
