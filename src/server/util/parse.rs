use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::server::error::AppError;

/// Parses a `YYYY-MM-DD` date and an `HH:MM` time into a UTC instant.
///
/// # Returns
/// - `Ok(DateTime<Utc>)` - Combined instant
/// - `Err(AppError::BadRequest)` - Either part is malformed
pub fn parse_date_time(date: &str, time: &str) -> Result<DateTime<Utc>, AppError> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("Invalid date '{}', expected YYYY-MM-DD", date)))?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .map_err(|_| AppError::BadRequest(format!("Invalid time '{}', expected HH:MM", time)))?;

    Ok(date.and_time(time).and_utc())
}

/// Trims a string and drops it when empty.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
