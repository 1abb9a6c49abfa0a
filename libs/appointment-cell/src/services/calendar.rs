//! Date arithmetic in the schedule's fixed UTC offset.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};

use crate::models::AppointmentError;

pub fn start_of_hour(date: DateTime<Utc>, offset: FixedOffset) -> DateTime<Utc> {
    let local = date.with_timezone(&offset);
    let into_hour = Duration::minutes(local.minute() as i64)
        + Duration::seconds(local.second() as i64)
        + Duration::nanoseconds(local.nanosecond() as i64);
    date - into_hour
}

pub fn local_hour(date: DateTime<Utc>, offset: FixedOffset) -> u32 {
    date.with_timezone(&offset).hour()
}

/// `[start, end)` of a local calendar day, in UTC.
pub fn day_bounds(
    year: i32,
    month: u32,
    day: u32,
    offset: FixedOffset,
) -> Result<(DateTime<Utc>, DateTime<Utc>), AppointmentError> {
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| AppointmentError::InvalidDate(format!("{}-{}-{} is not a calendar date", year, month, day)))?;
    let start = local_midnight(date, offset);
    Ok((start, start + Duration::days(1)))
}

/// `[start, end)` of a local calendar month, in UTC.
pub fn month_bounds(
    year: i32,
    month: u32,
    offset: FixedOffset,
) -> Result<(DateTime<Utc>, DateTime<Utc>), AppointmentError> {
    let invalid = || AppointmentError::InvalidDate(format!("{}-{} is not a calendar month", year, month));

    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(invalid)?;

    Ok((local_midnight(first, offset), local_midnight(next, offset)))
}

fn local_midnight(date: NaiveDate, offset: FixedOffset) -> DateTime<Utc> {
    // A fixed offset maps every local time to exactly one instant.
    let naive = date.and_time(chrono::NaiveTime::MIN);
    (naive - offset).and_utc()
}

/// `"<provider_id>:<year>-<month>-<day>"`, month and day unpadded.
pub fn day_cache_key(provider_id: &str, year: i32, month: u32, day: u32) -> String {
    format!("{}:{}-{}-{}", provider_id, year, month, day)
}

pub fn appointment_cache_key(provider_id: &str, date: DateTime<Utc>, offset: FixedOffset) -> String {
    format!("{}:{}", provider_id, date.with_timezone(&offset).format("%Y-%-m-%-d"))
}

/// e.g. `10/05/2030 às 14:00h`
pub fn format_notification_date(date: DateTime<Utc>, offset: FixedOffset) -> String {
    date.with_timezone(&offset).format("%d/%m/%Y às %H:%Mh").to_string()
}

/// Accepts RFC 3339, or a datetime without offset read as local schedule time.
pub fn parse_request_date(raw: &str, offset: FixedOffset) -> Result<DateTime<Utc>, AppointmentError> {
    let raw = raw.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Ok(date.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .and_then(|naive| offset.from_local_datetime(&naive).single())
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| AppointmentError::InvalidDate(format!("{:?} is not a valid date", raw)))
}
