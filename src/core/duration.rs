use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Average month length in milliseconds: 365.25 days / 12.
pub const AVERAGE_MONTH_MILLIS: i64 = 2_629_800_000;

/// Elapsed months from `a` to `b`, rounded half away from zero to one
/// decimal place. Gaps of zero or less clamp to exactly 0.
pub fn months_between(a: DateTime<Utc>, b: DateTime<Utc>) -> f64 {
    let diff = i128::from((b - a).num_milliseconds());
    if diff <= 0 {
        return 0.0;
    }

    // round(diff * 10 / month) in integers, so exact half tenths never
    // drift below .5 through float division.
    let month = i128::from(AVERAGE_MONTH_MILLIS);
    let tenths = (diff * 20 + month) / (month * 2);
    tenths as f64 / 10.0
}

/// Parses a contract date. Plain `YYYY-MM-DD` is taken as midnight UTC;
/// full RFC 3339 timestamps are accepted as well.
pub fn parse_contract_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN).and_utc());
    }

    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
