//! Calendar-day arithmetic helpers.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveTime, TimeZone, Utc};

/// Truncate a timestamp to its calendar day.
pub fn day_of(at: DateTime<Utc>) -> NaiveDate {
    at.date_naive()
}

/// Midnight at the start of the timestamp's calendar day.
pub fn day_start(at: DateTime<Utc>) -> DateTime<Utc> {
    let midnight = at
        .date_naive()
        .and_time(NaiveTime::from_hms_opt(0, 0, 0).unwrap_or_default());
    Utc.from_utc_datetime(&midnight)
}

/// Add whole months, clamping the day to the last valid day of the
/// target month (Jan 31 + 1 month = Feb 28/29).
pub fn add_months_clamped(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// Add whole days, saturating at the calendar maximum.
pub fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX)
}

/// Number of days in the given month, or None for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = add_months_clamped(first, 1).pred_opt()?;
    Some(last.day())
}

/// Section-header label used by the history view
/// (e.g. "Monday, January 8, 2024").
pub fn day_label(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        assert_eq!(add_months_clamped(day(2024, 1, 31), 1), day(2024, 2, 29));
        assert_eq!(add_months_clamped(day(2023, 1, 31), 1), day(2023, 2, 28));
        assert_eq!(add_months_clamped(day(2024, 10, 31), 1), day(2024, 11, 30));
        assert_eq!(add_months_clamped(day(2024, 3, 15), 3), day(2024, 6, 15));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(2024, 4), Some(30));
        assert_eq!(days_in_month(2024, 12), Some(31));
        assert_eq!(days_in_month(2024, 13), None);
    }

    #[test]
    fn test_day_label() {
        assert_eq!(day_label(day(2024, 1, 8)), "Monday, January 8, 2024");
    }

    #[test]
    fn test_day_start() {
        let at: DateTime<Utc> = "2024-01-10T15:42:07Z".parse().unwrap();
        let start = day_start(at);
        assert_eq!(start.to_rfc3339(), "2024-01-10T00:00:00+00:00");
    }
}
