use chrono::{Datelike, Duration, NaiveDate, Weekday};

pub const DAYS_IN_WEEK: i64 = 7;

/// Returns true for Saturday/Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Day of week with Sunday = 0, matching the `first_day_of_week` option.
pub fn day_of_week(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if NaiveDate::from_ymd_opt(year, 2, 29).is_some() => 29,
        2 => 28,
        _ => 30,
    }
}

/// Last valid day-of-month for the month containing `date`.
pub fn last_month_day(date: NaiveDate) -> u32 {
    days_in_month(date.year(), date.month())
}

/// Adds (or subtracts) whole days. Returns `date` unchanged when the result
/// would leave chrono's representable range.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or(date)
}

/// Moves by whole months, keeping the day-of-month when the target month has it
/// and clamping to the target month's last day otherwise.
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let total = date.month() as i32 - 1 + months;
    let new_month = (total.rem_euclid(12) + 1) as u32;
    let new_year = date.year() + total.div_euclid(12);
    let Some(first) = NaiveDate::from_ymd_opt(new_year, new_month, 1) else {
        return date;
    };
    first.with_day(date.day().min(last_month_day(first))).unwrap_or(date)
}

/// First date of the week containing `date` when weeks start on
/// `first_day_index` (0 = Sunday).
pub fn first_week_date(date: NaiveDate, first_day_index: u32) -> NaiveDate {
    let delta = (day_of_week(date) as i64 - (first_day_index % 7) as i64 + DAYS_IN_WEEK)
        % DAYS_IN_WEEK;
    add_days(date, -delta)
}

/// Moves `week_start` one week forward when it lies six or more days before
/// `current`, so a weekend date maps onto the following work week.
pub fn normalize_date_by_week(week_start: NaiveDate, current: NaiveDate) -> NaiveDate {
    if current.signed_duration_since(week_start).num_days() >= 6 {
        add_days(week_start, DAYS_IN_WEEK)
    } else {
        week_start
    }
}

/// Clamps `date` into `[min, max]`; an absent bound is open.
pub fn normalize_date(date: NaiveDate, min: Option<NaiveDate>, max: Option<NaiveDate>) -> NaiveDate {
    let mut result = date;
    if let Some(min) = min {
        if result < min {
            result = min;
        }
    }
    if let Some(max) = max {
        if result > max {
            result = max;
        }
    }
    result
}

/// Parses the `YYYY-MM-DD` form used in config files and on the command line.
pub fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    use anyhow::Context;
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("failed to parse date '{raw}' (expected YYYY-MM-DD)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_is_weekend() {
        assert!(is_weekend(d(2020, 6, 20))); // Saturday
        assert!(is_weekend(d(2020, 6, 21))); // Sunday
        assert!(!is_weekend(d(2020, 6, 22))); // Monday
    }

    #[test]
    fn test_day_of_week_sunday_is_zero() {
        assert_eq!(day_of_week(d(2020, 6, 14)), 0);
        assert_eq!(day_of_week(d(2020, 6, 17)), 3);
        assert_eq!(day_of_week(d(2020, 6, 20)), 6);
    }

    #[test]
    fn test_days_in_month_february() {
        assert_eq!(days_in_month(2021, 2), 28);
        assert_eq!(days_in_month(2020, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
    }

    #[test]
    fn test_last_month_day() {
        assert_eq!(last_month_day(d(2021, 4, 10)), 30);
        assert_eq!(last_month_day(d(2021, 12, 1)), 31);
    }

    #[test]
    fn test_add_days_rolls_over_month_and_year() {
        assert_eq!(add_days(d(2020, 12, 30), 3), d(2021, 1, 2));
        assert_eq!(add_days(d(2021, 3, 1), -1), d(2021, 2, 28));
    }

    #[test]
    fn test_add_days_out_of_range_keeps_date() {
        assert_eq!(add_days(d(2020, 6, 17), i64::MAX), d(2020, 6, 17));
        assert_eq!(add_days(d(2020, 6, 17), i64::MIN), d(2020, 6, 17));
        assert_eq!(add_days(NaiveDate::MAX, 1), NaiveDate::MAX);
    }

    #[test]
    fn test_add_months_clamps_month_end() {
        assert_eq!(add_months(d(2021, 1, 31), 1), d(2021, 2, 28));
        assert_eq!(add_months(d(2020, 1, 31), 1), d(2020, 2, 29));
        assert_eq!(add_months(d(2021, 3, 31), -1), d(2021, 2, 28));
    }

    #[test]
    fn test_add_months_across_year() {
        assert_eq!(add_months(d(2020, 11, 15), 2), d(2021, 1, 15));
        assert_eq!(add_months(d(2021, 1, 10), -1), d(2020, 12, 10));
    }

    #[test]
    fn test_first_week_date_monday_start() {
        // 2020-06-17 is a Wednesday
        assert_eq!(first_week_date(d(2020, 6, 17), 1), d(2020, 6, 15));
        assert_eq!(first_week_date(d(2020, 6, 15), 1), d(2020, 6, 15));
        assert_eq!(first_week_date(d(2020, 6, 21), 1), d(2020, 6, 15));
    }

    #[test]
    fn test_first_week_date_sunday_start() {
        assert_eq!(first_week_date(d(2020, 6, 17), 0), d(2020, 6, 14));
        assert_eq!(first_week_date(d(2020, 6, 20), 0), d(2020, 6, 14));
    }

    #[test]
    fn test_first_week_date_saturday_start() {
        assert_eq!(first_week_date(d(2020, 6, 17), 6), d(2020, 6, 13));
    }

    #[test]
    fn test_normalize_date_by_week() {
        // Sunday seen from a Monday-first week: six days after the week start
        assert_eq!(normalize_date_by_week(d(2020, 6, 15), d(2020, 6, 21)), d(2020, 6, 22));
        assert_eq!(normalize_date_by_week(d(2020, 6, 15), d(2020, 6, 19)), d(2020, 6, 15));
    }

    #[test]
    fn test_normalize_date_clamps() {
        let min = Some(d(2020, 6, 10));
        let max = Some(d(2020, 6, 20));
        assert_eq!(normalize_date(d(2020, 6, 1), min, max), d(2020, 6, 10));
        assert_eq!(normalize_date(d(2020, 6, 30), min, max), d(2020, 6, 20));
        assert_eq!(normalize_date(d(2020, 6, 15), min, max), d(2020, 6, 15));
        assert_eq!(normalize_date(d(1999, 1, 1), None, None), d(1999, 1, 1));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2020-06-17").unwrap(), d(2020, 6, 17));
        assert!(parse_date("17/06/2020").is_err());
    }
}
