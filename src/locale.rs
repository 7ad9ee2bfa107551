//! Locale-aware date formatting used by captions and the calendar header.
//!
//! Hosts plug their own tables in through [`DateLocalization`]; the bundled
//! [`EnglishLocale`] is backed by chrono's strftime names.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonthNameStyle {
    Wide,
    Abbreviated,
}

impl MonthNameStyle {
    pub fn from_short(short: bool) -> Self {
        if short {
            MonthNameStyle::Abbreviated
        } else {
            MonthNameStyle::Wide
        }
    }
}

pub trait DateLocalization {
    /// Twelve month names, January first.
    fn month_names(&self, style: MonthNameStyle) -> Vec<String>;

    /// Day-of-month without padding.
    fn format_day(&self, date: NaiveDate) -> String;

    fn format_year(&self, date: NaiveDate) -> String;

    fn format_month_and_year(&self, date: NaiveDate) -> String;

    /// Locale's first day of week, Sunday = 0.
    fn first_day_of_week_index(&self) -> u32;

    fn month_name(&self, date: NaiveDate, style: MonthNameStyle) -> String {
        self.month_names(style)
            .into_iter()
            .nth(date.month0() as usize)
            .unwrap_or_default()
    }

    /// Two-letter weekday headers starting at `first_day` (Sunday = 0).
    fn weekday_headers(&self, first_day: u32) -> Vec<String> {
        // 2000-01-02 is a Sunday
        (0..7)
            .filter_map(|i| NaiveDate::from_ymd_opt(2000, 1, 2 + (first_day + i) % 7))
            .map(|d| d.format("%a").to_string().chars().take(2).collect())
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnglishLocale {
    #[serde(default)]
    pub first_day_of_week: u32,
}

impl Default for EnglishLocale {
    fn default() -> Self {
        EnglishLocale { first_day_of_week: 0 }
    }
}

impl DateLocalization for EnglishLocale {
    fn month_names(&self, style: MonthNameStyle) -> Vec<String> {
        let pattern = match style {
            MonthNameStyle::Wide => "%B",
            MonthNameStyle::Abbreviated => "%b",
        };
        (1..=12)
            .filter_map(|m| NaiveDate::from_ymd_opt(2000, m, 1))
            .map(|d| d.format(pattern).to_string())
            .collect()
    }

    fn format_day(&self, date: NaiveDate) -> String {
        date.day().to_string()
    }

    fn format_year(&self, date: NaiveDate) -> String {
        date.format("%Y").to_string()
    }

    fn format_month_and_year(&self, date: NaiveDate) -> String {
        format!(
            "{} {}",
            self.month_name(date, MonthNameStyle::Wide),
            self.format_year(date)
        )
    }

    fn first_day_of_week_index(&self) -> u32 {
        self.first_day_of_week % 7
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_month_names_wide_and_abbreviated() {
        let locale = EnglishLocale::default();
        let wide = locale.month_names(MonthNameStyle::Wide);
        let short = locale.month_names(MonthNameStyle::Abbreviated);
        assert_eq!(wide.len(), 12);
        assert_eq!(wide[0], "January");
        assert_eq!(wide[11], "December");
        assert_eq!(short[5], "Jun");
    }

    #[test]
    fn test_format_pieces() {
        let locale = EnglishLocale::default();
        assert_eq!(locale.format_day(d(2020, 6, 5)), "5");
        assert_eq!(locale.format_year(d(2020, 6, 5)), "2020");
        assert_eq!(locale.format_month_and_year(d(2020, 6, 5)), "June 2020");
    }

    #[test]
    fn test_weekday_headers_rotate_with_first_day() {
        let locale = EnglishLocale::default();
        assert_eq!(locale.weekday_headers(0)[0], "Su");
        let monday_first = locale.weekday_headers(1);
        assert_eq!(monday_first[0], "Mo");
        assert_eq!(monday_first[6], "Su");
    }

    #[test]
    fn test_first_day_of_week_index_wraps() {
        let locale = EnglishLocale { first_day_of_week: 8 };
        assert_eq!(locale.first_day_of_week_index(), 1);
    }
}
