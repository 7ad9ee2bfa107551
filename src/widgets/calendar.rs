use super::{FocusOptions, Key, OptionObserver};
use crate::calc::date_utils::{add_days, add_months, first_week_date, normalize_date};
use chrono::{Datelike, NaiveDate};

const WEEKS_SHOWN: usize = 6;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarOptions {
    pub value: NaiveDate,
    pub min: Option<NaiveDate>,
    pub max: Option<NaiveDate>,
    pub first_day_of_week: Option<u32>,
    pub focus: FocusOptions,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CalendarOption {
    Value(NaiveDate),
    Min(Option<NaiveDate>),
    Max(Option<NaiveDate>),
    FirstDayOfWeek(Option<u32>),
    FocusStateEnabled(bool),
    TabIndex(Option<i32>),
}

/// A user-driven change of the calendar's value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValueChanged {
    pub previous: NaiveDate,
    pub value: NaiveDate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalendarKeyResult {
    Ignored,
    Handled,
    Selected(ValueChanged),
}

/// Month calendar shown inside the navigator's popover.
///
/// The contoured date is the keyboard cursor; it is always kept inside
/// `[min, max]`. Option writes never report a [`ValueChanged`], only user
/// selection does.
#[derive(Clone, Debug)]
pub struct Calendar {
    options: CalendarOptions,
    contoured: NaiveDate,
    locale_first_day: u32,
}

impl Calendar {
    pub fn new(options: CalendarOptions, locale_first_day: u32) -> Self {
        let contoured = normalize_date(options.value, options.min, options.max);
        Calendar {
            options,
            contoured,
            locale_first_day,
        }
    }

    pub fn options(&self) -> &CalendarOptions {
        &self.options
    }

    pub fn value(&self) -> NaiveDate {
        self.options.value
    }

    pub fn contoured_date(&self) -> NaiveDate {
        self.contoured
    }

    pub fn first_day(&self) -> u32 {
        self.options.first_day_of_week.unwrap_or(self.locale_first_day) % 7
    }

    pub fn is_date_available(&self, date: NaiveDate) -> bool {
        self.options.min.is_none_or(|min| date >= min) && self.options.max.is_none_or(|max| date <= max)
    }

    /// Six full weeks covering the contoured date's month.
    pub fn weeks(&self) -> Vec<[NaiveDate; 7]> {
        let month_start = self.contoured.with_day(1).unwrap_or(self.contoured);
        let mut cursor = first_week_date(month_start, self.first_day());
        let mut weeks = Vec::with_capacity(WEEKS_SHOWN);
        for _ in 0..WEEKS_SHOWN {
            let mut week = [cursor; 7];
            for (i, slot) in week.iter_mut().enumerate() {
                *slot = add_days(cursor, i as i64);
            }
            cursor = add_days(cursor, 7);
            weeks.push(week);
        }
        weeks
    }

    fn move_contour(&mut self, date: NaiveDate) {
        self.contoured = normalize_date(date, self.options.min, self.options.max);
    }

    /// Selects `date` as by a click. Unavailable dates are rejected.
    pub fn select(&mut self, date: NaiveDate) -> Option<ValueChanged> {
        if !self.is_date_available(date) {
            return None;
        }
        self.contoured = date;
        let previous = self.options.value;
        if previous == date {
            return None;
        }
        self.options.value = date;
        Some(ValueChanged {
            previous,
            value: date,
        })
    }

    pub fn handle_key(&mut self, key: Key) -> CalendarKeyResult {
        let target = match key {
            Key::Left => add_days(self.contoured, -1),
            Key::Right => add_days(self.contoured, 1),
            Key::Up => add_days(self.contoured, -7),
            Key::Down => add_days(self.contoured, 7),
            Key::PageUp => add_months(self.contoured, -1),
            Key::PageDown => add_months(self.contoured, 1),
            Key::Enter | Key::Space => {
                return match self.select(self.contoured) {
                    Some(change) => CalendarKeyResult::Selected(change),
                    None => CalendarKeyResult::Handled,
                };
            }
            Key::Tab | Key::Escape => return CalendarKeyResult::Ignored,
        };
        self.move_contour(target);
        CalendarKeyResult::Handled
    }
}

impl OptionObserver for Calendar {
    type Change = CalendarOption;

    fn option_changed(&mut self, change: CalendarOption) {
        match change {
            CalendarOption::Value(value) => {
                self.options.value = value;
                self.move_contour(value);
            }
            CalendarOption::Min(min) => {
                self.options.min = min;
                self.move_contour(self.contoured);
            }
            CalendarOption::Max(max) => {
                self.options.max = max;
                self.move_contour(self.contoured);
            }
            CalendarOption::FirstDayOfWeek(day) => self.options.first_day_of_week = day,
            CalendarOption::FocusStateEnabled(enabled) => {
                self.options.focus.focus_state_enabled = enabled
            }
            CalendarOption::TabIndex(index) => self.options.focus.tab_index = index,
        }
    }
}
