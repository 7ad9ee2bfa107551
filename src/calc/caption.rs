use crate::calc::date_utils::{add_days, day_of_week, first_week_date, normalize_date_by_week};
use crate::calc::stepper::{StepConfig, ViewStep};
use crate::locale::{DateLocalization, MonthNameStyle};
use chrono::{Datelike, NaiveDate};

const MONDAY_INDEX: u32 = 1;
const WEEKEND_DURATION: i64 = 2;
const WEEK_SHIFT: i64 = 6;
const WORK_WEEK_SHIFT: i64 = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CaptionOptions {
    /// Abbreviated month names.
    pub short: bool,
    /// Configured first day of week (Sunday = 0), if any.
    pub first_day_of_week: Option<u32>,
}

/// `"<day> <month>"`
pub fn date_month_text(locale: &dyn DateLocalization, date: NaiveDate, short: bool) -> String {
    format!(
        "{} {}",
        locale.format_day(date),
        locale.month_name(date, MonthNameStyle::from_short(short))
    )
}

/// `"<day> <month> <year>"`
pub fn full_date_text(locale: &dyn DateLocalization, date: NaiveDate, short: bool) -> String {
    format!(
        "{} {}",
        date_month_text(locale, date, short),
        locale.format_year(date)
    )
}

/// First and last dates shown by a week-like view.
///
/// A configured first day of `0` counts as unset and falls back to Monday for
/// shifted (work week) views or to the locale default otherwise.
pub fn week_bounds(
    locale: &dyn DateLocalization,
    date: NaiveDate,
    first_day_of_week: Option<u32>,
    shift: Option<i64>,
    reject_weekend: bool,
) -> (NaiveDate, NaiveDate) {
    let first_day = first_day_of_week
        .filter(|&day| day != 0)
        .unwrap_or_else(|| {
            if shift.is_some() {
                MONDAY_INDEX
            } else {
                locale.first_day_of_week_index()
            }
        });

    let mut first = first_week_date(date, first_day);
    if reject_weekend {
        first = normalize_date_by_week(first, date);
    }
    if let Some(configured) = first_day_of_week {
        if configured >= 6 && reject_weekend {
            first = add_days(first, 7 - configured as i64 + 1);
        }
    }

    let mut last = add_days(first, shift.unwrap_or(WEEK_SHIFT));
    if reject_weekend && day_of_week(last) % 6 == 0 {
        last = add_days(last, WEEKEND_DURATION);
    }
    (first, last)
}

fn week_caption(
    locale: &dyn DateLocalization,
    date: NaiveDate,
    opts: &CaptionOptions,
    shift: Option<i64>,
    reject_weekend: bool,
) -> String {
    let (first, last) = week_bounds(locale, date, opts.first_day_of_week, shift, reject_weekend);

    let different_months = first.month() != last.month();
    let short = different_months || opts.short;
    let first_text = if different_months {
        date_month_text(locale, first, short)
    } else {
        locale.format_day(first)
    };
    format!("{}-{}", first_text, full_date_text(locale, last, short))
}

fn agenda_caption(
    locale: &dyn DateLocalization,
    date: NaiveDate,
    duration: i64,
    short: bool,
) -> String {
    if duration > 1 {
        let last = add_days(date, duration - 1);
        format!(
            "{}-{}",
            locale.format_day(date),
            full_date_text(locale, last, short)
        )
    } else {
        full_date_text(locale, date, short)
    }
}

/// Caption for the range displayed around `date` by `config`'s step.
pub fn format_caption(
    config: &StepConfig,
    date: NaiveDate,
    opts: &CaptionOptions,
    locale: &dyn DateLocalization,
) -> String {
    match config.step {
        // Day follows `short` like a one-day agenda; Month keeps the wide name
        ViewStep::Day => full_date_text(locale, date, opts.short),
        ViewStep::Week => week_caption(locale, date, opts, None, false),
        ViewStep::WorkWeek => week_caption(locale, date, opts, Some(WORK_WEEK_SHIFT), true),
        ViewStep::Month => locale.format_month_and_year(date),
        ViewStep::Agenda => agenda_caption(locale, date, config.duration, opts.short),
    }
}
