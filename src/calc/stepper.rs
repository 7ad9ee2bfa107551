use crate::calc::date_utils::{add_days, add_months};
use crate::error::NavigatorError;
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

/// Days an agenda spans when the provider has no usable answer.
pub const DEFAULT_AGENDA_DURATION: i64 = 7;

/// Navigation granularity of the scheduler.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewStep {
    #[default]
    Day,
    Week,
    WorkWeek,
    Month,
    Agenda,
}

impl ViewStep {
    pub const ALL: [ViewStep; 5] = [
        ViewStep::Day,
        ViewStep::Week,
        ViewStep::WorkWeek,
        ViewStep::Month,
        ViewStep::Agenda,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ViewStep::Day => "day",
            ViewStep::Week => "week",
            ViewStep::WorkWeek => "workWeek",
            ViewStep::Month => "month",
            ViewStep::Agenda => "agenda",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewStep::Day => "Day",
            ViewStep::Week => "Week",
            ViewStep::WorkWeek => "Work Week",
            ViewStep::Month => "Month",
            ViewStep::Agenda => "Agenda",
        }
    }
}

impl fmt::Display for ViewStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ViewStep {
    type Err = NavigatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewStep::ALL
            .into_iter()
            .find(|step| step.name() == s)
            .ok_or_else(|| NavigatorError::UnknownStep {
                step: s.to_string(),
            })
    }
}

/// Which calendar unit a step advances.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateField {
    DayOfMonth,
    Month,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    pub fn sign(self) -> i64 {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }
}

/// Supplies the agenda view's duration in days.
pub trait AgendaDurationProvider {
    fn agenda_duration(&self) -> Option<i64>;
}

/// Provider answering with a value known up front.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixedAgendaDuration(pub Option<i64>);

impl AgendaDurationProvider for FixedAgendaDuration {
    fn agenda_duration(&self) -> Option<i64> {
        self.0
    }
}

impl<F> AgendaDurationProvider for F
where
    F: Fn() -> Option<i64>,
{
    fn agenda_duration(&self) -> Option<i64> {
        self()
    }
}

/// Resolves the agenda duration, falling back to 7 for missing or non-positive values.
pub fn resolve_agenda_duration(provider: &dyn AgendaDurationProvider) -> i64 {
    match provider.agenda_duration() {
        Some(days) if days > 0 => days,
        other => {
            tracing::debug!(?other, "agenda duration unavailable, using default");
            DEFAULT_AGENDA_DURATION
        }
    }
}

/// Per-step stepping rules, derived once per resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepConfig {
    pub step: ViewStep,
    pub duration: i64,
    pub date_field: DateField,
}

impl StepConfig {
    pub fn resolve(step: ViewStep, agenda: &dyn AgendaDurationProvider) -> Self {
        let (duration, date_field) = match step {
            ViewStep::Day => (1, DateField::DayOfMonth),
            ViewStep::Week | ViewStep::WorkWeek => (7, DateField::DayOfMonth),
            ViewStep::Month => (1, DateField::Month),
            ViewStep::Agenda => (resolve_agenda_duration(agenda), DateField::DayOfMonth),
        };
        StepConfig {
            step,
            duration,
            date_field,
        }
    }
}

/// One navigation step from `date` under `config`. Day steps roll over
/// month and year; month steps keep the day-of-month, clamped to the target
/// month's last day.
pub fn compute_next(config: &StepConfig, date: NaiveDate, direction: Direction) -> NaiveDate {
    let offset = config.duration * direction.sign();
    match config.date_field {
        DateField::DayOfMonth => add_days(date, offset),
        DateField::Month => add_months(date, offset as i32),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn config(step: ViewStep) -> StepConfig {
        StepConfig::resolve(step, &FixedAgendaDuration(None))
    }

    #[test]
    fn test_parse_known_steps() {
        assert_eq!("day".parse::<ViewStep>().unwrap(), ViewStep::Day);
        assert_eq!("workWeek".parse::<ViewStep>().unwrap(), ViewStep::WorkWeek);
        assert_eq!("agenda".parse::<ViewStep>().unwrap(), ViewStep::Agenda);
    }

    #[test]
    fn test_parse_unknown_step_fails() {
        let err = "decade".parse::<ViewStep>().unwrap_err();
        assert_eq!(
            err,
            NavigatorError::UnknownStep {
                step: "decade".to_string()
            }
        );
        // names are case sensitive
        assert!("workweek".parse::<ViewStep>().is_err());
    }

    #[test]
    fn test_durations() {
        assert_eq!(config(ViewStep::Day).duration, 1);
        assert_eq!(config(ViewStep::Week).duration, 7);
        assert_eq!(config(ViewStep::WorkWeek).duration, 7);
        assert_eq!(config(ViewStep::Month).duration, 1);
        assert_eq!(config(ViewStep::Month).date_field, DateField::Month);
        assert_eq!(config(ViewStep::Agenda).duration, DEFAULT_AGENDA_DURATION);
    }

    #[test]
    fn test_agenda_duration_fallbacks() {
        assert_eq!(resolve_agenda_duration(&FixedAgendaDuration(Some(5))), 5);
        assert_eq!(resolve_agenda_duration(&FixedAgendaDuration(Some(0))), 7);
        assert_eq!(resolve_agenda_duration(&FixedAgendaDuration(Some(-3))), 7);
        assert_eq!(resolve_agenda_duration(&FixedAgendaDuration(None)), 7);
        let provider = || Some(3);
        assert_eq!(resolve_agenda_duration(&provider), 3);
    }

    #[test]
    fn test_day_and_week_steps_roll_over() {
        assert_eq!(compute_next(&config(ViewStep::Day), d(2020, 12, 31), Direction::Next), d(2021, 1, 1));
        assert_eq!(compute_next(&config(ViewStep::Week), d(2020, 6, 17), Direction::Previous), d(2020, 6, 10));
        assert_eq!(compute_next(&config(ViewStep::WorkWeek), d(2020, 6, 28), Direction::Next), d(2020, 7, 5));
    }

    #[test]
    fn test_agenda_step_uses_provider_duration() {
        let agenda = StepConfig::resolve(ViewStep::Agenda, &FixedAgendaDuration(Some(5)));
        assert_eq!(compute_next(&agenda, d(2020, 6, 17), Direction::Next), d(2020, 6, 22));
        assert_eq!(compute_next(&agenda, d(2020, 6, 17), Direction::Previous), d(2020, 6, 12));
    }

    #[test]
    fn test_huge_agenda_duration_stays_put() {
        let agenda = StepConfig::resolve(ViewStep::Agenda, &FixedAgendaDuration(Some(i64::MAX)));
        assert_eq!(agenda.duration, i64::MAX);
        assert_eq!(compute_next(&agenda, d(2020, 6, 17), Direction::Next), d(2020, 6, 17));
        assert_eq!(compute_next(&agenda, d(2020, 6, 17), Direction::Previous), d(2020, 6, 17));
    }

    #[test]
    fn test_month_step_clamps_to_last_day() {
        let month = config(ViewStep::Month);
        assert_eq!(compute_next(&month, d(2021, 1, 31), Direction::Next), d(2021, 2, 28));
        assert_eq!(compute_next(&month, d(2020, 1, 31), Direction::Next), d(2020, 2, 29));
        assert_eq!(compute_next(&month, d(2021, 1, 15), Direction::Previous), d(2020, 12, 15));
    }

    #[test]
    fn test_round_trip_returns_to_start() {
        let start = d(2020, 6, 17);
        for step in ViewStep::ALL {
            let cfg = config(step);
            let there = compute_next(&cfg, start, Direction::Next);
            assert_eq!(compute_next(&cfg, there, Direction::Previous), start, "step {step}");
        }
    }

    #[test]
    fn test_month_round_trip_is_not_invertible_at_month_end() {
        let month = config(ViewStep::Month);
        let feb = compute_next(&month, d(2021, 1, 31), Direction::Next);
        assert_eq!(feb, d(2021, 2, 28));
        assert_eq!(compute_next(&month, feb, Direction::Previous), d(2021, 1, 28));
        assert_eq!(compute_next(&month, feb, Direction::Next), d(2021, 3, 28));
    }
}
