//! Scheduler navigator: previous/next step buttons around a caption that
//! opens a calendar.
//!
//! The navigator never changes its own `date`. Stepping or picking a date
//! emits [`NavigatorEvent::CurrentDateUpdated`] to the observer, and the
//! owner is expected to feed the new date back through
//! [`NavigatorOption::Date`]. That keeps a single owner for the date when the
//! navigator is embedded in a larger scheduler.

use super::button::ButtonOption;
use super::calendar::CalendarOption;
use super::{
    Button, Calendar, CalendarKeyResult, CalendarOptions, FocusOptions, Key, KeyOutcome,
    OptionObserver, Popover,
};
use crate::calc::date_utils::normalize_date;
use crate::calc::{
    AgendaDurationProvider, CaptionOptions, Direction, FixedAgendaDuration, StepConfig, ViewStep,
    compute_next, format_caption,
};
use crate::device::{DeviceDescriptor, OverlayKind};
use crate::locale::{DateLocalization, EnglishLocale};
use chrono::NaiveDate;
use std::sync::mpsc::Sender;
use tracing::{debug, info};

pub const NEXT_BUTTON_CLASS: &str = "dx-scheduler-navigator-next";
pub const CAPTION_BUTTON_CLASS: &str = "dx-scheduler-navigator-caption";
pub const PREVIOUS_BUTTON_CLASS: &str = "dx-scheduler-navigator-previous";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigatorOptions {
    pub date: NaiveDate,
    pub step: ViewStep,
    pub min: Option<NaiveDate>,
    pub max: Option<NaiveDate>,
    pub first_day_of_week: Option<u32>,
    pub use_short_date_format: bool,
    pub focus_state_enabled: bool,
    pub tab_index: Option<i32>,
    pub visible: bool,
    pub disabled: bool,
}

impl NavigatorOptions {
    pub fn new(date: NaiveDate) -> Self {
        NavigatorOptions {
            date,
            step: ViewStep::Day,
            min: None,
            max: None,
            first_day_of_week: None,
            use_short_date_format: false,
            focus_state_enabled: false,
            tab_index: None,
            visible: true,
            disabled: false,
        }
    }

    /// Defaults with the device-dependent rules applied.
    pub fn for_device(date: NaiveDate, device: &DeviceDescriptor) -> Self {
        NavigatorOptions {
            use_short_date_format: device.use_short_date_format(),
            focus_state_enabled: device.focus_state_enabled(),
            ..NavigatorOptions::new(date)
        }
    }

    fn focus(&self) -> FocusOptions {
        FocusOptions {
            focus_state_enabled: self.focus_state_enabled,
            tab_index: self.tab_index,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigatorOption {
    Date(NaiveDate),
    Step(ViewStep),
    Min(Option<NaiveDate>),
    Max(Option<NaiveDate>),
    FirstDayOfWeek(Option<u32>),
    UseShortDateFormat(bool),
    FocusStateEnabled(bool),
    TabIndex(Option<i32>),
    Visible(bool),
    Disabled(bool),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigatorEvent {
    CurrentDateUpdated(NaiveDate),
}

/// Fire-and-forget sink for navigator events.
pub trait NavigatorObserver {
    fn notify(&mut self, event: NavigatorEvent);
}

impl<F> NavigatorObserver for F
where
    F: FnMut(NavigatorEvent),
{
    fn notify(&mut self, event: NavigatorEvent) {
        self(event)
    }
}

/// Forwards events into a channel drained by the owner.
#[derive(Clone, Debug)]
pub struct ChannelObserver(pub Sender<NavigatorEvent>);

impl NavigatorObserver for ChannelObserver {
    fn notify(&mut self, event: NavigatorEvent) {
        // no acknowledgement expected; a dropped receiver just means nobody listens
        let _ = self.0.send(event);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigatorState {
    Idle,
    PopoverOpen,
}

pub struct NavigatorBuilder {
    options: NavigatorOptions,
    locale: Box<dyn DateLocalization>,
    agenda: Box<dyn AgendaDurationProvider>,
    overlay: OverlayKind,
}

impl NavigatorBuilder {
    pub fn locale(mut self, locale: impl DateLocalization + 'static) -> Self {
        self.locale = Box::new(locale);
        self
    }

    pub fn agenda_duration(mut self, provider: impl AgendaDurationProvider + 'static) -> Self {
        self.agenda = Box::new(provider);
        self
    }

    pub fn device(mut self, device: &DeviceDescriptor) -> Self {
        self.overlay = device.overlay_kind();
        self
    }

    pub fn build(self, observer: impl NavigatorObserver + 'static) -> Navigator {
        let focus = self.options.focus();
        let mut navigator = Navigator {
            prev: Button::new(PREVIOUS_BUTTON_CLASS, focus)
                .with_icon("chevronprev")
                .with_aria_label("Previous period"),
            caption: Button::new(CAPTION_BUTTON_CLASS, focus),
            next: Button::new(NEXT_BUTTON_CLASS, focus)
                .with_icon("chevronnext")
                .with_aria_label("Next period"),
            popover: Popover::new(self.overlay),
            calendar: None,
            options: self.options,
            locale: self.locale,
            agenda: self.agenda,
            observer: Box::new(observer),
        };
        navigator.update_buttons_state();
        navigator.render_caption();
        navigator
    }
}

pub struct Navigator {
    options: NavigatorOptions,
    locale: Box<dyn DateLocalization>,
    agenda: Box<dyn AgendaDurationProvider>,
    observer: Box<dyn NavigatorObserver>,
    prev: Button,
    caption: Button,
    next: Button,
    popover: Popover,
    calendar: Option<Calendar>,
}

impl Navigator {
    pub fn builder(options: NavigatorOptions) -> NavigatorBuilder {
        NavigatorBuilder {
            options,
            locale: Box::new(EnglishLocale::default()),
            agenda: Box::new(FixedAgendaDuration(None)),
            overlay: OverlayKind::Popover,
        }
    }

    pub fn options(&self) -> &NavigatorOptions {
        &self.options
    }

    pub fn locale(&self) -> &dyn DateLocalization {
        self.locale.as_ref()
    }

    pub fn prev_button(&self) -> &Button {
        &self.prev
    }

    pub fn caption_button(&self) -> &Button {
        &self.caption
    }

    pub fn next_button(&self) -> &Button {
        &self.next
    }

    pub fn caption_text(&self) -> &str {
        &self.caption.text
    }

    pub fn popover(&self) -> &Popover {
        &self.popover
    }

    /// The embedded calendar, once the popover content has been rendered.
    pub fn calendar(&self) -> Option<&Calendar> {
        self.calendar.as_ref()
    }

    pub fn state(&self) -> NavigatorState {
        if self.popover.is_visible() {
            NavigatorState::PopoverOpen
        } else {
            NavigatorState::Idle
        }
    }

    pub fn step_config(&self) -> StepConfig {
        StepConfig::resolve(self.options.step, self.agenda.as_ref())
    }

    /// Date one step away from the current one, before clamping.
    pub fn next_date(&self, direction: Direction) -> NaiveDate {
        compute_next(&self.step_config(), self.options.date, direction)
    }

    fn update_buttons_state(&mut self) {
        let prev_disabled = self
            .options
            .min
            .is_some_and(|min| self.next_date(Direction::Previous) <= min);
        let next_disabled = self
            .options
            .max
            .is_some_and(|max| self.next_date(Direction::Next) >= max);
        self.prev.option_changed(ButtonOption::Disabled(prev_disabled));
        self.next.option_changed(ButtonOption::Disabled(next_disabled));
    }

    fn render_caption(&mut self) {
        let opts = CaptionOptions {
            short: self.options.use_short_date_format,
            first_day_of_week: self.options.first_day_of_week,
        };
        let text = format_caption(
            &self.step_config(),
            self.options.date,
            &opts,
            self.locale.as_ref(),
        );
        self.caption.option_changed(ButtonOption::Text(text));
    }

    /// Steps, clamps into `[min, max]` and notifies. The navigator's own date
    /// is left for the owner to update.
    pub fn update_current_date(&mut self, direction: Direction) -> NaiveDate {
        let date = normalize_date(self.next_date(direction), self.options.min, self.options.max);
        info!(step = %self.options.step, ?direction, %date, "current date updated");
        self.observer.notify(NavigatorEvent::CurrentDateUpdated(date));
        date
    }

    /// Activates the previous button. Returns false while it is disabled.
    pub fn click_prev(&mut self) -> bool {
        if !self.prev.click() {
            return false;
        }
        self.update_current_date(Direction::Previous);
        true
    }

    /// Activates the next button. Returns false while it is disabled.
    pub fn click_next(&mut self) -> bool {
        if !self.next.click() {
            return false;
        }
        self.update_current_date(Direction::Next);
        true
    }

    /// Caption click toggles the calendar popover.
    pub fn click_caption(&mut self) {
        if self.popover.toggle() {
            self.popover_content_ready();
        }
        debug!(state = ?self.state(), "caption toggled popover");
    }

    pub fn show_popover(&mut self) {
        if self.popover.show() {
            self.popover_content_ready();
        }
    }

    pub fn hide_popover(&mut self) {
        self.popover.hide();
    }

    fn popover_content_ready(&mut self) {
        let locale_first_day = self.locale.first_day_of_week_index();
        self.calendar = Some(Calendar::new(self.calendar_options(), locale_first_day));
    }

    fn calendar_options(&self) -> CalendarOptions {
        CalendarOptions {
            value: self.options.date,
            min: self.options.min,
            max: self.options.max,
            first_day_of_week: self.options.first_day_of_week,
            focus: FocusOptions {
                focus_state_enabled: self.options.focus_state_enabled,
                tab_index: None,
            },
        }
    }

    fn set_calendar_option(&mut self, change: CalendarOption) {
        if let Some(calendar) = self.calendar.as_mut() {
            calendar.option_changed(change);
        }
    }

    /// Picks `date` in the embedded calendar, as by a pointer click.
    /// Returns true when the pick was accepted and reported.
    pub fn pick_date(&mut self, date: NaiveDate) -> bool {
        let changed = match self.calendar.as_mut() {
            Some(calendar) => calendar.select(date),
            None => None,
        };
        match changed {
            Some(change) => self.calendar_value_changed(change.value),
            None => false,
        }
    }

    fn calendar_value_changed(&mut self, value: NaiveDate) -> bool {
        if !self.options.visible {
            return false;
        }
        info!(%value, "date picked in calendar");
        self.observer.notify(NavigatorEvent::CurrentDateUpdated(value));
        self.popover.hide();
        true
    }

    /// Keyboard handling for the focused caption.
    ///
    /// Enter/Space opens the popover; while it is open they fall through to
    /// the calendar together with the navigation keys. Tab closes the
    /// popover and lets focus move on.
    pub fn handle_key(&mut self, key: Key) -> KeyOutcome {
        if !self.options.focus_state_enabled || self.options.disabled {
            return KeyOutcome::NotHandled;
        }
        match key {
            Key::Tab => {
                self.hide_popover();
                KeyOutcome::NotHandled
            }
            Key::Enter | Key::Space if !self.popover.is_visible() => {
                self.show_popover();
                KeyOutcome::Handled
            }
            _ if self.popover.is_visible() => self.forward_to_calendar(key),
            _ => KeyOutcome::NotHandled,
        }
    }

    fn forward_to_calendar(&mut self, key: Key) -> KeyOutcome {
        let result = match self.calendar.as_mut() {
            Some(calendar) => calendar.handle_key(key),
            None => CalendarKeyResult::Ignored,
        };
        match result {
            CalendarKeyResult::Selected(change) => {
                self.calendar_value_changed(change.value);
                KeyOutcome::Handled
            }
            CalendarKeyResult::Handled => KeyOutcome::Handled,
            CalendarKeyResult::Ignored => KeyOutcome::NotHandled,
        }
    }

    fn forward_focus(&mut self, button: ButtonOption, calendar: CalendarOption) {
        self.next.option_changed(button.clone());
        self.caption.option_changed(button.clone());
        self.prev.option_changed(button);
        self.set_calendar_option(calendar);
    }
}

impl OptionObserver for Navigator {
    type Change = NavigatorOption;

    fn option_changed(&mut self, change: NavigatorOption) {
        debug!(?change, "navigator option changed");
        match change {
            NavigatorOption::Date(date) => {
                self.options.date = date;
                self.update_buttons_state();
                self.render_caption();
                self.set_calendar_option(CalendarOption::Value(date));
            }
            NavigatorOption::Step(step) => {
                self.options.step = step;
                self.update_buttons_state();
                self.render_caption();
                self.set_calendar_option(CalendarOption::Value(self.options.date));
            }
            NavigatorOption::Min(min) => {
                self.options.min = min;
                self.update_buttons_state();
                self.set_calendar_option(CalendarOption::Min(min));
            }
            NavigatorOption::Max(max) => {
                self.options.max = max;
                self.update_buttons_state();
                self.set_calendar_option(CalendarOption::Max(max));
            }
            NavigatorOption::FirstDayOfWeek(day) => {
                self.options.first_day_of_week = day;
                self.render_caption();
                self.set_calendar_option(CalendarOption::FirstDayOfWeek(day));
            }
            NavigatorOption::UseShortDateFormat(short) => {
                self.options.use_short_date_format = short;
            }
            NavigatorOption::FocusStateEnabled(enabled) => {
                self.options.focus_state_enabled = enabled;
                self.forward_focus(
                    ButtonOption::FocusStateEnabled(enabled),
                    CalendarOption::FocusStateEnabled(enabled),
                );
            }
            NavigatorOption::TabIndex(index) => {
                self.options.tab_index = index;
                self.forward_focus(ButtonOption::TabIndex(index), CalendarOption::TabIndex(index));
            }
            NavigatorOption::Visible(visible) => self.options.visible = visible,
            NavigatorOption::Disabled(disabled) => self.options.disabled = disabled,
        }
    }
}
