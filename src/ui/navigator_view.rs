use super::Tui;
use crate::calc::date_utils::{is_weekend, normalize_date};
use crate::calc::ViewStep;
use crate::data::{ConfigFile, Persistable, SessionState};
use crate::device::OverlayKind;
use crate::input::{ClickTracker, PointerEvent, PointerKind, widget_key};
use crate::widgets::radio_button::{RADIO_BUTTON_CHECKED_CLASS, RadioButtonOptions};
use crate::widgets::{
    Button, ChannelObserver, Key, KeyOutcome, Navigator, NavigatorEvent, NavigatorOption,
    NavigatorOptions, NavigatorState, OptionObserver, RadioButton, RadioGroup,
};
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use crossterm::event::{self, Event as CEvent, KeyCode, KeyEventKind, KeyModifiers, MouseEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration as StdDuration;
use tracing::{debug, info, warn};

// 7 two-character day cells with single spaces, plus borders
const CALENDAR_WIDTH: u16 = 22;
const CALENDAR_HEIGHT: u16 = 9;
const DAY_CELL_WIDTH: u16 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Focus {
    Navigator,
    Steps,
}

/// What sits under a terminal cell, recorded while rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HitTarget {
    Previous,
    Caption,
    Next,
    Step(usize),
    Day(NaiveDate),
}

#[derive(Debug, Default)]
struct HitMap(Vec<(Rect, HitTarget)>);

impl HitMap {
    fn clear(&mut self) {
        self.0.clear();
    }

    fn push(&mut self, area: Rect, target: HitTarget) {
        if !area.is_empty() {
            self.0.push((area, target));
        }
    }

    /// Topmost target at the cell; later pushes are drawn above earlier ones.
    fn target_at(&self, column: u16, row: u16) -> Option<HitTarget> {
        self.0
            .iter()
            .rev()
            .find(|(area, _)| area.contains(Position::new(column, row)))
            .map(|(_, target)| *target)
    }
}

pub struct App {
    navigator: Navigator,
    events: Receiver<NavigatorEvent>,
    steps: RadioGroup<ViewStep>,
    focus: Focus,
    clicks: ClickTracker<HitTarget>,
    hits: HitMap,
    popup_area: Option<Rect>,
    today: NaiveDate,
    config_dir: Option<PathBuf>,
    status: Option<String>,
}

impl App {
    pub fn new(options: NavigatorOptions, config: &ConfigFile, today: NaiveDate) -> Self {
        let (tx, events) = mpsc::channel();
        let step = options.step;
        let navigator = config.navigator_builder(options).build(ChannelObserver(tx));
        let steps = RadioGroup::new(
            ViewStep::ALL.iter().map(|s| (*s, s.label().to_string())),
            step,
            &RadioButtonOptions::for_device(&config.device),
        );
        let mut app = App {
            navigator,
            events,
            steps,
            focus: Focus::Navigator,
            clicks: ClickTracker::new(),
            hits: HitMap::default(),
            popup_area: None,
            today,
            config_dir: None,
            status: None,
        };
        app.clamp_date();
        app
    }

    /// Directory config.yaml is reloaded from with `r`.
    pub fn with_config_dir(mut self, dir: &Path) -> Self {
        self.config_dir = Some(dir.to_path_buf());
        self
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Snapshot for state.json.
    pub fn session(&self) -> SessionState {
        let options = self.navigator.options();
        SessionState {
            date: Some(options.date),
            step: Some(options.step.name().to_string()),
        }
    }

    /// The navigator only reports dates; the owner writes them back.
    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                NavigatorEvent::CurrentDateUpdated(date) => {
                    self.navigator.option_changed(NavigatorOption::Date(date));
                }
            }
        }
    }

    fn set_step(&mut self, step: ViewStep) {
        debug!(%step, "step selected");
        self.navigator.option_changed(NavigatorOption::Step(step));
    }

    /// Keeps the date inside `[min, max]` after the bounds moved.
    fn clamp_date(&mut self) {
        let options = self.navigator.options();
        let date = normalize_date(options.date, options.min, options.max);
        if date != options.date {
            debug!(from = %options.date, to = %date, "date clamped into bounds");
            self.navigator.option_changed(NavigatorOption::Date(date));
        }
    }

    /// Applies the navigator section of `config` to the running navigator.
    pub fn apply_config(&mut self, config: &ConfigFile) -> Result<()> {
        for change in config.navigator.option_changes(&config.device)? {
            self.navigator.option_changed(change);
        }
        self.clamp_date();
        self.steps
            .apply_options(&RadioButtonOptions::for_device(&config.device));
        self.steps.set_focused(self.focus == Focus::Steps);
        Ok(())
    }

    fn reload_config(&mut self) {
        let Some(dir) = self.config_dir.clone() else {
            return;
        };
        let result = ConfigFile::load_from(&dir).and_then(|config| self.apply_config(&config));
        self.status = Some(match result {
            Ok(()) => {
                info!(dir = %dir.display(), "config reloaded");
                "config reloaded".to_string()
            }
            Err(err) => {
                warn!(error = %err, "config reload failed");
                format!("config reload failed: {err}")
            }
        });
    }

    /// Digits 1-5 pick a view directly; the step selector mirrors the choice.
    fn select_step_shortcut(&mut self, digit: char) {
        let index = (digit as usize).saturating_sub('1' as usize);
        let Some(step) = ViewStep::ALL.get(index).copied() else {
            return;
        };
        if step != self.navigator.options().step {
            self.steps.set_selected(step);
            self.set_step(step);
        }
    }

    fn go_to_today(&mut self) {
        let options = self.navigator.options();
        let date = normalize_date(self.today, options.min, options.max);
        self.navigator.option_changed(NavigatorOption::Date(date));
    }

    fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Navigator => Focus::Steps,
            Focus::Steps => Focus::Navigator,
        };
        self.steps.set_focused(self.focus == Focus::Steps);
    }

    /// Returns true when the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
            return true;
        }
        let enabled = self.navigator_enabled();
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('r') => self.reload_config(),
            KeyCode::Char('n') if enabled => {
                self.navigator.click_next();
            }
            KeyCode::Char('p') if enabled => {
                self.navigator.click_prev();
            }
            KeyCode::Char('c') if enabled => self.navigator.click_caption(),
            KeyCode::Char('t') if enabled => self.go_to_today(),
            KeyCode::Char('n' | 'p' | 'c' | 't') => {}
            KeyCode::Char(digit @ '1'..='5') => self.select_step_shortcut(digit),
            _ => {
                if let Some(key) = widget_key(code) {
                    match self.focus {
                        Focus::Navigator => self.navigator_key(key),
                        Focus::Steps => self.steps_key(key),
                    }
                }
            }
        }
        self.drain_events();
        false
    }

    /// A hidden or disabled navigator takes no input.
    fn navigator_enabled(&self) -> bool {
        let options = self.navigator.options();
        options.visible && !options.disabled
    }

    fn navigator_key(&mut self, key: Key) {
        if key == Key::Tab {
            self.navigator.handle_key(key);
            self.cycle_focus();
            return;
        }
        if !self.navigator_enabled() {
            return;
        }
        if self.navigator.handle_key(key) == KeyOutcome::Handled {
            return;
        }
        let idle = self.navigator.state() == NavigatorState::Idle;
        match key {
            Key::Escape => self.navigator.hide_popover(),
            Key::Left if idle => {
                self.navigator.click_prev();
            }
            Key::Right if idle => {
                self.navigator.click_next();
            }
            // keyboard focus is off on this device, act like a click
            Key::Enter | Key::Space => self.navigator.click_caption(),
            _ => {}
        }
    }

    fn steps_key(&mut self, key: Key) {
        if key == Key::Tab {
            self.cycle_focus();
            return;
        }
        let (outcome, changed) = self.steps.handle_key(key);
        let changed = match (outcome, key) {
            (KeyOutcome::NotHandled, Key::Enter | Key::Space) => {
                self.steps.click(self.steps.focused_index())
            }
            _ => changed,
        };
        if let Some(step) = changed {
            self.set_step(step);
        }
    }

    pub fn handle_mouse(&mut self, mouse: &MouseEvent) {
        if let Some(pointer) = PointerEvent::from_mouse(mouse) {
            self.handle_pointer(pointer);
        }
    }

    pub fn handle_pointer(&mut self, pointer: PointerEvent) {
        let target = match pointer.kind {
            PointerKind::Cancel => None,
            _ => self.hits.target_at(pointer.column, pointer.row),
        };
        let step_index = match target {
            Some(HitTarget::Step(index)) => Some(index),
            _ => None,
        };
        match pointer.kind {
            PointerKind::Move => self.steps.hover(step_index),
            PointerKind::Down => {
                self.steps.press(step_index);
                self.close_popover_on_outside_press(pointer, target);
            }
            PointerKind::Up | PointerKind::Cancel => self.steps.press(None),
        }
        if let Some(clicked) = self.clicks.on_event(pointer.kind, target) {
            self.activate(clicked);
        }
        self.drain_events();
    }

    fn close_popover_on_outside_press(&mut self, pointer: PointerEvent, target: Option<HitTarget>) {
        if !self.navigator.popover().is_visible() || target == Some(HitTarget::Caption) {
            return;
        }
        let inside = self
            .popup_area
            .is_some_and(|area| area.contains(Position::new(pointer.column, pointer.row)));
        if !inside {
            self.navigator.hide_popover();
        }
    }

    fn activate(&mut self, target: HitTarget) {
        debug!(?target, "pointer click");
        let navigator_target = !matches!(target, HitTarget::Step(_));
        if navigator_target && !self.navigator_enabled() {
            return;
        }
        match target {
            HitTarget::Previous => {
                self.navigator.click_prev();
            }
            HitTarget::Caption => self.navigator.click_caption(),
            HitTarget::Next => {
                self.navigator.click_next();
            }
            HitTarget::Step(index) => {
                if let Some(step) = self.steps.click(index) {
                    self.set_step(step);
                }
            }
            HitTarget::Day(date) => {
                self.navigator.pick_date(date);
            }
        }
    }

    pub fn render(&mut self, f: &mut Frame) {
        self.hits.clear();
        self.popup_area = None;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // prev / caption / next
                Constraint::Length(1), // step selector
                Constraint::Min(0),    // current date, calendar popover
                Constraint::Length(1), // help
            ])
            .split(f.area());

        let caption_area = self.render_navigator(f, chunks[0]);
        self.render_steps(f, chunks[1]);
        self.render_body(f, chunks[2]);
        self.render_help(f, chunks[3]);
        self.render_popover(f, caption_area, chunks[2]);
    }

    fn render_navigator(&mut self, f: &mut Frame, area: Rect) -> Rect {
        if !self.navigator.options().visible {
            return Rect::default();
        }
        let disabled = self.navigator.options().disabled;
        let caption_width = self.navigator.caption_text().chars().count() as u16 + 4;
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(caption_width),
                Constraint::Length(5),
                Constraint::Min(0),
            ])
            .split(area);

        let caption_focused = self.focus == Focus::Navigator;
        f.render_widget(
            button_widget(self.navigator.prev_button(), "<", false, disabled),
            cols[0],
        );
        f.render_widget(
            button_widget(
                self.navigator.caption_button(),
                self.navigator.caption_text(),
                caption_focused,
                disabled,
            ),
            cols[1],
        );
        f.render_widget(
            button_widget(self.navigator.next_button(), ">", false, disabled),
            cols[2],
        );

        self.hits.push(cols[0], HitTarget::Previous);
        self.hits.push(cols[1], HitTarget::Caption);
        self.hits.push(cols[2], HitTarget::Next);
        cols[1]
    }

    fn render_steps(&mut self, f: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        let mut x = area.x;
        for (index, (_, button)) in self.steps.items().enumerate() {
            let mark = if button.aria().checked { "(*) " } else { "( ) " };
            let text = format!("{mark}{}", button.label);
            let width = text.chars().count() as u16;
            self.hits
                .push(Rect::new(x, area.y, width, 1).intersection(area), HitTarget::Step(index));
            spans.push(Span::styled(text, radio_style(button)));
            spans.push(Span::raw("  "));
            x = x.saturating_add(width + 2);
        }
        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_body(&self, f: &mut Frame, area: Rect) {
        let options = self.navigator.options();
        let mut lines = vec![
            Line::from(""),
            Line::from(format!("  Current date: {}", options.date.format("%A, %Y-%m-%d"))),
            Line::from(format!("  View:         {}", options.step.label())),
        ];
        if let Some(status) = &self.status {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("  {status}"),
                Style::default().fg(Color::DarkGray),
            )));
        }
        f.render_widget(Paragraph::new(lines), area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let help = "n/p step  1-5 view  c calendar  t today  r reload  Tab focus  Esc close  q quit";
        f.render_widget(
            Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
            area,
        );
    }

    fn render_popover(&mut self, f: &mut Frame, anchor: Rect, body: Rect) {
        let popover = self.navigator.popover();
        if !popover.is_visible() || !self.navigator.options().visible {
            return;
        }
        let Some(calendar) = self.navigator.calendar() else {
            return;
        };
        let popup = match popover.kind {
            OverlayKind::Popover => {
                Rect::new(anchor.x, body.y, CALENDAR_WIDTH, CALENDAR_HEIGHT).intersection(body)
            }
            OverlayKind::FullScreenPopup => f.area(),
        };
        let locale = self.navigator.locale();
        let mut block = Block::default()
            .borders(Borders::ALL)
            .title(locale.format_month_and_year(calendar.contoured_date()));
        if popover.kind == OverlayKind::FullScreenPopup {
            block = block.title_bottom(" Esc: Cancel ");
        }
        let inner = block.inner(popup);

        let mut lines = vec![Line::from(Span::styled(
            locale.weekday_headers(calendar.first_day()).join(" "),
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        let month = calendar.contoured_date().month();
        for (row, week) in calendar.weeks().iter().enumerate() {
            let mut spans = Vec::new();
            for (col, date) in week.iter().enumerate() {
                let style = calendar_day_style(
                    *date == calendar.value(),
                    *date == calendar.contoured_date(),
                    *date == self.today,
                    date.month() == month,
                    is_weekend(*date),
                    calendar.is_date_available(*date),
                );
                spans.push(Span::styled(format!("{:>2}", date.day()), style));
                spans.push(Span::raw(" "));
                let cell = Rect::new(
                    inner.x + col as u16 * DAY_CELL_WIDTH,
                    inner.y + 1 + row as u16,
                    2,
                    1,
                )
                .intersection(inner);
                self.hits.push(cell, HitTarget::Day(*date));
            }
            lines.push(Line::from(spans));
        }

        f.render_widget(Clear, popup);
        f.render_widget(block, popup);
        f.render_widget(Paragraph::new(lines), inner);
        self.popup_area = Some(popup);
    }
}

fn button_widget<'a>(
    button: &Button,
    label: &'a str,
    focused: bool,
    navigator_disabled: bool,
) -> Paragraph<'a> {
    let style = if button.disabled || navigator_disabled {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Paragraph::new(label)
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(border))
}

fn radio_style(button: &RadioButton) -> Style {
    let mut style = Style::default();
    if button.classes().contains(&RADIO_BUTTON_CHECKED_CLASS) {
        style = style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
    }
    if button.is_hovered() {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    if button.is_focused() {
        style = style.add_modifier(Modifier::REVERSED);
    }
    if button.is_active() {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if let Some(ripple) = button.ink_ripple() {
        if (0..ripple.config.waves_number).any(|wave| ripple.is_wave_shown(wave)) {
            style = style.bg(Color::Cyan);
        }
    }
    style
}

/// Style for one calendar day cell.
pub(crate) fn calendar_day_style(
    is_selected: bool,
    is_contoured: bool,
    is_today: bool,
    in_month: bool,
    is_weekend: bool,
    is_available: bool,
) -> Style {
    if !is_available {
        return Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT);
    }
    let mut style = if is_selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else if is_today {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else if !in_month {
        Style::default().add_modifier(Modifier::DIM)
    } else if is_weekend {
        Style::default().fg(Color::LightRed)
    } else {
        Style::default()
    };
    if is_contoured {
        style = style.add_modifier(Modifier::UNDERLINED);
        if !is_selected {
            style = style.add_modifier(Modifier::REVERSED);
        }
    }
    style
}

// ── App event loop ────────────────────────────────────────────────────────────

pub fn run_app(terminal: &mut Tui, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;
        if event::poll(StdDuration::from_millis(16))? {
            match event::read()? {
                CEvent::Key(key) if key.kind != KeyEventKind::Release => {
                    if app.handle_key(key.code, key.modifiers) {
                        break;
                    }
                }
                CEvent::Mouse(mouse) => app.handle_mouse(&mouse),
                CEvent::FocusLost => app.handle_pointer(PointerEvent::cancel()),
                _ => {}
            }
        }
    }
    Ok(())
}
