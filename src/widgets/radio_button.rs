use super::{Key, KeyOutcome, OptionObserver};
use crate::device::DeviceDescriptor;

pub const RADIO_BUTTON_CLASS: &str = "dx-radiobutton";
pub const RADIO_BUTTON_CHECKED_CLASS: &str = "dx-radiobutton-checked";

const FOCUS_WAVE: usize = 0;
const ACTIVE_WAVE: usize = 1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RippleConfig {
    pub wave_size_coefficient: f32,
    pub use_hold_animation: bool,
    pub waves_number: usize,
    pub is_centered: bool,
}

impl Default for RippleConfig {
    fn default() -> Self {
        RippleConfig {
            wave_size_coefficient: 3.3,
            use_hold_animation: false,
            waves_number: 2,
            is_centered: true,
        }
    }
}

/// Which ripple waves are currently shown. Drawing them is up to the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct InkRipple {
    pub config: RippleConfig,
    waves: Vec<bool>,
}

impl InkRipple {
    pub fn new(config: RippleConfig) -> Self {
        InkRipple {
            config,
            waves: vec![false; config.waves_number],
        }
    }

    pub fn is_wave_shown(&self, index: usize) -> bool {
        self.waves.get(index).copied().unwrap_or(false)
    }

    fn set_wave(&mut self, index: usize, shown: bool) {
        if let Some(wave) = self.waves.get_mut(index) {
            *wave = shown;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RadioButtonOptions {
    pub value: bool,
    pub hover_state_enabled: bool,
    pub active_state_enabled: bool,
    pub focus_state_enabled: bool,
    pub use_ink_ripple: bool,
    pub disabled: bool,
}

impl Default for RadioButtonOptions {
    fn default() -> Self {
        RadioButtonOptions {
            value: false,
            hover_state_enabled: true,
            active_state_enabled: true,
            focus_state_enabled: false,
            use_ink_ripple: false,
            disabled: false,
        }
    }
}

impl RadioButtonOptions {
    pub fn for_device(device: &DeviceDescriptor) -> Self {
        RadioButtonOptions {
            focus_state_enabled: device.focus_state_enabled(),
            use_ink_ripple: device.use_ink_ripple(),
            ..RadioButtonOptions::default()
        }
    }
}

/// Accessibility attributes of a radio button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RadioAria {
    pub role: &'static str,
    pub checked: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RadioButtonOption {
    Value(bool),
    UseInkRipple(bool),
    FocusStateEnabled(bool),
    Disabled(bool),
}

#[derive(Clone, Debug)]
pub struct RadioButton {
    pub label: String,
    options: RadioButtonOptions,
    ink_ripple: Option<InkRipple>,
    focused: bool,
    active: bool,
    hovered: bool,
}

impl RadioButton {
    pub fn new(label: impl Into<String>, options: RadioButtonOptions) -> Self {
        let mut button = RadioButton {
            label: label.into(),
            options,
            ink_ripple: None,
            focused: false,
            active: false,
            hovered: false,
        };
        button.render();
        button
    }

    fn render(&mut self) {
        self.ink_ripple = self
            .options
            .use_ink_ripple
            .then(|| InkRipple::new(RippleConfig::default()));
    }

    pub fn options(&self) -> &RadioButtonOptions {
        &self.options
    }

    pub fn is_checked(&self) -> bool {
        self.options.value
    }

    pub fn ink_ripple(&self) -> Option<&InkRipple> {
        self.ink_ripple.as_ref()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn classes(&self) -> Vec<&'static str> {
        let mut classes = vec![RADIO_BUTTON_CLASS];
        if self.options.value {
            classes.push(RADIO_BUTTON_CHECKED_CLASS);
        }
        classes
    }

    pub fn aria(&self) -> RadioAria {
        RadioAria {
            role: "radio",
            checked: self.options.value,
        }
    }

    /// Pointer or keyboard activation. Returns true when the value changed.
    pub fn click(&mut self) -> bool {
        if self.options.disabled || self.options.value {
            return false;
        }
        self.option_changed(RadioButtonOption::Value(true));
        true
    }

    /// Space activates the button; everything else keeps its default handling.
    pub fn handle_key(&mut self, key: Key) -> KeyOutcome {
        if !self.options.focus_state_enabled || self.options.disabled {
            return KeyOutcome::NotHandled;
        }
        match key {
            Key::Space => {
                self.click();
                KeyOutcome::Handled
            }
            _ => KeyOutcome::NotHandled,
        }
    }

    pub fn set_focused(&mut self, focused: bool) {
        if !self.options.focus_state_enabled {
            return;
        }
        self.focused = focused;
        if let Some(ripple) = self.ink_ripple.as_mut() {
            ripple.set_wave(FOCUS_WAVE, focused);
        }
    }

    pub fn set_active(&mut self, active: bool) {
        if !self.options.active_state_enabled || self.options.disabled {
            return;
        }
        self.active = active;
        if let Some(ripple) = self.ink_ripple.as_mut() {
            ripple.set_wave(ACTIVE_WAVE, active);
        }
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered && self.options.hover_state_enabled && !self.options.disabled;
    }
}

impl OptionObserver for RadioButton {
    type Change = RadioButtonOption;

    fn option_changed(&mut self, change: RadioButtonOption) {
        match change {
            RadioButtonOption::Value(value) => self.options.value = value,
            RadioButtonOption::UseInkRipple(enabled) => {
                self.options.use_ink_ripple = enabled;
                self.render();
            }
            RadioButtonOption::FocusStateEnabled(enabled) => {
                self.options.focus_state_enabled = enabled;
                if !enabled {
                    self.focused = false;
                    if let Some(ripple) = self.ink_ripple.as_mut() {
                        ripple.set_wave(FOCUS_WAVE, false);
                    }
                }
            }
            RadioButtonOption::Disabled(disabled) => {
                self.options.disabled = disabled;
                if disabled {
                    self.active = false;
                    self.hovered = false;
                }
            }
        }
    }
}

/// Radio buttons with exactly one checked item.
#[derive(Clone, Debug)]
pub struct RadioGroup<T> {
    items: Vec<(T, RadioButton)>,
    focused: usize,
}

impl<T: Copy + PartialEq> RadioGroup<T> {
    pub fn new(
        items: impl IntoIterator<Item = (T, String)>,
        selected: T,
        options: &RadioButtonOptions,
    ) -> Self {
        let items: Vec<(T, RadioButton)> = items
            .into_iter()
            .map(|(value, label)| {
                let opts = RadioButtonOptions {
                    value: value == selected,
                    ..options.clone()
                };
                (value, RadioButton::new(label, opts))
            })
            .collect();
        let focused = items.iter().position(|(v, _)| *v == selected).unwrap_or(0);
        RadioGroup { items, focused }
    }

    pub fn items(&self) -> impl Iterator<Item = &(T, RadioButton)> {
        self.items.iter()
    }

    pub fn focused_index(&self) -> usize {
        self.focused
    }

    /// Checks the item at `index` and clears the others. Returns the newly
    /// selected value when the selection changed.
    pub fn click(&mut self, index: usize) -> Option<T> {
        let changed = self.items.get_mut(index)?.1.click();
        if !changed {
            return None;
        }
        self.focused = index;
        self.clear_others(index);
        self.items.get(index).map(|(value, _)| *value)
    }

    /// Mirrors an externally chosen value without reporting a change.
    pub fn set_selected(&mut self, selected: T) {
        let mut index = None;
        for (i, (value, button)) in self.items.iter_mut().enumerate() {
            let checked = *value == selected;
            button.option_changed(RadioButtonOption::Value(checked));
            if checked {
                index = Some(i);
            }
        }
        if let Some(index) = index {
            self.move_focus(index);
        }
    }

    /// Pushes device-dependent options to every item; checked state is kept.
    pub fn apply_options(&mut self, options: &RadioButtonOptions) {
        for (_, button) in self.items.iter_mut() {
            button.option_changed(RadioButtonOption::UseInkRipple(options.use_ink_ripple));
            button.option_changed(RadioButtonOption::FocusStateEnabled(
                options.focus_state_enabled,
            ));
            button.option_changed(RadioButtonOption::Disabled(options.disabled));
        }
    }

    /// Arrow keys move focus, Space checks the focused item.
    pub fn handle_key(&mut self, key: Key) -> (KeyOutcome, Option<T>) {
        let len = self.items.len();
        if len == 0 {
            return (KeyOutcome::NotHandled, None);
        }
        match key {
            Key::Left | Key::Up => {
                self.move_focus((self.focused + len - 1) % len);
                (KeyOutcome::Handled, None)
            }
            Key::Right | Key::Down => {
                self.move_focus((self.focused + 1) % len);
                (KeyOutcome::Handled, None)
            }
            _ => {
                let focused = self.focused;
                let Some((value, button)) = self.items.get_mut(focused) else {
                    return (KeyOutcome::NotHandled, None);
                };
                let was_checked = button.is_checked();
                let outcome = button.handle_key(key);
                if !was_checked && button.is_checked() {
                    let value = *value;
                    self.clear_others(focused);
                    (outcome, Some(value))
                } else {
                    (outcome, None)
                }
            }
        }
    }

    /// Shows or clears the focus state on the focused item.
    pub fn set_focused(&mut self, focused: bool) {
        let current = self.focused;
        for (i, (_, button)) in self.items.iter_mut().enumerate() {
            button.set_focused(focused && i == current);
        }
    }

    /// Pointer is over `index`, or off the group.
    pub fn hover(&mut self, index: Option<usize>) {
        for (i, (_, button)) in self.items.iter_mut().enumerate() {
            button.set_hovered(index == Some(i));
        }
    }

    /// Pointer is pressed on `index`, or released.
    pub fn press(&mut self, index: Option<usize>) {
        for (i, (_, button)) in self.items.iter_mut().enumerate() {
            button.set_active(index == Some(i));
        }
    }

    fn move_focus(&mut self, index: usize) {
        let had_focus = self
            .items
            .get(self.focused)
            .is_some_and(|(_, button)| button.is_focused());
        self.focused = index;
        if had_focus {
            self.set_focused(true);
        }
    }

    fn clear_others(&mut self, index: usize) {
        for (i, (_, button)) in self.items.iter_mut().enumerate() {
            if i != index {
                button.option_changed(RadioButtonOption::Value(false));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn focusable() -> RadioButtonOptions {
        RadioButtonOptions {
            focus_state_enabled: true,
            ..RadioButtonOptions::default()
        }
    }

    #[test]
    fn test_defaults() {
        let button = RadioButton::new("a", RadioButtonOptions::default());
        assert!(!button.is_checked());
        assert!(button.options().hover_state_enabled);
        assert!(button.options().active_state_enabled);
        assert!(button.ink_ripple().is_none());
        assert_eq!(button.classes(), vec![RADIO_BUTTON_CLASS]);
    }

    #[test]
    fn test_click_checks_and_reports_change_once() {
        let mut button = RadioButton::new("a", RadioButtonOptions::default());
        assert!(button.click());
        assert!(button.is_checked());
        assert!(!button.click());
        assert_eq!(button.classes(), vec![RADIO_BUTTON_CLASS, RADIO_BUTTON_CHECKED_CLASS]);
        assert_eq!(
            button.aria(),
            RadioAria {
                role: "radio",
                checked: true
            }
        );
    }

    #[test]
    fn test_disabled_click_ignored() {
        let mut button = RadioButton::new("a", RadioButtonOptions::default());
        button.option_changed(RadioButtonOption::Disabled(true));
        assert!(!button.click());
        assert!(!button.is_checked());
    }

    #[test]
    fn test_space_clicks_when_focusable() {
        let mut button = RadioButton::new("a", focusable());
        assert_eq!(button.handle_key(Key::Space), KeyOutcome::Handled);
        assert!(button.is_checked());
        assert_eq!(button.handle_key(Key::Enter), KeyOutcome::NotHandled);

        let mut plain = RadioButton::new("b", RadioButtonOptions::default());
        assert_eq!(plain.handle_key(Key::Space), KeyOutcome::NotHandled);
        assert!(!plain.is_checked());
    }

    #[test]
    fn test_ink_ripple_waves_follow_focus_and_active() {
        let mut button = RadioButton::new(
            "a",
            RadioButtonOptions {
                use_ink_ripple: true,
                ..focusable()
            },
        );
        let ripple = button.ink_ripple().unwrap();
        assert_eq!(ripple.config.waves_number, 2);
        assert!((ripple.config.wave_size_coefficient - 3.3).abs() < f32::EPSILON);

        button.set_focused(true);
        assert!(button.ink_ripple().unwrap().is_wave_shown(0));
        button.set_active(true);
        assert!(button.ink_ripple().unwrap().is_wave_shown(1));
        button.set_active(false);
        assert!(!button.ink_ripple().unwrap().is_wave_shown(1));
    }

    #[test]
    fn test_use_ink_ripple_change_rerenders() {
        let mut button = RadioButton::new("a", RadioButtonOptions::default());
        button.option_changed(RadioButtonOption::UseInkRipple(true));
        assert!(button.ink_ripple().is_some());
        button.option_changed(RadioButtonOption::UseInkRipple(false));
        assert!(button.ink_ripple().is_none());
    }

    #[test]
    fn test_device_rules() {
        let device = DeviceDescriptor {
            theme: "android5.dark".to_string(),
            ..DeviceDescriptor::default()
        };
        let opts = RadioButtonOptions::for_device(&device);
        assert!(opts.focus_state_enabled);
        assert!(opts.use_ink_ripple);
    }

    fn selected(group: &RadioGroup<u8>) -> Option<u8> {
        group
            .items()
            .find(|(_, button)| button.is_checked())
            .map(|(value, _)| *value)
    }

    fn group() -> RadioGroup<u8> {
        RadioGroup::new(
            [(1, "one".to_string()), (2, "two".to_string()), (3, "three".to_string())],
            2,
            &focusable(),
        )
    }

    #[test]
    fn test_group_keeps_single_selection() {
        let mut group = group();
        assert_eq!(selected(&group), Some(2));
        assert_eq!(group.click(0), Some(1));
        assert_eq!(selected(&group), Some(1));
        assert_eq!(group.items().filter(|(_, b)| b.is_checked()).count(), 1);
        assert_eq!(group.click(0), None);
        assert_eq!(group.click(9), None);
    }

    #[test]
    fn test_group_keyboard() {
        let mut group = group();
        assert_eq!(group.focused_index(), 1);
        group.handle_key(Key::Right);
        assert_eq!(group.focused_index(), 2);
        group.handle_key(Key::Right);
        assert_eq!(group.focused_index(), 0);
        let (outcome, changed) = group.handle_key(Key::Space);
        assert_eq!(outcome, KeyOutcome::Handled);
        assert_eq!(changed, Some(1));
        assert_eq!(group.items().filter(|(_, b)| b.is_checked()).count(), 1);
    }

    #[test]
    fn test_group_set_selected_mirrors_external_value() {
        let mut group = group();
        group.set_selected(3);
        assert_eq!(selected(&group), Some(3));
        assert_eq!(group.focused_index(), 2);
    }

    #[test]
    fn test_group_apply_options_keeps_selection() {
        let mut group = group();
        let android = RadioButtonOptions {
            use_ink_ripple: true,
            ..focusable()
        };
        group.apply_options(&android);
        assert!(group.items().all(|(_, b)| b.ink_ripple().is_some()));
        assert_eq!(selected(&group), Some(2));

        group.apply_options(&RadioButtonOptions::default());
        assert!(group.items().all(|(_, b)| b.ink_ripple().is_none()));
        group.set_focused(true);
        assert!(group.items().all(|(_, b)| !b.is_focused()));
        assert_eq!(selected(&group), Some(2));
    }

    #[test]
    fn test_group_focus_follows_keyboard_and_pointer_states() {
        let mut group = group();
        group.set_focused(true);
        let focused: Vec<bool> = group.items().map(|(_, b)| b.is_focused()).collect();
        assert_eq!(focused, vec![false, true, false]);

        group.handle_key(Key::Left);
        let focused: Vec<bool> = group.items().map(|(_, b)| b.is_focused()).collect();
        assert_eq!(focused, vec![true, false, false]);

        group.hover(Some(2));
        group.press(Some(2));
        let last = group.items().last().map(|(_, b)| (b.is_hovered(), b.is_active()));
        assert_eq!(last, Some((true, true)));
        group.hover(None);
        group.press(None);
        assert!(group.items().all(|(_, b)| !b.is_hovered() && !b.is_active()));

        group.set_focused(false);
        assert!(group.items().all(|(_, b)| !b.is_focused()));
    }
}
