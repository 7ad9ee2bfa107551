use super::{FocusOptions, OptionObserver};

/// A push button. Activation is reported back to the owner, which decides
/// what a click means.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Button {
    pub class: &'static str,
    pub text: String,
    pub icon: Option<&'static str>,
    pub aria_label: Option<&'static str>,
    pub disabled: bool,
    pub focus: FocusOptions,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ButtonOption {
    Text(String),
    Disabled(bool),
    FocusStateEnabled(bool),
    TabIndex(Option<i32>),
}

impl Button {
    pub fn new(class: &'static str, focus: FocusOptions) -> Self {
        Button {
            class,
            text: String::new(),
            icon: None,
            aria_label: None,
            disabled: false,
            focus,
        }
    }

    pub fn with_icon(mut self, icon: &'static str) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn with_aria_label(mut self, label: &'static str) -> Self {
        self.aria_label = Some(label);
        self
    }

    /// Returns true when the click should be acted upon.
    pub fn click(&self) -> bool {
        !self.disabled
    }
}

impl OptionObserver for Button {
    type Change = ButtonOption;

    fn option_changed(&mut self, change: ButtonOption) {
        match change {
            ButtonOption::Text(text) => self.text = text,
            ButtonOption::Disabled(disabled) => self.disabled = disabled,
            ButtonOption::FocusStateEnabled(enabled) => self.focus.focus_state_enabled = enabled,
            ButtonOption::TabIndex(index) => self.focus.tab_index = index,
        }
    }
}
