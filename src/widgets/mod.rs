pub mod button;
pub mod calendar;
pub mod navigator;
pub mod popover;
pub mod radio_button;

pub use button::Button;
pub use calendar::{Calendar, CalendarKeyResult, CalendarOptions};
pub use navigator::{
    ChannelObserver, Navigator, NavigatorBuilder, NavigatorEvent, NavigatorOption,
    NavigatorOptions, NavigatorState,
};
pub use popover::Popover;
pub use radio_button::{RadioButton, RadioGroup};

/// Keys the widgets react to, independent of the terminal backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Tab,
    Escape,
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
}

/// Whether a widget consumed a key or default handling (focus traversal) should continue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    Handled,
    NotHandled,
}

/// Focus-related options every focusable widget carries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FocusOptions {
    pub focus_state_enabled: bool,
    pub tab_index: Option<i32>,
}

/// Receives typed option changes; each widget dispatches on the variant.
pub trait OptionObserver {
    type Change;

    fn option_changed(&mut self, change: Self::Change);
}
