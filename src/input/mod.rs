pub mod pointer;

use crate::widgets::Key;
use crossterm::event::KeyCode;

pub use pointer::{ClickTracker, PointerEvent, PointerKind};

/// Maps a terminal key onto the widget key set.
pub fn widget_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Tab | KeyCode::BackTab => Some(Key::Tab),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::PageUp => Some(Key::PageUp),
        KeyCode::PageDown => Some(Key::PageDown),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_key_mapping() {
        assert_eq!(widget_key(KeyCode::Char(' ')), Some(Key::Space));
        assert_eq!(widget_key(KeyCode::BackTab), Some(Key::Tab));
        assert_eq!(widget_key(KeyCode::PageDown), Some(Key::PageDown));
        assert_eq!(widget_key(KeyCode::Char('x')), None);
    }
}
