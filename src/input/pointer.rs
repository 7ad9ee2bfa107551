use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// Backend-independent pointer event in terminal cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub column: u16,
    pub row: u16,
}

impl PointerEvent {
    /// Maps a raw mouse event; only the primary button takes part.
    pub fn from_mouse(event: &MouseEvent) -> Option<Self> {
        let kind = match event.kind {
            MouseEventKind::Down(MouseButton::Left) => PointerKind::Down,
            MouseEventKind::Up(MouseButton::Left) => PointerKind::Up,
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => PointerKind::Move,
            _ => return None,
        };
        Some(PointerEvent {
            kind,
            column: event.column,
            row: event.row,
        })
    }

    /// Terminal focus loss aborts any press in flight.
    pub fn cancel() -> Self {
        PointerEvent {
            kind: PointerKind::Cancel,
            column: 0,
            row: 0,
        }
    }
}

/// Turns down/up pairs into clicks: a click fires only when the press and the
/// release land on the same target.
#[derive(Clone, Debug)]
pub struct ClickTracker<T> {
    pressed: Option<T>,
}

impl<T> Default for ClickTracker<T> {
    fn default() -> Self {
        ClickTracker { pressed: None }
    }
}

impl<T: PartialEq> ClickTracker<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one event with the target under the pointer. Returns the
    /// clicked target on a matching release.
    pub fn on_event(&mut self, kind: PointerKind, target: Option<T>) -> Option<T> {
        match kind {
            PointerKind::Down => {
                self.pressed = target;
                None
            }
            PointerKind::Move => None,
            PointerKind::Up => {
                let pressed = self.pressed.take()?;
                match target {
                    Some(target) if target == pressed => Some(target),
                    _ => None,
                }
            }
            PointerKind::Cancel => {
                self.pressed = None;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column: 4,
            row: 2,
            modifiers: KeyModifiers::empty(),
        }
    }

    #[test]
    fn test_mouse_events_normalized() {
        let down = PointerEvent::from_mouse(&mouse(MouseEventKind::Down(MouseButton::Left))).unwrap();
        assert_eq!(down.kind, PointerKind::Down);
        assert_eq!((down.column, down.row), (4, 2));
        let drag = PointerEvent::from_mouse(&mouse(MouseEventKind::Drag(MouseButton::Left))).unwrap();
        assert_eq!(drag.kind, PointerKind::Move);
        let up = PointerEvent::from_mouse(&mouse(MouseEventKind::Up(MouseButton::Left))).unwrap();
        assert_eq!(up.kind, PointerKind::Up);
    }

    #[test]
    fn test_secondary_buttons_and_scroll_ignored() {
        assert!(PointerEvent::from_mouse(&mouse(MouseEventKind::Down(MouseButton::Right))).is_none());
        assert!(PointerEvent::from_mouse(&mouse(MouseEventKind::ScrollUp)).is_none());
    }

    #[test]
    fn test_click_requires_same_target() {
        let mut tracker = ClickTracker::new();
        tracker.on_event(PointerKind::Down, Some(1));
        tracker.on_event(PointerKind::Move, Some(2));
        assert_eq!(tracker.on_event(PointerKind::Up, Some(1)), Some(1));

        tracker.on_event(PointerKind::Down, Some(1));
        assert_eq!(tracker.on_event(PointerKind::Up, Some(2)), None);
        // the mismatched release consumed the press
        assert_eq!(tracker.on_event(PointerKind::Up, Some(1)), None);
    }

    #[test]
    fn test_up_without_down_and_cancel() {
        let mut tracker: ClickTracker<u8> = ClickTracker::new();
        assert_eq!(tracker.on_event(PointerKind::Up, Some(1)), None);
        tracker.on_event(PointerKind::Down, Some(1));
        tracker.on_event(PointerKind::Cancel, None);
        assert_eq!(tracker.on_event(PointerKind::Up, Some(1)), None);
    }
}
