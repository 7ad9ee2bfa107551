use crate::device::OverlayKind;

/// Overlay hosting the navigator's calendar. Content is rendered lazily on
/// the first show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Popover {
    pub kind: OverlayKind,
    visible: bool,
    content_ready: bool,
}

impl Popover {
    pub fn new(kind: OverlayKind) -> Self {
        Popover {
            kind,
            visible: false,
            content_ready: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Shows the overlay. Returns true when its content was rendered for the
    /// first time by this call.
    pub fn show(&mut self) -> bool {
        self.visible = true;
        let first = !self.content_ready;
        self.content_ready = true;
        first
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Flips visibility. Returns the same first-render flag as [`Popover::show`].
    pub fn toggle(&mut self) -> bool {
        if self.visible {
            self.hide();
            false
        } else {
            self.show()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_ready_only_once() {
        let mut popover = Popover::new(OverlayKind::Popover);
        assert!(popover.show());
        popover.hide();
        assert!(!popover.show());
        popover.hide();
        assert!(!popover.toggle());
        assert!(popover.is_visible());
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let mut popover = Popover::new(OverlayKind::FullScreenPopup);
        popover.toggle();
        assert!(popover.is_visible());
        popover.toggle();
        assert!(!popover.is_visible());
    }
}
