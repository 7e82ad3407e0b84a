//! Input events consumed by a select widget
//!
//! Hosts translate their platform events into [`SelectEvent`]s. Key presses
//! carry the raw platform key code.

use crate::store::OptionId;

/// Key codes the select widget reacts to
pub mod key_codes {
    pub const ENTER: u32 = 13;
    pub const ESCAPE: u32 = 27;
    pub const SPACE: u32 = 32;
    pub const UP: u32 = 38;
    pub const DOWN: u32 = 40;
}

/// Navigation keys understood by the widget
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKey {
    /// Enter or Space
    Activate,
    Up,
    Down,
    Escape,
}

impl NavKey {
    /// Map a raw key code; unknown codes yield `None`
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            key_codes::ENTER | key_codes::SPACE => Some(NavKey::Activate),
            key_codes::UP => Some(NavKey::Up),
            key_codes::DOWN => Some(NavKey::Down),
            key_codes::ESCAPE => Some(NavKey::Escape),
            _ => None,
        }
    }
}

/// An input event delivered to the widget
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectEvent {
    /// Click on the control itself (toggles the dropdown)
    ControlClick,
    /// Click on a rendered option, resolved to its id by the presentation layer
    OptionClick(OptionId),
    /// Click anywhere outside the widget
    OutsideClick,
    /// Key press with its key code
    KeyDown(u32),
    /// New contents of the search box
    SearchInput(String),
}

/// Result of handling an event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventOutcome {
    /// The widget is disabled or destroyed and did not look at the event
    Ignored,
    /// The event was handled but nothing observable changed
    Unchanged,
    /// State changed; the presentation layer should re-render
    Changed,
}

impl EventOutcome {
    pub fn is_changed(self) -> bool {
        self == EventOutcome::Changed
    }

    pub(crate) fn from_changed(changed: bool) -> Self {
        if changed {
            EventOutcome::Changed
        } else {
            EventOutcome::Unchanged
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_key_from_code() {
        assert_eq!(NavKey::from_code(13), Some(NavKey::Activate));
        assert_eq!(NavKey::from_code(32), Some(NavKey::Activate));
        assert_eq!(NavKey::from_code(38), Some(NavKey::Up));
        assert_eq!(NavKey::from_code(40), Some(NavKey::Down));
        assert_eq!(NavKey::from_code(27), Some(NavKey::Escape));
        assert_eq!(NavKey::from_code(9), None);
    }

    #[test]
    fn test_outcome_is_changed() {
        assert!(EventOutcome::from_changed(true).is_changed());
        assert!(!EventOutcome::from_changed(false).is_changed());
        assert!(!EventOutcome::Ignored.is_changed());
    }
}
