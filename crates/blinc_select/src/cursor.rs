//! Keyboard navigation cursor
//!
//! Tracks the focused option independently of the selection. Navigation is a
//! linear scan in store order that skips disabled and filtered-out options
//! and never wraps around.

use crate::filter::FilterEngine;
use crate::store::{OptionId, OptionStore};

/// Navigation direction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// The keyboard focus marker
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavigationCursor {
    focused: Option<OptionId>,
}

impl NavigationCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// The focused option, if any
    pub fn focused(&self) -> Option<OptionId> {
        self.focused
    }

    /// Whether `id` holds the focus
    pub fn is_focused(&self, id: OptionId) -> bool {
        self.focused == Some(id)
    }

    /// Put the focus on a specific option (or nowhere)
    pub fn seed(&mut self, id: Option<OptionId>) {
        self.focused = id;
    }

    pub fn clear(&mut self) {
        self.focused = None;
    }

    /// Move the focus to the next qualifying option in `direction`
    ///
    /// Without a focused option the scan starts at the list boundary. A stale
    /// focus counts as no focus. Returns `true` if the focus moved.
    pub fn advance(
        &mut self,
        store: &OptionStore,
        filter: &FilterEngine,
        direction: Direction,
    ) -> bool {
        let ids = store.ids();
        let start = self.focused.and_then(|id| store.position(id));

        let candidates: Box<dyn Iterator<Item = &OptionId> + '_> = match (direction, start) {
            (Direction::Next, Some(pos)) => Box::new(ids[pos + 1..].iter()),
            (Direction::Next, None) => Box::new(ids.iter()),
            (Direction::Previous, Some(pos)) => Box::new(ids[..pos].iter().rev()),
            (Direction::Previous, None) => Box::new(ids.iter().rev()),
        };

        let target = candidates
            .copied()
            .find(|&id| Self::qualifies(store, filter, id));

        tracing::trace!(
            "Select cursor {:?} from {:?} -> {:?}",
            direction,
            start,
            target.and_then(|id| store.position(id))
        );

        match target {
            Some(id) => {
                self.focused = Some(id);
                true
            }
            None => false,
        }
    }

    /// Focus the first visible, enabled option (or nothing)
    pub fn reset_to_first(&mut self, store: &OptionStore, filter: &FilterEngine) {
        self.focused = None;
        self.advance(store, filter, Direction::Next);
    }

    /// Whether `id` can hold the focus: enabled and visible
    pub(crate) fn qualifies(store: &OptionStore, filter: &FilterEngine, id: OptionId) -> bool {
        store
            .get(id)
            .is_some_and(|option| !option.disabled && filter.is_visible(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SelectOption;

    fn abc() -> OptionStore {
        OptionStore::from_options([
            SelectOption::new("A", "v1"),
            SelectOption::new("B", "v2").disabled(),
            SelectOption::new("C", "v3"),
        ])
    }

    #[test]
    fn test_next_skips_disabled() {
        let store = abc();
        let filter = FilterEngine::new();
        let mut cursor = NavigationCursor::new();

        assert!(cursor.advance(&store, &filter, Direction::Next));
        assert_eq!(cursor.focused(), store.id_at(0));

        assert!(cursor.advance(&store, &filter, Direction::Next));
        assert_eq!(cursor.focused(), store.id_at(2));
    }

    #[test]
    fn test_no_wraparound() {
        let store = abc();
        let filter = FilterEngine::new();
        let mut cursor = NavigationCursor::new();

        cursor.seed(store.id_at(2));
        assert!(!cursor.advance(&store, &filter, Direction::Next));
        assert_eq!(cursor.focused(), store.id_at(2));

        cursor.seed(store.id_at(0));
        assert!(!cursor.advance(&store, &filter, Direction::Previous));
        assert_eq!(cursor.focused(), store.id_at(0));
    }

    #[test]
    fn test_previous_from_nothing_starts_at_end() {
        let store = abc();
        let filter = FilterEngine::new();
        let mut cursor = NavigationCursor::new();

        cursor.advance(&store, &filter, Direction::Previous);
        assert_eq!(cursor.focused(), store.id_at(2));

        cursor.advance(&store, &filter, Direction::Previous);
        assert_eq!(cursor.focused(), store.id_at(0));
    }

    #[test]
    fn test_skips_hidden_options() {
        let store = abc();
        let mut filter = FilterEngine::new();
        filter.set_query(&store, "c", true);

        let mut cursor = NavigationCursor::new();
        cursor.reset_to_first(&store, &filter);
        assert_eq!(cursor.focused(), store.id_at(2));
    }

    #[test]
    fn test_only_disabled_match_leaves_cursor_unset() {
        let store = abc();
        let mut filter = FilterEngine::new();
        filter.set_query(&store, "b", true);

        let mut cursor = NavigationCursor::new();
        cursor.reset_to_first(&store, &filter);
        assert_eq!(cursor.focused(), None);

        assert!(!cursor.advance(&store, &filter, Direction::Next));
        assert_eq!(cursor.focused(), None);
    }

    #[test]
    fn test_stale_focus_scans_from_boundary() {
        let mut store = abc();
        let filter = FilterEngine::new();
        let mut cursor = NavigationCursor::new();
        cursor.seed(store.id_at(2));

        store.replace([SelectOption::new("X", "x"), SelectOption::new("Y", "y")]);

        assert!(cursor.advance(&store, &filter, Direction::Next));
        assert_eq!(cursor.focused(), store.id_at(0));
    }

    #[test]
    fn test_empty_store() {
        let store = OptionStore::new();
        let filter = FilterEngine::new();
        let mut cursor = NavigationCursor::new();

        assert!(!cursor.advance(&store, &filter, Direction::Next));
        assert!(!cursor.advance(&store, &filter, Direction::Previous));
        assert_eq!(cursor.focused(), None);
    }
}
