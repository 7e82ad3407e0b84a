//! Option store - the canonical, ordered list of select options
//!
//! Options are addressed by [`OptionId`] handles instead of references to
//! rendered nodes. The presentation layer keeps its own mapping from nodes to
//! ids (usually through the option value, see [`OptionStore::find_by_value`]).
//!
//! Order is significant: it defines both display order and keyboard
//! navigation order. The store is immutable between reloads; a reload replaces
//! its contents, so ids handed out before it no longer resolve.

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

use crate::native::NativeOption;

new_key_type! {
    /// Stable handle to an option within one [`OptionStore`]
    pub struct OptionId;
}

/// Raw option data supplied without any selection state
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionData {
    /// Display label
    pub text: String,
    /// Underlying value
    pub value: String,
}

impl OptionData {
    /// Create option data from a label and value
    pub fn new(text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: value.into(),
        }
    }
}

/// An option in the select list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    /// Display label (also the text searched by the filter)
    pub text: String,
    /// Underlying value reported in change events
    pub value: String,
    /// Whether the option was selected when the store was loaded
    pub selected: bool,
    /// Whether the option refuses user selection
    pub disabled: bool,
}

impl SelectOption {
    /// Create an enabled, unselected option
    pub fn new(text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: value.into(),
            selected: false,
            disabled: false,
        }
    }

    /// Mark this option as initially selected
    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }

    /// Mark this option as disabled
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

impl From<OptionData> for SelectOption {
    fn from(data: OptionData) -> Self {
        Self::new(data.text, data.value)
    }
}

impl From<NativeOption> for SelectOption {
    fn from(item: NativeOption) -> Self {
        Self {
            text: item.text,
            value: item.value,
            selected: item.selected,
            disabled: item.disabled,
        }
    }
}

/// Ordered collection of options owned by a single widget
#[derive(Debug, Default)]
pub struct OptionStore {
    options: SlotMap<OptionId, SelectOption>,
    order: Vec<OptionId>,
}

impl OptionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from raw `{text, value}` data (nothing selected or disabled)
    pub fn from_data(data: impl IntoIterator<Item = OptionData>) -> Self {
        Self::from_options(data.into_iter().map(SelectOption::from))
    }

    /// Build a store from items extracted from a native control
    pub fn from_native(items: impl IntoIterator<Item = NativeOption>) -> Self {
        Self::from_options(items.into_iter().map(SelectOption::from))
    }

    /// Build a store from fully specified options
    pub fn from_options(options: impl IntoIterator<Item = SelectOption>) -> Self {
        let mut store = Self::new();
        for option in options {
            store.push(option);
        }
        store
    }

    /// Replace every option, invalidating all previously issued ids
    ///
    /// The slot map is cleared rather than recreated so that old keys carry a
    /// stale version and can never alias the new options.
    pub fn replace(&mut self, options: impl IntoIterator<Item = SelectOption>) {
        self.options.clear();
        self.order.clear();
        for option in options {
            self.push(option);
        }
    }

    fn push(&mut self, option: SelectOption) -> OptionId {
        let id = self.options.insert(option);
        self.order.push(id);
        id
    }

    /// Number of options
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the store holds no options
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Option ids in display order
    pub fn ids(&self) -> &[OptionId] {
        &self.order
    }

    /// Iterate options with their ids in display order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (OptionId, &SelectOption)> + '_ {
        self.order.iter().map(move |&id| (id, &self.options[id]))
    }

    /// Look up an option; stale or foreign ids resolve to `None`
    pub fn get(&self, id: OptionId) -> Option<&SelectOption> {
        self.options.get(id)
    }

    /// Whether the id belongs to this store
    pub fn contains(&self, id: OptionId) -> bool {
        self.options.contains_key(id)
    }

    /// Position of an option in display order
    pub fn position(&self, id: OptionId) -> Option<usize> {
        if !self.contains(id) {
            return None;
        }
        self.order.iter().position(|&candidate| candidate == id)
    }

    /// Id at a display position
    pub fn id_at(&self, index: usize) -> Option<OptionId> {
        self.order.get(index).copied()
    }

    /// First option carrying `value`
    pub fn find_by_value(&self, value: &str) -> Option<OptionId> {
        self.iter()
            .find(|(_, option)| option.value == value)
            .map(|(id, _)| id)
    }

    /// Ids whose initial `selected` flag is set, in display order
    pub fn initially_selected(&self) -> Vec<OptionId> {
        self.iter()
            .filter(|(_, option)| option.selected)
            .map(|(id, _)| id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OptionStore {
        OptionStore::from_options([
            SelectOption::new("A", "v1"),
            SelectOption::new("B", "v2").disabled(),
            SelectOption::new("C", "v3").selected(),
        ])
    }

    #[test]
    fn test_from_data_has_no_flags() {
        let store = OptionStore::from_data([OptionData::new("A", "a"), OptionData::new("B", "b")]);
        assert_eq!(store.len(), 2);
        assert!(store.iter().all(|(_, o)| !o.selected && !o.disabled));
        assert!(store.initially_selected().is_empty());
    }

    #[test]
    fn test_from_native_keeps_flags() {
        let store = OptionStore::from_native([
            NativeOption::new("A", "a"),
            NativeOption::new("B", "b").selected().disabled(),
        ]);
        let b = store.id_at(1).unwrap();
        let option = store.get(b).unwrap();
        assert!(option.selected);
        assert!(option.disabled);
        assert_eq!(store.initially_selected(), vec![b]);
    }

    #[test]
    fn test_order_and_positions() {
        let store = sample();
        let labels: Vec<&str> = store.iter().map(|(_, o)| o.text.as_str()).collect();
        assert_eq!(labels, ["A", "B", "C"]);

        let c = store.find_by_value("v3").unwrap();
        assert_eq!(store.position(c), Some(2));
        assert_eq!(store.find_by_value("missing"), None);
    }

    #[test]
    fn test_ids_are_stale_after_replace() {
        let mut store = sample();
        let old_first = store.id_at(0).unwrap();

        store.replace([SelectOption::new("X", "x"), SelectOption::new("Y", "y")]);

        assert_eq!(store.len(), 2);
        assert!(store.get(old_first).is_none());
        assert_eq!(store.position(old_first), None);
        assert_eq!(store.get(store.id_at(0).unwrap()).unwrap().text, "X");
    }

    #[test]
    fn test_empty_store() {
        let store = OptionStore::new();
        assert!(store.is_empty());
        assert_eq!(store.id_at(0), None);
        assert!(store.initially_selected().is_empty());
    }
}
