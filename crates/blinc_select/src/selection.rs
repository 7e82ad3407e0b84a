//! Selection model
//!
//! Holds the ids of the currently selected options in selection order.
//! Single mode keeps at most one id; multiple mode only ever adds through
//! user interaction and is emptied by [`SelectionModel::clear`].

use indexmap::IndexSet;
use serde::Serialize;

use crate::store::{OptionId, OptionStore};

/// What the control shows for the current selection
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum SelectionDisplay {
    /// Nothing selected
    Placeholder(String),
    /// Label of the single selected option
    Single(String),
    /// Labels of all selected options, in selection order
    Multiple(Vec<String>),
}

impl SelectionDisplay {
    /// Whether the placeholder is showing
    pub fn is_placeholder(&self) -> bool {
        matches!(self, SelectionDisplay::Placeholder(_))
    }
}

/// The set of selected options
#[derive(Clone, Debug, Default)]
pub struct SelectionModel {
    multiple: bool,
    selected: IndexSet<OptionId>,
}

impl SelectionModel {
    /// Create an empty selection
    pub fn new(multiple: bool) -> Self {
        Self {
            multiple,
            selected: IndexSet::new(),
        }
    }

    /// Seed the selection from the store's initial flags
    ///
    /// Initial flags bypass the disabled check. In single mode the last
    /// flagged option wins, as it does for a native single select.
    pub fn from_store(store: &OptionStore, multiple: bool) -> Self {
        let mut model = Self::new(multiple);
        for id in store.initially_selected() {
            if !multiple {
                model.selected.clear();
            }
            model.selected.insert(id);
        }
        model
    }

    /// Whether multiple options may be selected
    pub fn is_multiple(&self) -> bool {
        self.multiple
    }

    /// Select an option on behalf of the user
    ///
    /// Unknown ids and disabled options are ignored. Returns `true` when the
    /// option was accepted, even if it was already the selection.
    pub fn select(&mut self, store: &OptionStore, id: OptionId) -> bool {
        match store.get(id) {
            Some(option) if !option.disabled => {}
            _ => return false,
        }

        if self.multiple {
            self.selected.insert(id);
        } else if self.selected.len() != 1 || !self.selected.contains(&id) {
            self.selected.clear();
            self.selected.insert(id);
        }
        true
    }

    /// Remove every selected option, disabled ones included
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, id: OptionId) -> bool {
        self.selected.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Selected ids in selection order
    pub fn ids(&self) -> impl Iterator<Item = OptionId> + '_ {
        self.selected.iter().copied()
    }

    /// Selected values in selection order
    pub fn values(&self, store: &OptionStore) -> Vec<String> {
        self.ids()
            .filter_map(|id| store.get(id))
            .map(|option| option.value.clone())
            .collect()
    }

    /// Display text for the control
    pub fn projection(&self, store: &OptionStore, placeholder: &str) -> SelectionDisplay {
        let mut labels = self
            .selected
            .iter()
            .filter_map(|&id| store.get(id))
            .map(|option| option.text.clone());

        if self.multiple {
            let labels: Vec<String> = labels.collect();
            if labels.is_empty() {
                SelectionDisplay::Placeholder(placeholder.to_string())
            } else {
                SelectionDisplay::Multiple(labels)
            }
        } else {
            match labels.next() {
                Some(label) => SelectionDisplay::Single(label),
                None => SelectionDisplay::Placeholder(placeholder.to_string()),
            }
        }
    }
}
