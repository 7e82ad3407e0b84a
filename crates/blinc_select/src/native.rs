//! Native control boundary
//!
//! The widget never reads or writes the native control's internal
//! representation directly. It talks to it through two explicit channels:
//!
//! - **extraction**: [`NativeControl::options`] and [`NativeControl::attributes`]
//!   are read at construction and on every reload
//! - **change notification**: every selection mutation produces a
//!   [`ChangeEvent`] that the host applies with [`NativeControl::apply_change`]
//!
//! Outside-click listening is a capability granted by the host through
//! [`OutsideClickHost`] rather than ambient global state.

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

use crate::error::Result;

/// A choice item as read from the native control
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeOption {
    pub text: String,
    pub value: String,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub disabled: bool,
}

impl NativeOption {
    /// Create an enabled, unselected item
    pub fn new(text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: value.into(),
            selected: false,
            disabled: false,
        }
    }

    /// Mark the item as selected
    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }

    /// Mark the item as disabled
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Attributes read from the native control at construction
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeAttributes {
    /// `placeholder` attribute
    #[serde(default)]
    pub placeholder: Option<String>,
    /// `multiple` attribute
    #[serde(default)]
    pub multiple: bool,
    /// `disabled` attribute
    #[serde(default)]
    pub disabled: bool,
    /// `class` attribute, carried over to the widget container
    #[serde(default)]
    pub class: Option<String>,
}

/// Notification sent outward whenever the selection changes
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ChangeEvent {
    /// Selected values, in selection order
    pub values: Vec<String>,
    /// Whether the widget is in multiple mode
    pub multiple: bool,
}

impl ChangeEvent {
    /// The single-mode value, if any
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }
}

/// The native control a select widget mirrors
pub trait NativeControl {
    /// Extract the current choice items
    fn options(&self) -> Vec<NativeOption>;

    /// Read the control's attributes
    fn attributes(&self) -> NativeAttributes;

    /// Apply a change produced by the widget
    fn apply_change(&mut self, change: &ChangeEvent);
}

/// In-memory native control
///
/// Used by hosts without a real document and by tests. Applying a change in
/// multiple mode marks every selected value and unmarks the rest, so external
/// code observing the control sees exactly what the user picked.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeSelect {
    #[serde(flatten)]
    pub attributes: NativeAttributes,
    #[serde(default, rename = "option")]
    pub items: Vec<NativeOption>,
    /// Number of change events applied so far
    #[serde(skip)]
    change_count: u32,
}

impl NativeSelect {
    /// Create a native control from items
    pub fn new(items: impl IntoIterator<Item = NativeOption>) -> Self {
        Self {
            attributes: NativeAttributes::default(),
            items: items.into_iter().collect(),
            change_count: 0,
        }
    }

    /// Parse a control description from TOML
    ///
    /// ```toml
    /// placeholder = "Pick one"
    /// multiple = false
    ///
    /// [[option]]
    /// text = "Apple"
    /// value = "apple"
    /// selected = true
    /// ```
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Set the placeholder attribute
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.attributes.placeholder = Some(placeholder.into());
        self
    }

    /// Set the multiple attribute
    pub fn multiple(mut self, multiple: bool) -> Self {
        self.attributes.multiple = multiple;
        self
    }

    /// Set the disabled attribute
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.attributes.disabled = disabled;
        self
    }

    /// Set the class attribute
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.attributes.class = Some(class.into());
        self
    }

    /// Append an item (an out-of-band change; widgets see it after `reload`)
    pub fn push(&mut self, item: NativeOption) {
        self.items.push(item);
    }

    /// Value of the first selected item
    pub fn value(&self) -> Option<&str> {
        self.items
            .iter()
            .find(|item| item.selected)
            .map(|item| item.value.as_str())
    }

    /// Values of all selected items in document order
    pub fn values(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter(|item| item.selected)
            .map(|item| item.value.as_str())
            .collect()
    }

    /// Number of change events applied
    pub fn change_count(&self) -> u32 {
        self.change_count
    }
}

impl NativeControl for NativeSelect {
    fn options(&self) -> Vec<NativeOption> {
        self.items.clone()
    }

    fn attributes(&self) -> NativeAttributes {
        self.attributes.clone()
    }

    fn apply_change(&mut self, change: &ChangeEvent) {
        if change.multiple {
            for item in &mut self.items {
                item.selected = change.values.contains(&item.value);
            }
        } else {
            // Setting the value of a single select picks the first matching item
            let mut matched = false;
            for item in &mut self.items {
                let hit = !matched && change.value() == Some(item.value.as_str());
                item.selected = hit;
                matched |= hit;
            }
        }
        self.change_count += 1;
        tracing::debug!(
            "Native select applied change: {:?} (multiple: {})",
            change.values,
            change.multiple
        );
    }
}

new_key_type! {
    /// Handle for an outside-click subscription
    pub struct ListenerId;
}

/// Host capability for listening to clicks outside a widget
pub trait OutsideClickHost {
    /// Start delivering outside clicks to a widget
    fn subscribe(&mut self) -> ListenerId;

    /// Stop delivering outside clicks
    fn unsubscribe(&mut self, id: ListenerId);
}

/// In-memory outside-click host
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    listeners: SlotMap<ListenerId, ()>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a subscription is still registered
    pub fn is_subscribed(&self, id: ListenerId) -> bool {
        self.listeners.contains_key(id)
    }

    /// Number of live subscriptions
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Subscribers that should receive an outside click
    pub fn listeners(&self) -> impl Iterator<Item = ListenerId> + '_ {
        self.listeners.keys()
    }
}

impl OutsideClickHost for ListenerRegistry {
    fn subscribe(&mut self) -> ListenerId {
        self.listeners.insert(())
    }

    fn unsubscribe(&mut self, id: ListenerId) {
        self.listeners.remove(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruits() -> NativeSelect {
        NativeSelect::new([
            NativeOption::new("Apple", "apple"),
            NativeOption::new("Banana", "banana").selected(),
            NativeOption::new("Cherry", "cherry"),
        ])
    }

    #[test]
    fn test_single_change_sets_value() {
        let mut native = fruits();
        assert_eq!(native.value(), Some("banana"));

        native.apply_change(&ChangeEvent {
            values: vec!["cherry".into()],
            multiple: false,
        });

        assert_eq!(native.value(), Some("cherry"));
        assert_eq!(native.values(), vec!["cherry"]);
        assert_eq!(native.change_count(), 1);
    }

    #[test]
    fn test_single_empty_change_clears_value() {
        let mut native = fruits();
        native.apply_change(&ChangeEvent::default());
        assert_eq!(native.value(), None);
    }

    #[test]
    fn test_multiple_change_marks_every_selected_item() {
        let mut native = fruits().multiple(true);
        native.apply_change(&ChangeEvent {
            values: vec!["cherry".into(), "apple".into()],
            multiple: true,
        });

        assert_eq!(native.values(), vec!["apple", "cherry"]);
    }

    #[test]
    fn test_from_toml() {
        let native = NativeSelect::from_toml(
            r#"
            placeholder = "Pick a fruit"
            multiple = true

            [[option]]
            text = "Apple"
            value = "apple"

            [[option]]
            text = "Banana"
            value = "banana"
            disabled = true
            "#,
        )
        .unwrap();

        assert_eq!(native.attributes.placeholder.as_deref(), Some("Pick a fruit"));
        assert!(native.attributes.multiple);
        assert!(!native.attributes.disabled);
        assert_eq!(native.items.len(), 2);
        assert!(native.items[1].disabled);
    }

    #[test]
    fn test_from_toml_rejects_missing_value() {
        let result = NativeSelect::from_toml(
            r#"
            [[option]]
            text = "Nothing"
            "#,
        );
        assert!(matches!(result, Err(crate::error::SelectError::Config(_))));
    }

    #[test]
    fn test_listener_registry() {
        let mut registry = ListenerRegistry::new();
        let id = registry.subscribe();
        assert!(registry.is_subscribed(id));
        assert_eq!(registry.len(), 1);

        registry.unsubscribe(id);
        assert!(!registry.is_subscribed(id));
        assert!(registry.is_empty());
    }
}
