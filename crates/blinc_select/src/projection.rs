//! Render snapshot handed to the presentation layer

use serde::Serialize;

use crate::selection::SelectionDisplay;
use crate::store::OptionId;

/// A visible option with its render flags
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProjectedOption {
    pub id: OptionId,
    pub text: String,
    pub value: String,
    pub selected: bool,
    pub disabled: bool,
    pub focused: bool,
}

impl ProjectedOption {
    /// CSS-style classes for the option item
    pub fn class_list(&self) -> Vec<&'static str> {
        let mut classes = vec!["option"];
        if self.selected {
            classes.push("selected");
        }
        if self.disabled {
            classes.push("disabled");
        }
        if self.focused {
            classes.push("focus");
        }
        classes
    }
}

/// Read-only snapshot of a select widget
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Projection {
    /// Whether the dropdown is open
    pub open: bool,
    /// Whether the widget ignores input
    pub disabled: bool,
    pub multiple: bool,
    pub searchable: bool,
    /// Current search query
    pub query: String,
    /// Class attribute carried over from the native control
    pub class: Option<String>,
    /// Placeholder or selected label(s)
    pub display: SelectionDisplay,
    /// Visible options in display order
    pub options: Vec<ProjectedOption>,
}

impl Projection {
    /// Container classes, in the order the markup layer emits them
    pub fn class_list(&self) -> Vec<String> {
        let mut classes = vec!["nice-select".to_string()];
        if let Some(class) = self.class.as_deref().filter(|c| !c.is_empty()) {
            classes.push(class.to_string());
        }
        if self.open {
            classes.push("open".to_string());
        }
        if self.disabled {
            classes.push("disabled".to_string());
        }
        if self.multiple {
            classes.push("has-multiple".to_string());
        }
        classes
    }

    /// The focused option, if visible
    pub fn focused(&self) -> Option<&ProjectedOption> {
        self.options.iter().find(|option| option.focused)
    }

    /// Labels of the visible options
    pub fn visible_labels(&self) -> Vec<&str> {
        self.options.iter().map(|option| option.text.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{OptionStore, SelectOption};

    fn projection(store: &OptionStore) -> Projection {
        let options = store
            .iter()
            .map(|(id, option)| ProjectedOption {
                id,
                text: option.text.clone(),
                value: option.value.clone(),
                selected: option.selected,
                disabled: option.disabled,
                focused: false,
            })
            .collect();

        Projection {
            open: false,
            disabled: false,
            multiple: false,
            searchable: false,
            query: String::new(),
            class: None,
            display: SelectionDisplay::Placeholder("Select an option".into()),
            options,
        }
    }

    #[test]
    fn test_option_class_list() {
        let store = OptionStore::from_options([
            SelectOption::new("A", "v1").selected(),
            SelectOption::new("B", "v2").disabled(),
        ]);
        let mut projection = projection(&store);
        projection.options[1].focused = true;

        assert_eq!(projection.options[0].class_list(), vec!["option", "selected"]);
        assert_eq!(
            projection.options[1].class_list(),
            vec!["option", "disabled", "focus"]
        );
        assert_eq!(projection.focused().map(|o| o.text.as_str()), Some("B"));
    }

    #[test]
    fn test_container_class_list() {
        let store = OptionStore::new();
        let mut projection = projection(&store);
        assert_eq!(projection.class_list(), vec!["nice-select"]);

        projection.class = Some("wide".into());
        projection.open = true;
        projection.disabled = true;
        projection.multiple = true;
        assert_eq!(
            projection.class_list(),
            vec!["nice-select", "wide", "open", "disabled", "has-multiple"]
        );

        projection.class = Some(String::new());
        projection.open = false;
        projection.disabled = false;
        projection.multiple = false;
        assert_eq!(projection.class_list(), vec!["nice-select"]);
    }

    #[test]
    fn test_visible_labels() {
        let store = OptionStore::from_options([
            SelectOption::new("Apple", "apple"),
            SelectOption::new("Cherry", "cherry"),
        ]);
        assert_eq!(projection(&store).visible_labels(), vec!["Apple", "Cherry"]);
        assert!(projection(&store).focused().is_none());
    }
}
