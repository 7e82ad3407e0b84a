//! Select widget configuration
//!
//! Construction options recognised by [`SelectWidget`](crate::SelectWidget).
//! Everything else (placeholder, multiple, disabled) is read from the native
//! control's attributes; `placeholder` here is only a fallback for controls
//! that carry none.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SelectError};
use crate::store::OptionData;

/// Placeholder shown when nothing is selected and no other placeholder is set
pub const DEFAULT_PLACEHOLDER: &str = "Select an option";

/// Construction options for a select widget
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectConfig {
    /// Option list overriding extraction from the native control
    #[serde(default)]
    pub data: Option<Vec<OptionData>>,
    /// Show a search box that filters the option list
    #[serde(default)]
    pub searchable: bool,
    /// Placeholder used when the native control has none
    #[serde(default)]
    pub placeholder: Option<String>,
}

impl SelectConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML
    pub fn from_toml(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Use a fixed option list instead of the native control's items
    pub fn data(mut self, data: impl IntoIterator<Item = OptionData>) -> Self {
        self.data = Some(data.into_iter().collect());
        self
    }

    /// Enable the search box
    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    /// Set the fallback placeholder
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Check that a data override can be mapped back from rendered values
    ///
    /// The presentation layer resolves clicks through `data-value`, so two
    /// entries sharing a value would be indistinguishable.
    pub fn validate(&self) -> Result<()> {
        let Some(data) = &self.data else {
            return Ok(());
        };
        for (index, item) in data.iter().enumerate() {
            if data[..index].iter().any(|earlier| earlier.value == item.value) {
                return Err(SelectError::Invalid(format!(
                    "duplicate option value '{}' in data",
                    item.value
                )));
            }
        }
        Ok(())
    }

    /// Resolve the placeholder: native attribute, then config, then default
    pub(crate) fn resolve_placeholder(&self, native: Option<&str>) -> String {
        native
            .filter(|p| !p.is_empty())
            .or(self.placeholder.as_deref())
            .unwrap_or(DEFAULT_PLACEHOLDER)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SelectConfig::default();
        assert!(config.data.is_none());
        assert!(!config.searchable);
        assert_eq!(config.resolve_placeholder(None), DEFAULT_PLACEHOLDER);
    }

    #[test]
    fn test_placeholder_precedence() {
        let config = SelectConfig::new().placeholder("From config");
        assert_eq!(config.resolve_placeholder(Some("Native")), "Native");
        assert_eq!(config.resolve_placeholder(Some("")), "From config");
        assert_eq!(config.resolve_placeholder(None), "From config");
    }

    #[test]
    fn test_from_toml() {
        let config = SelectConfig::from_toml(
            r#"
            searchable = true

            [[data]]
            text = "Red"
            value = "red"

            [[data]]
            text = "Green"
            value = "green"
            "#,
        )
        .unwrap();

        assert!(config.searchable);
        assert_eq!(config.data.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_duplicate_data_values_rejected() {
        let config = SelectConfig::new().data([OptionData::new("A", "x"), OptionData::new("B", "x")]);
        assert!(matches!(config.validate(), Err(SelectError::Invalid(_))));
    }
}
