//! Search filter
//!
//! Visibility is derived state: it is recomputed from the query whenever the
//! query changes and is never persisted with the options.
//!
//! A non-empty query only takes effect while the dropdown is open. Typing
//! into the search box of a closed dropdown keeps the previous visible set.

use regex::{Regex, RegexBuilder};
use slotmap::SecondaryMap;

use crate::store::{OptionId, OptionStore};

/// How a query is matched against option labels
#[derive(Debug)]
enum Matcher {
    Pattern(Regex),
    /// Fallback for queries that are not valid patterns (e.g. "(x")
    Literal(String),
}

impl Matcher {
    fn new(query: &str) -> Self {
        match RegexBuilder::new(query).case_insensitive(true).build() {
            Ok(regex) => Matcher::Pattern(regex),
            Err(err) => {
                tracing::debug!(
                    "Select search {:?} is not a pattern ({}), matching literally",
                    query,
                    err
                );
                Matcher::Literal(query.to_string())
            }
        }
    }

    fn matches(&self, label: &str) -> bool {
        match self {
            Matcher::Pattern(regex) => regex.is_match(label),
            Matcher::Literal(needle) => label.to_lowercase().contains(needle.as_str()),
        }
    }
}

/// Derives the visible subset of options from a search query
#[derive(Debug, Default)]
pub struct FilterEngine {
    query: String,
    hidden: SecondaryMap<OptionId, ()>,
}

impl FilterEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current (lower-cased) query
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether an option is visible; unknown ids are never hidden
    pub fn is_visible(&self, id: OptionId) -> bool {
        !self.hidden.contains_key(id)
    }

    /// Number of visible options in `store`
    pub fn visible_count(&self, store: &OptionStore) -> usize {
        store.ids().iter().filter(|&&id| self.is_visible(id)).count()
    }

    /// Show every option and forget the query
    pub fn reset(&mut self) {
        self.query.clear();
        self.hidden.clear();
    }

    /// Update the query
    ///
    /// Returns `true` if visibility was recomputed. Disabled options are
    /// matched like any other; disabled and visible are independent.
    pub fn set_query(&mut self, store: &OptionStore, text: &str, open: bool) -> bool {
        self.query = text.to_lowercase();

        if self.query.is_empty() {
            self.hidden.clear();
            return true;
        }
        if !open {
            return false;
        }

        let matcher = Matcher::new(&self.query);
        self.hidden.clear();
        for (id, option) in store.iter() {
            if !matcher.matches(&option.text) {
                self.hidden.insert(id, ());
            }
        }
        tracing::debug!(
            "Select search {:?}: {} of {} options visible",
            self.query,
            self.visible_count(store),
            store.len()
        );
        true
    }
}
