//! The accumulation key: what the user is browsing.

use crate::categories::{CATEGORY_ALL, is_category_id};

/// A (search, category) pair identifying one accumulated result set.
///
/// Two keys are the same browse context iff both fields match; any change
/// is a hard transition that discards accumulated pages.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterKey {
    /// Free-text search forwarded to the provider ("" = none)
    pub search: String,
    /// Category id; "all" means unfiltered
    pub category: String,
}

impl Default for FilterKey {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: CATEGORY_ALL.to_string(),
        }
    }
}

impl FilterKey {
    pub fn new(search: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            category: category.into(),
        }
    }

    /// Interpret a raw URL query value.
    ///
    /// A token naming a known category id selects that category; anything
    /// else is free text. When a tool name collides with a category id the
    /// category wins. Evaluated once per key change, not per keystroke.
    pub fn from_url_query(query: &str) -> Self {
        let token = query.trim();
        if token.is_empty() {
            return Self::default();
        }
        if is_category_id(token) {
            return Self::new("", token.to_lowercase());
        }
        Self::new(token, CATEGORY_ALL)
    }

    /// No search, no category filter.
    pub fn is_unfiltered(&self) -> bool {
        self.search.is_empty() && self.category == CATEGORY_ALL
    }
}
