//! Request filters.
//!
//! Every server request (tiles, hit-grid, initial summary) carries the same
//! query-string fragment describing the active scope.

use std::collections::BTreeMap;

use crate::config::MapConfig;

/// Filter key scoping results to one user's trees.
pub const USER_ID_FILTER: &str = "userid";

/// Active request filters, keyed by query parameter name.
///
/// Backed by an ordered map so [`FilterSet::to_query`] is deterministic
/// regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    entries: BTreeMap<String, String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives the filters implied by a configuration.
    pub fn from_config(config: &MapConfig) -> Self {
        let mut filters = Self::new();
        if let Some(user_id) = config.user_id.as_deref() {
            filters.insert(USER_ID_FILTER, user_id);
        }
        filters
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns the user scope, if one is set.
    pub fn user_id(&self) -> Option<&str> {
        self.get(USER_ID_FILTER)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Joins the filters as percent-encoded `key=value` pairs separated by `&`.
    ///
    /// Returns an empty string when no filter is active.
    pub fn to_query(&self) -> String {
        self.iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Appends the filters to a URL as a query string, leaving the URL
    /// untouched when no filter is active.
    pub fn apply_to(&self, url: &str) -> String {
        if self.is_empty() {
            url.to_string()
        } else {
            format!("{}?{}", url, self.to_query())
        }
    }
}
