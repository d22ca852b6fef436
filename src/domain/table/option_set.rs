use std::collections::BTreeSet;

use serde_json::Value;

use crate::domain::table::page_result::PageResult;

/// Distinct filter-option values observed in fetched pages (e.g. device
/// ids), kept sorted ascending and deduplicated.
///
/// The set only ever grows while a view is alive; it is reset when the
/// governing category filter changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet {
    values: Vec<String>,
}

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Set-union the incoming values into the stored list.
    ///
    /// Returns `true` only when the stored content actually changed;
    /// merging an identical or subset batch leaves the storage untouched
    /// so observers keyed on it do not refresh for nothing.
    pub fn merge_values<I>(&mut self, incoming: I) -> bool
    where
        I: IntoIterator<Item = String>,
    {
        let mut merged: BTreeSet<String> = self.values.iter().cloned().collect();
        for value in incoming {
            if !value.is_empty() {
                merged.insert(value);
            }
        }

        // `merged` is a superset of the stored values, so an unchanged
        // length means identical content.
        if merged.len() == self.values.len() {
            return false;
        }

        self.values = merged.into_iter().collect();
        true
    }

    /// Merge the designated key of every row in a fetched page.
    pub fn merge_from_page(&mut self, page: &PageResult<Value>, key: &str) -> bool {
        let incoming = page
            .items
            .iter()
            .filter_map(|row| row.get(key))
            .filter_map(coerce_option_value);
        self.merge_values(incoming)
    }

    pub fn reset(&mut self) {
        self.values.clear();
    }
}

/// Canonical string form for option values: rows carry device ids as
/// strings on some endpoints and as bare numbers on others.
pub(crate) fn coerce_option_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
