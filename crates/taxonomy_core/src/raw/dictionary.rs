//! Translation lookup used to localize subject and taxonomy names.

use std::collections::{BTreeMap, HashMap};

/// Opaque string-to-string translation.
///
/// Implementations return the input unchanged when no translation exists.
pub trait Dictionary: Send + Sync {
    fn translate(&self, text: &str) -> String;
}

impl Dictionary for HashMap<String, String> {
    fn translate(&self, text: &str) -> String {
        self.get(text).cloned().unwrap_or_else(|| text.to_string())
    }
}

impl Dictionary for BTreeMap<String, String> {
    fn translate(&self, text: &str) -> String {
        self.get(text).cloned().unwrap_or_else(|| text.to_string())
    }
}
