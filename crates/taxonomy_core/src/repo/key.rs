//! Taxonomy keys and key-array validation.

use crate::repo::{RepoError, RepoResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// Identifies one taxonomy: `id` selects the raw source, `name` is the
/// display name given to the reified taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxonomyKey {
    pub id: String,
    pub name: String,
}

impl TaxonomyKey {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Checks that a key array is non-empty and that ids and names are
/// non-empty and unique.
///
/// # Errors
/// - `RepoError::InvalidTaxonomyKey` naming the first offending key or field.
pub fn validate_taxonomy_keys(keys: &[TaxonomyKey]) -> RepoResult<()> {
    if keys.is_empty() {
        return Err(RepoError::InvalidTaxonomyKey(
            "empty taxonomy key array".to_string(),
        ));
    }

    validate_field(keys, "id", |key| &key.id)?;
    validate_field(keys, "name", |key| &key.name)
}

/// Reads a key array from loosely-typed JSON.
///
/// Every `id` is checked (missing, `null`, empty, non-string, duplicate)
/// before any `name`, so the reported problem is the first one in that order.
///
/// # Errors
/// - `RepoError::InvalidTaxonomyKey` for any malformed or duplicate entry.
pub fn parse_taxonomy_keys(value: &Value) -> RepoResult<Vec<TaxonomyKey>> {
    let entries = value.as_array().ok_or_else(|| {
        RepoError::InvalidTaxonomyKey(format!("taxonomy keys must be an array: {value}"))
    })?;
    if entries.is_empty() {
        return Err(RepoError::InvalidTaxonomyKey(
            "empty taxonomy key array".to_string(),
        ));
    }

    let ids = string_fields(entries, "id")?;
    let names = string_fields(entries, "name")?;
    Ok(ids
        .into_iter()
        .zip(names)
        .map(|(id, name)| TaxonomyKey { id, name })
        .collect())
}

fn validate_field(
    keys: &[TaxonomyKey],
    field_name: &str,
    field: impl Fn(&TaxonomyKey) -> &String,
) -> RepoResult<()> {
    let mut seen = HashSet::with_capacity(keys.len());
    for key in keys {
        let value = field(key);
        if value.is_empty() {
            let rendered = serde_json::to_string(key).unwrap_or_default();
            return Err(RepoError::InvalidTaxonomyKey(format!(
                "taxonomy key with empty/missing {field_name}: {rendered}"
            )));
        }
        if !seen.insert(value.as_str()) {
            return Err(RepoError::InvalidTaxonomyKey(format!(
                "duplicate taxonomy key {field_name}: '{value}'"
            )));
        }
    }
    Ok(())
}

fn string_fields(entries: &[Value], field_name: &str) -> RepoResult<Vec<String>> {
    let mut seen = HashSet::with_capacity(entries.len());
    let mut values = Vec::with_capacity(entries.len());
    for entry in entries {
        let text = match entry.get(field_name) {
            Some(Value::String(text)) if !text.is_empty() => text,
            None | Some(Value::Null) | Some(Value::String(_)) => {
                return Err(RepoError::InvalidTaxonomyKey(format!(
                    "taxonomy key with empty/missing {field_name}: {entry}"
                )))
            }
            Some(other) => {
                return Err(RepoError::InvalidTaxonomyKey(format!(
                    "taxonomy key {field_name} '{other}' is not a string"
                )))
            }
        };
        if !seen.insert(text.as_str()) {
            return Err(RepoError::InvalidTaxonomyKey(format!(
                "duplicate taxonomy key {field_name}: '{text}'"
            )));
        }
        values.push(text.clone());
    }
    Ok(values)
}
