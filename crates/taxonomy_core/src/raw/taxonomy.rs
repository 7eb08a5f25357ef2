//! Raw taxonomy documents.

use crate::model::collation::{Collator, DefaultCollator};
use crate::model::taxonomy::Taxonomy;
use crate::raw::dictionary::Dictionary;
use crate::raw::subjects::RawSubjects;
use crate::raw::IngestResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Named raw taxonomy, as read from `{ "name": ..., "rootSubjects": {...} }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTaxonomy {
    pub name: String,
    pub root_subjects: RawSubjects,
}

impl RawTaxonomy {
    pub fn new(name: impl Into<String>, root_subjects: RawSubjects) -> Self {
        Self {
            name: name.into(),
            root_subjects,
        }
    }

    /// Parses raw taxonomy JSON text.
    ///
    /// # Errors
    /// - `IngestError::InvalidFormat` when the text is not a raw taxonomy.
    pub fn from_json_str(text: &str) -> IngestResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads a raw taxonomy from an already-parsed JSON value.
    pub fn from_value(value: Value) -> IngestResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Returns a copy with the taxonomy name replaced.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Translates the taxonomy name and every subject name.
    pub fn localize(&self, dictionary: &dyn Dictionary) -> RawTaxonomy {
        RawTaxonomy {
            name: dictionary.translate(&self.name),
            root_subjects: self.root_subjects.localize(dictionary),
        }
    }

    /// Reifies with the default collator.
    pub fn reify(&self) -> IngestResult<Taxonomy> {
        self.reify_with(&DefaultCollator)
    }

    /// Reifies the whole document into a validated taxonomy.
    ///
    /// # Errors
    /// - The first nested `IngestError`, or `IngestError::Model` when the
    ///   taxonomy itself is invalid (empty name, no surviving subjects).
    pub fn reify_with(&self, collator: &dyn Collator) -> IngestResult<Taxonomy> {
        let subjects = self.root_subjects.reify(collator)?;
        Ok(Taxonomy::create_with(collator, self.name.as_str(), subjects)?)
    }
}
