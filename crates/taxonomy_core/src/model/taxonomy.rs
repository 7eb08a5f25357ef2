//! Taxonomy root model.
//!
//! # Responsibility
//! - Hold the named root of a subject tree.
//!
//! # Invariants
//! - The root always holds subjects, never works.
//! - Root subjects are non-empty, uniquely named and sorted.

use crate::model::collation::{Collator, DefaultCollator};
use crate::model::level::{LevelItems, TaxonomyLevel};
use crate::model::subject::{ensure_unique_subject_names, sort_subjects, total_minutes, Subject};
use crate::model::{ModelError, ModelResult};
use std::sync::Arc;

/// Root of one taxonomy snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    name: String,
    subjects: Vec<Arc<Subject>>,
    minutes: u64,
}

impl Taxonomy {
    /// Creates a taxonomy ordered with the default collator.
    pub fn create<S>(name: impl Into<String>, subjects: impl IntoIterator<Item = S>) -> ModelResult<Self>
    where
        S: Into<Arc<Subject>>,
    {
        Self::create_with(&DefaultCollator, name, subjects)
    }

    /// Creates a taxonomy, validating and sorting its root subjects.
    ///
    /// # Errors
    /// - `ModelError::EmptyName` when `name` is empty.
    /// - `ModelError::DuplicateSubject` on the first repeated name, in input order.
    /// - `ModelError::EmptySubjects` when no subject is given.
    /// - `ModelError::MinutesOverflow` when the total exceeds `u64::MAX`.
    pub fn create_with<S>(
        collator: &dyn Collator,
        name: impl Into<String>,
        subjects: impl IntoIterator<Item = S>,
    ) -> ModelResult<Self>
    where
        S: Into<Arc<Subject>>,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(ModelError::EmptyName { kind: "taxonomy" });
        }

        let mut subjects: Vec<Arc<Subject>> = subjects.into_iter().map(Into::into).collect();
        ensure_unique_subject_names(&subjects)?;
        if subjects.is_empty() {
            return Err(ModelError::EmptySubjects(name));
        }
        sort_subjects(collator, &mut subjects);

        let minutes = total_minutes(&name, &subjects)?;
        Ok(Self {
            name,
            subjects,
            minutes,
        })
    }

    /// Rebuilds a taxonomy from previously validated parts, keeping their order.
    pub(crate) fn restore(name: String, subjects: Vec<Arc<Subject>>, minutes: u64) -> Self {
        Self {
            name,
            subjects,
            minutes,
        }
    }

    /// Root subjects in canonical order.
    pub fn subjects(&self) -> &[Arc<Subject>] {
        &self.subjects
    }
}

impl TaxonomyLevel for Taxonomy {
    fn name(&self) -> &str {
        &self.name
    }

    fn items(&self) -> LevelItems<'_> {
        LevelItems::Subjects(&self.subjects)
    }

    fn minutes(&self) -> u64 {
        self.minutes
    }

    fn has_subjects(&self) -> bool {
        true
    }
}
