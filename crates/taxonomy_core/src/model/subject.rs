//! Subject node model.
//!
//! # Responsibility
//! - Group either works or child subjects under one name.
//! - Enforce non-emptiness, dedup and canonical order at construction.
//!
//! # Invariants
//! - Items are all works or all subjects; the enum makes mixing impossible.
//! - Works never share an identity key; child subjects never share a name.
//! - Items are sorted by `WorkOrdering` / `SubjectOrdering`.
//! - `minutes` is the sum of the items' minutes.

use crate::model::collation::{Collator, DefaultCollator};
use crate::model::level::{LevelItems, TaxonomyLevel};
use crate::model::work::{Work, WorkOrdering};
use crate::model::{ModelError, ModelResult};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

/// Homogeneous children of a subject.
///
/// Used both as construction input (any order) and as stored, sorted items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectItems {
    Subjects(Vec<Arc<Subject>>),
    Works(Vec<Work>),
}

impl SubjectItems {
    pub fn works(works: impl IntoIterator<Item = Work>) -> Self {
        Self::Works(works.into_iter().collect())
    }

    pub fn subjects<S>(subjects: impl IntoIterator<Item = S>) -> Self
    where
        S: Into<Arc<Subject>>,
    {
        Self::Subjects(subjects.into_iter().map(Into::into).collect())
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Subjects(subjects) => subjects.len(),
            Self::Works(works) => works.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Named grouping node of the taxonomy tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    name: String,
    items: SubjectItems,
    minutes: u64,
}

impl Subject {
    /// Creates a subject ordered with the default collator.
    pub fn create(name: impl Into<String>, items: SubjectItems) -> ModelResult<Self> {
        Self::create_with(&DefaultCollator, name, items)
    }

    /// Creates a subject, validating and sorting its items.
    ///
    /// # Errors
    /// - `ModelError::EmptyName` when `name` is empty.
    /// - `ModelError::EmptyItems` when `items` is empty.
    /// - `ModelError::DuplicateSubject` / `ModelError::DuplicateWork` on the
    ///   first repeated child, scanning in input order.
    /// - `ModelError::MinutesOverflow` when the total exceeds `u64::MAX`.
    pub fn create_with(
        collator: &dyn Collator,
        name: impl Into<String>,
        items: SubjectItems,
    ) -> ModelResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(ModelError::EmptyName { kind: "subject" });
        }
        if items.is_empty() {
            return Err(ModelError::EmptyItems(name));
        }

        let items = match items {
            SubjectItems::Subjects(mut subjects) => {
                ensure_unique_subject_names(&subjects)?;
                sort_subjects(collator, &mut subjects);
                SubjectItems::Subjects(subjects)
            }
            SubjectItems::Works(mut works) => {
                ensure_unique_works(&works)?;
                let ordering = WorkOrdering::new(collator);
                works.sort_by(|left, right| ordering.compare(left, right));
                SubjectItems::Works(works)
            }
        };

        let minutes = match &items {
            SubjectItems::Subjects(subjects) => total_minutes(&name, subjects)?,
            SubjectItems::Works(works) => checked_sum(&name, works.iter().map(Work::minutes))?,
        };

        Ok(Self {
            name,
            items,
            minutes,
        })
    }

    /// Rebuilds a subject from previously validated parts, keeping their order.
    pub(crate) fn restore(name: String, items: SubjectItems, minutes: u64) -> Self {
        Self {
            name,
            items,
            minutes,
        }
    }

    /// Child subjects, or `None` when the subject holds works.
    pub fn subjects(&self) -> Option<&[Arc<Subject>]> {
        self.items().subjects()
    }

    /// Works, or `None` when the subject holds child subjects.
    pub fn works(&self) -> Option<&[Work]> {
        self.items().works()
    }
}

impl TaxonomyLevel for Subject {
    fn name(&self) -> &str {
        &self.name
    }

    fn items(&self) -> LevelItems<'_> {
        match &self.items {
            SubjectItems::Subjects(subjects) => LevelItems::Subjects(subjects),
            SubjectItems::Works(works) => LevelItems::Works(works),
        }
    }

    fn minutes(&self) -> u64 {
        self.minutes
    }
}

/// Canonical total order over subjects: minutes descending, then name.
#[derive(Clone, Copy)]
pub struct SubjectOrdering<'c> {
    collator: &'c dyn Collator,
}

impl<'c> SubjectOrdering<'c> {
    pub fn new(collator: &'c dyn Collator) -> Self {
        Self { collator }
    }

    pub fn compare(&self, left: &Subject, right: &Subject) -> Ordering {
        right
            .minutes
            .cmp(&left.minutes)
            .then_with(|| self.collator.compare(&left.name, &right.name))
    }
}

pub(crate) fn ensure_unique_subject_names(subjects: &[Arc<Subject>]) -> ModelResult<()> {
    let mut names = HashSet::with_capacity(subjects.len());
    for subject in subjects {
        if !names.insert(subject.name.as_str()) {
            return Err(ModelError::DuplicateSubject(subject.name.clone()));
        }
    }
    Ok(())
}

pub(crate) fn sort_subjects(collator: &dyn Collator, subjects: &mut [Arc<Subject>]) {
    let ordering = SubjectOrdering::new(collator);
    subjects.sort_by(|left, right| ordering.compare(left, right));
}

/// Sums the children's minutes of the level named `owner`.
///
/// # Errors
/// - `ModelError::MinutesOverflow` naming `owner` when the sum exceeds `u64`.
pub(crate) fn total_minutes(owner: &str, subjects: &[Arc<Subject>]) -> ModelResult<u64> {
    checked_sum(owner, subjects.iter().map(|subject| subject.minutes))
}

fn checked_sum(owner: &str, minutes: impl IntoIterator<Item = u64>) -> ModelResult<u64> {
    minutes
        .into_iter()
        .try_fold(0u64, |total, item| total.checked_add(item))
        .ok_or_else(|| ModelError::MinutesOverflow(owner.to_string()))
}

fn ensure_unique_works(works: &[Work]) -> ModelResult<()> {
    let mut identities = HashSet::with_capacity(works.len());
    for work in works {
        if !identities.insert(work.identity()) {
            return Err(ModelError::DuplicateWork(work.title().to_string()));
        }
    }
    Ok(())
}
