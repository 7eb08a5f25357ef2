//! Validated taxonomy domain model.
//!
//! # Responsibility
//! - Define works, subjects and taxonomies with their construction rules.
//! - Define the canonical orderings applied at every tree level.
//!
//! # Invariants
//! - Every model value is validated once at construction and never mutated.
//! - Subject and taxonomy children are non-empty, duplicate-free and sorted.
//! - `minutes` of a level always equals the sum of its children's minutes.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod collation;
pub mod date;
pub mod level;
pub mod subject;
pub mod taxonomy;
pub mod work;

pub type ModelResult<T> = Result<T, ModelError>;

/// Validation errors raised while constructing model values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Subject or taxonomy name is empty; `kind` names which one.
    EmptyName { kind: &'static str },
    /// Work title is empty.
    EmptyTitle,
    /// Subject has no items.
    EmptyItems(String),
    /// Taxonomy has no subjects.
    EmptySubjects(String),
    /// Work duration is not positive.
    InvalidDuration { title: String, minutes: i64 },
    /// Two works in one subject share their identity key.
    DuplicateWork(String),
    /// Two sibling subjects share their name.
    DuplicateSubject(String),
    /// Date string is malformed or names a non-existent day.
    InvalidDate(String),
    /// URL string cannot be parsed as an absolute URL.
    InvalidUrl { url: String, reason: String },
    /// Aggregated minutes of a subject or taxonomy exceed `u64::MAX`.
    MinutesOverflow(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName { kind } => write!(f, "empty {kind} name"),
            Self::EmptyTitle => write!(f, "empty work title"),
            Self::EmptyItems(name) => write!(f, "no items for subject '{name}'"),
            Self::EmptySubjects(name) => write!(f, "no subjects for taxonomy '{name}'"),
            Self::InvalidDuration { title, minutes } => {
                write!(f, "invalid minutes for work '{title}': {minutes}")
            }
            Self::DuplicateWork(title) => write!(f, "duplicate work: '{title}'"),
            Self::DuplicateSubject(name) => write!(f, "duplicate subject: '{name}'"),
            Self::InvalidDate(source) => write!(f, "invalid date string: '{source}'"),
            Self::InvalidUrl { url, reason } => write!(f, "invalid url '{url}': {reason}"),
            Self::MinutesOverflow(name) => write!(f, "total minutes overflow in '{name}'"),
        }
    }
}

impl Error for ModelError {}
