//! Raw taxonomy ingestion.
//!
//! # Responsibility
//! - Accept loosely-typed nested input (string-keyed maps of subjects and
//!   arrays of work records) as produced by external sources.
//! - Localize subject names and reify raw input into validated model values.
//!
//! # Invariants
//! - The first validation failure aborts the whole ingestion; no partial
//!   taxonomy is ever produced.
//! - Subjects whose items are empty after recursive pruning are dropped
//!   instead of becoming empty subjects.
//! - Work titles are never translated.

use crate::model::ModelError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod dictionary;
pub mod subjects;
pub mod taxonomy;
pub mod work;

pub type IngestResult<T> = Result<T, IngestError>;

/// Errors raised while reifying raw input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    /// Work record has no title; carries the raw record as JSON.
    MissingTitle(String),
    /// Work record has no `minutes` field; carries the work title.
    MissingMinutes(String),
    /// Work `minutes` cannot be converted to a number; carries the title.
    NotANumber(String),
    /// Rounded `minutes` does not fit a signed 64-bit integer.
    MinutesOutOfRange { title: String, minutes: String },
    /// Reified values violate a model invariant.
    Model(ModelError),
    /// Raw text or value does not have the raw taxonomy shape.
    InvalidFormat(String),
}

impl Display for IngestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTitle(raw) => write!(f, "missing work title: {raw}"),
            Self::MissingMinutes(title) => {
                write!(f, "missing 'minutes' field in work '{title}'")
            }
            Self::NotANumber(title) => {
                write!(f, "'minutes' field in work '{title}' is not a number")
            }
            Self::MinutesOutOfRange { title, minutes } => {
                write!(f, "'minutes' field in work '{title}' is out of range: {minutes}")
            }
            Self::Model(err) => write!(f, "{err}"),
            Self::InvalidFormat(reason) => write!(f, "invalid raw taxonomy format: {reason}"),
        }
    }
}

impl Error for IngestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Model(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ModelError> for IngestError {
    fn from(value: ModelError) -> Self {
        Self::Model(value)
    }
}

impl From<serde_json::Error> for IngestError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidFormat(value.to_string())
    }
}
