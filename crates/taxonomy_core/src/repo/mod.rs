//! Taxonomy retrieval layer.
//!
//! # Responsibility
//! - Define the async contracts for fetching raw taxonomies by id and for
//!   retrieving reified taxonomies by key.
//! - Provide fetching and memoizing implementations of both contracts.
//!
//! # Invariants
//! - Only successful results are memoized; failures always reach the wrapped
//!   source again on the next call.
//! - Concurrent misses for the same key are not coalesced.

use crate::raw::IngestError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod fetcher;
pub mod key;
pub mod taxonomy_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors surfaced by fetchers and repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// Key array or single key fails validation.
    InvalidTaxonomyKey(String),
    /// No raw taxonomy is registered for the id.
    InvalidTaxonomyId(String),
    /// External source failed to deliver the raw taxonomy.
    Fetch(String),
    /// Raw taxonomy could not be reified.
    Ingest(IngestError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTaxonomyKey(reason) => write!(f, "{reason}"),
            Self::InvalidTaxonomyId(id) => write!(f, "invalid taxonomy id: '{id}'"),
            Self::Fetch(reason) => write!(f, "taxonomy fetch failed: {reason}"),
            Self::Ingest(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Ingest(err) => Some(err),
            Self::InvalidTaxonomyKey(_) | Self::InvalidTaxonomyId(_) | Self::Fetch(_) => None,
        }
    }
}

impl From<IngestError> for RepoError {
    fn from(value: IngestError) -> Self {
        Self::Ingest(value)
    }
}
