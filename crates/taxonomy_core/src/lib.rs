//! Core domain logic for learning taxonomies.
//! This crate is the single source of truth for tree invariants.

pub mod json;
pub mod logging;
pub mod model;
pub mod navigation;
pub mod raw;
pub mod repo;

pub use json::{SubjectItemsJson, SubjectJson, TaxonomyJson, WorkJson};
pub use logging::{
    default_log_level, init_logging, logging_status, LoggingConfig, LoggingError,
};
pub use model::collation::{Collator, DefaultCollator};
pub use model::date::CalendarDate;
pub use model::level::{LevelItems, TaxonomyLevel};
pub use model::subject::{Subject, SubjectItems, SubjectOrdering};
pub use model::taxonomy::Taxonomy;
pub use model::work::{Work, WorkExtras, WorkOrdering};
pub use model::{ModelError, ModelResult};
pub use navigation::path::{NavigationError, NavigationResult, PathLevel, TaxonomyPath};
pub use raw::dictionary::Dictionary;
pub use raw::subjects::{RawSubjectItems, RawSubjects};
pub use raw::taxonomy::RawTaxonomy;
pub use raw::work::RawWork;
pub use raw::{IngestError, IngestResult};
pub use repo::fetcher::{CachingRawTaxonomyFetcher, FactoryRawTaxonomyFetcher, RawTaxonomyFetcher};
pub use repo::key::{parse_taxonomy_keys, validate_taxonomy_keys, TaxonomyKey};
pub use repo::taxonomy_repo::{
    CachingTaxonomyRepository, FetchingTaxonomyRepository, TaxonomyRepository,
};
pub use repo::{RepoError, RepoResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
