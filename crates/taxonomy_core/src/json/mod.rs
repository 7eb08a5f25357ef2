//! Serializable mirror of the taxonomy model.
//!
//! # Responsibility
//! - Render works, subjects and taxonomies as plain serde structures.
//! - Restore model values from previously rendered mirrors.
//!
//! # Invariants
//! - `X::try_from(&XJson::from(&x)) == Ok(x)` for every model value.
//! - Restoring keeps item order and minutes as serialized; dates, URLs and
//!   names are validated again.

mod subject;
mod taxonomy;
mod work;

pub use subject::{SubjectItemsJson, SubjectJson};
pub use taxonomy::TaxonomyJson;
pub use work::WorkJson;
