//! Navigation over materialized taxonomy trees.
//!
//! # Responsibility
//! - Provide the immutable drill-down path used by consumers to browse a
//!   taxonomy snapshot.
//!
//! # Invariants
//! - Navigation never mutates the tree; it only returns new path values.

pub mod path;
