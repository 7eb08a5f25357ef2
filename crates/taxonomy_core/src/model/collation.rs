//! Locale-aware string comparison primitive.
//!
//! # Responsibility
//! - Provide the title/name comparison used by work and subject ordering.
//! - Let callers plug in a real locale collator without touching the model.
//!
//! # Invariants
//! - A collator is a total order: it returns `Equal` only for equal inputs.

use std::cmp::Ordering;

/// String comparison used for alphabetical tie-breaks.
pub trait Collator: Send + Sync {
    fn compare(&self, left: &str, right: &str) -> Ordering;
}

impl<F> Collator for F
where
    F: Fn(&str, &str) -> Ordering + Send + Sync,
{
    fn compare(&self, left: &str, right: &str) -> Ordering {
        self(left, right)
    }
}

/// Case-insensitive collator; lowercase sorts before uppercase on ties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultCollator;

impl Collator for DefaultCollator {
    fn compare(&self, left: &str, right: &str) -> Ordering {
        let folded = left
            .chars()
            .flat_map(char::to_lowercase)
            .cmp(right.chars().flat_map(char::to_lowercase));

        folded.then_with(|| right.cmp(left))
    }
}
