//! Shared shape of browsable taxonomy levels.
//!
//! A level is either the taxonomy root or one subject. Both expose a name,
//! their children and the aggregated duration, which is all the navigation
//! layer needs to walk the tree.

use crate::model::subject::Subject;
use crate::model::work::Work;
use std::sync::Arc;

/// Borrowed view over the children of one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelItems<'a> {
    Subjects(&'a [Arc<Subject>]),
    Works(&'a [Work]),
}

impl<'a> LevelItems<'a> {
    pub fn len(&self) -> usize {
        match self {
            Self::Subjects(subjects) => subjects.len(),
            Self::Works(works) => works.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn subjects(&self) -> Option<&'a [Arc<Subject>]> {
        match self {
            Self::Subjects(subjects) => Some(subjects),
            Self::Works(_) => None,
        }
    }

    pub fn works(&self) -> Option<&'a [Work]> {
        match self {
            Self::Subjects(_) => None,
            Self::Works(works) => Some(works),
        }
    }
}

/// Capability shared by `Taxonomy` and `Subject`.
pub trait TaxonomyLevel {
    fn name(&self) -> &str;

    /// Children in canonical order.
    fn items(&self) -> LevelItems<'_>;

    /// Sum of the children's minutes.
    fn minutes(&self) -> u64;

    fn has_subjects(&self) -> bool {
        matches!(self.items(), LevelItems::Subjects(_))
    }

    /// A level is meaningful when it holds works or at least two subjects.
    ///
    /// A level wrapping exactly one subject is a pass-through.
    fn is_meaningful(&self) -> bool {
        !self.has_subjects() || self.items().len() >= 2
    }
}
