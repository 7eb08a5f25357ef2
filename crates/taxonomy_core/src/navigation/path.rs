//! Immutable drill-down path over one taxonomy snapshot.
//!
//! # Responsibility
//! - Track the levels a consumer descended through, from the root down.
//! - Move to child levels, back to visited levels, or to the next
//!   meaningful level.
//! - Re-synchronize a path onto a refreshed taxonomy by subject name.
//!
//! # Invariants
//! - `levels[0]` is the taxonomy; every later level is one of the items of
//!   the level before it.
//! - `push` and `revert_to` match levels by identity (`Arc::ptr_eq`), never
//!   by value.
//! - Every operation returns a new path; the receiver is left untouched.

use crate::model::level::{LevelItems, TaxonomyLevel};
use crate::model::subject::Subject;
use crate::model::taxonomy::Taxonomy;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub type NavigationResult<T> = Result<T, NavigationError>;

/// Errors from path operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// Pushed subject is not a child of the current level.
    NotInCurrentLevel(String),
    /// Requested level is not part of the path.
    LevelNotInPath(String),
}

impl Display for NavigationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotInCurrentLevel(name) => write!(
                f,
                "cannot push subject '{name}' not belonging to the current level of the path"
            ),
            Self::LevelNotInPath(name) => {
                write!(f, "cannot find level '{name}' not belonging to the path")
            }
        }
    }
}

impl Error for NavigationError {}

/// One shared level inside a path.
#[derive(Debug, Clone)]
pub enum PathLevel {
    Taxonomy(Arc<Taxonomy>),
    Subject(Arc<Subject>),
}

impl PathLevel {
    /// Returns whether both handles point at the very same tree node.
    pub fn is_same(&self, other: &PathLevel) -> bool {
        match (self, other) {
            (Self::Taxonomy(left), Self::Taxonomy(right)) => Arc::ptr_eq(left, right),
            (Self::Subject(left), Self::Subject(right)) => Arc::ptr_eq(left, right),
            _ => false,
        }
    }

    fn level(&self) -> &dyn TaxonomyLevel {
        match self {
            Self::Taxonomy(taxonomy) => taxonomy.as_ref(),
            Self::Subject(subject) => subject.as_ref(),
        }
    }
}

impl TaxonomyLevel for PathLevel {
    fn name(&self) -> &str {
        self.level().name()
    }

    fn items(&self) -> LevelItems<'_> {
        self.level().items()
    }

    fn minutes(&self) -> u64 {
        self.level().minutes()
    }

    fn has_subjects(&self) -> bool {
        self.level().has_subjects()
    }
}

impl From<Arc<Taxonomy>> for PathLevel {
    fn from(value: Arc<Taxonomy>) -> Self {
        Self::Taxonomy(value)
    }
}

impl From<Arc<Subject>> for PathLevel {
    fn from(value: Arc<Subject>) -> Self {
        Self::Subject(value)
    }
}

/// Sequence of levels from the taxonomy root down to the current level.
#[derive(Debug, Clone)]
pub struct TaxonomyPath {
    root: Arc<Taxonomy>,
    levels: Vec<PathLevel>,
}

impl TaxonomyPath {
    /// Creates a path positioned at the taxonomy root.
    pub fn from_taxonomy(taxonomy: Arc<Taxonomy>) -> Self {
        Self {
            levels: vec![PathLevel::Taxonomy(Arc::clone(&taxonomy))],
            root: taxonomy,
        }
    }

    pub fn levels(&self) -> &[PathLevel] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always false: a path holds at least its taxonomy.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Taxonomy this path belongs to.
    pub fn taxonomy(&self) -> &Arc<Taxonomy> {
        &self.root
    }

    pub fn current_level(&self) -> &PathLevel {
        &self.levels[self.levels.len() - 1]
    }

    /// All levels except the current one.
    pub fn previous_levels(&self) -> &[PathLevel] {
        &self.levels[..self.levels.len() - 1]
    }

    /// Total number of items shown by the previous levels.
    pub fn top_subjects_in_previous_levels(&self) -> usize {
        self.previous_levels()
            .iter()
            .map(|level| level.items().len())
            .sum()
    }

    /// Descends into `subject`, which must be a child of the current level.
    ///
    /// # Errors
    /// - `NavigationError::NotInCurrentLevel` when `subject` is not one of the
    ///   current level's items (by identity).
    pub fn push(&self, subject: &Arc<Subject>) -> NavigationResult<Self> {
        let belongs = self
            .current_level()
            .items()
            .subjects()
            .is_some_and(|children| children.iter().any(|child| Arc::ptr_eq(child, subject)));
        if !belongs {
            return Err(NavigationError::NotInCurrentLevel(
                subject.name().to_string(),
            ));
        }

        let mut levels = self.levels.clone();
        levels.push(PathLevel::Subject(Arc::clone(subject)));
        Ok(Self {
            root: Arc::clone(&self.root),
            levels,
        })
    }

    /// Truncates the path right after the first occurrence of `level`.
    ///
    /// # Errors
    /// - `NavigationError::LevelNotInPath` when `level` is not in the path.
    pub fn revert_to(&self, level: impl Into<PathLevel>) -> NavigationResult<Self> {
        let level = level.into();
        let index = self
            .levels
            .iter()
            .position(|candidate| candidate.is_same(&level))
            .ok_or_else(|| NavigationError::LevelNotInPath(level.name().to_string()))?;

        Ok(Self {
            root: Arc::clone(&self.root),
            levels: self.levels[..=index].to_vec(),
        })
    }

    /// Descends through single-subject levels until a meaningful level.
    pub fn to_meaningful(&self) -> Self {
        let mut levels = self.levels.clone();
        loop {
            let current = &levels[levels.len() - 1];
            if current.is_meaningful() {
                break;
            }
            let Some(only_child) = current
                .items()
                .subjects()
                .and_then(|children| children.first())
                .cloned()
            else {
                break;
            };
            levels.push(PathLevel::Subject(only_child));
        }
        Self {
            root: Arc::clone(&self.root),
            levels,
        }
    }

    /// Rebuilds this path on another taxonomy snapshot, matching subjects by
    /// name level after level and stopping at the first mismatch.
    pub fn navigate_taxonomy(&self, taxonomy: Arc<Taxonomy>) -> Self {
        let mut levels = vec![PathLevel::Taxonomy(Arc::clone(&taxonomy))];

        for wanted in &self.levels[1..] {
            let current = &levels[levels.len() - 1];
            let Some(children) = current.items().subjects() else {
                break;
            };
            let Some(matching) = children
                .iter()
                .find(|child| child.name() == wanted.name())
                .cloned()
            else {
                break;
            };
            levels.push(PathLevel::Subject(matching));
        }

        if levels.len() < self.levels.len() {
            debug!(
                "event=path_renavigate module=navigation status=truncated from_depth={} to_depth={}",
                self.levels.len(),
                levels.len()
            );
        }

        Self {
            root: taxonomy,
            levels,
        }
    }
}

/// Paths are equal when they hold the very same levels, in the same order.
impl PartialEq for TaxonomyPath {
    fn eq(&self, other: &Self) -> bool {
        self.levels.len() == other.levels.len()
            && self
                .levels
                .iter()
                .zip(&other.levels)
                .all(|(left, right)| left.is_same(right))
    }
}

impl Eq for TaxonomyPath {}
