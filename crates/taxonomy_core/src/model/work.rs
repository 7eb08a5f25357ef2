//! Work leaf model.
//!
//! # Responsibility
//! - Define the atomic learning activity record.
//! - Define the canonical total order over works.
//!
//! # Invariants
//! - `title` is never empty and `minutes` is always positive.
//! - A work is immutable once created.
//! - Dedup identity is `title` for in-progress works and
//!   `(title, completion_date, minutes)` for completed ones.

use crate::model::collation::Collator;
use crate::model::date::CalendarDate;
use crate::model::{ModelError, ModelResult};
use std::cmp::Ordering;
use url::Url;

/// Optional attributes of a work.
///
/// Values are taken as-is; date and URL parsing happen before this layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkExtras {
    /// Free-text category, such as `Book` or `Course`.
    pub kind: Option<String>,
    pub completion_date: Option<CalendarDate>,
    pub url: Option<Url>,
    pub certificate_url: Option<Url>,
}

/// One completed or in-progress learning activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Work {
    title: String,
    minutes: u64,
    kind: Option<String>,
    completion_date: Option<CalendarDate>,
    url: Option<Url>,
    certificate_url: Option<Url>,
}

/// Key used to detect duplicate works inside one subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum WorkIdentity<'a> {
    InProgress(&'a str),
    Completed(&'a str, CalendarDate, u64),
}

impl Work {
    /// Creates a validated work.
    ///
    /// # Errors
    /// - `ModelError::EmptyTitle` when `title` is empty.
    /// - `ModelError::InvalidDuration` when `minutes <= 0`.
    pub fn create(title: impl Into<String>, minutes: i64, extras: WorkExtras) -> ModelResult<Self> {
        let title = title.into();
        if title.is_empty() {
            return Err(ModelError::EmptyTitle);
        }
        if minutes <= 0 {
            return Err(ModelError::InvalidDuration { title, minutes });
        }

        Ok(Self {
            title,
            minutes: minutes.unsigned_abs(),
            kind: extras.kind,
            completion_date: extras.completion_date,
            url: extras.url,
            certificate_url: extras.certificate_url,
        })
    }

    /// Shorthand for a work without optional attributes.
    pub fn simple(title: impl Into<String>, minutes: i64) -> ModelResult<Self> {
        Self::create(title, minutes, WorkExtras::default())
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn minutes(&self) -> u64 {
        self.minutes
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn completion_date(&self) -> Option<CalendarDate> {
        self.completion_date
    }

    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    pub fn certificate_url(&self) -> Option<&Url> {
        self.certificate_url.as_ref()
    }

    /// Returns whether the work still lacks a completion date.
    pub fn is_in_progress(&self) -> bool {
        self.completion_date.is_none()
    }

    pub(crate) fn identity(&self) -> WorkIdentity<'_> {
        match self.completion_date {
            None => WorkIdentity::InProgress(&self.title),
            Some(date) => WorkIdentity::Completed(&self.title, date, self.minutes),
        }
    }
}

/// Parses and normalizes one URL attribute.
///
/// # Errors
/// - `ModelError::InvalidUrl` when `raw` is not an absolute URL.
pub fn parse_url(raw: &str) -> ModelResult<Url> {
    Url::parse(raw.trim()).map_err(|err| ModelError::InvalidUrl {
        url: raw.to_string(),
        reason: err.to_string(),
    })
}

/// Canonical total order over works.
///
/// 1. In-progress works come before completed ones.
/// 2. Completed works are sorted by completion date, most recent first.
/// 3. Then by minutes, longest first.
/// 4. Then by title, through the collator.
#[derive(Clone, Copy)]
pub struct WorkOrdering<'c> {
    collator: &'c dyn Collator,
}

impl<'c> WorkOrdering<'c> {
    pub fn new(collator: &'c dyn Collator) -> Self {
        Self { collator }
    }

    pub fn compare(&self, left: &Work, right: &Work) -> Ordering {
        let by_date = match (left.completion_date, right.completion_date) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(left_date), Some(right_date)) => right_date.cmp(&left_date),
        };

        by_date
            .then_with(|| right.minutes.cmp(&left.minutes))
            .then_with(|| self.collator.compare(&left.title, &right.title))
    }
}
