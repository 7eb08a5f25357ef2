//! Raw subject maps.

use crate::model::collation::Collator;
use crate::model::subject::{sort_subjects, Subject, SubjectItems};
use crate::raw::dictionary::Dictionary;
use crate::raw::work::RawWork;
use crate::raw::IngestResult;
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Items below one raw subject name: a work array or a nested subject map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawSubjectItems {
    Works(Vec<RawWork>),
    Subjects(RawSubjects),
}

/// String-keyed map of raw subjects, in source order.
///
/// Sibling names are unique by construction; a repeated key in raw JSON keeps
/// the position of its first occurrence and the items of its last.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawSubjects(pub IndexMap<String, RawSubjectItems>);

impl RawSubjects {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Translates every subject name, recursively. Work arrays are kept as is.
    ///
    /// Names translating to the same text collapse into one entry; the entry
    /// appearing last in source order wins.
    pub fn localize(&self, dictionary: &dyn Dictionary) -> RawSubjects {
        let entries = self.0.iter().map(|(name, items)| {
            let items = match items {
                RawSubjectItems::Works(works) => RawSubjectItems::Works(works.clone()),
                RawSubjectItems::Subjects(subjects) => {
                    RawSubjectItems::Subjects(subjects.localize(dictionary))
                }
            };
            (dictionary.translate(name), items)
        });
        RawSubjects(entries.collect())
    }

    /// Reifies every entry in source order into a subject, pruning entries
    /// left without items, and returns the survivors in canonical order.
    ///
    /// # Errors
    /// - The first `IngestError` raised by any nested work or subject.
    pub fn reify(&self, collator: &dyn Collator) -> IngestResult<Vec<Arc<Subject>>> {
        let mut subjects = Vec::with_capacity(self.0.len());
        for (name, items) in &self.0 {
            if let Some(subject) = reify_subject(collator, name, items)? {
                subjects.push(Arc::new(subject));
            }
        }
        sort_subjects(collator, &mut subjects);
        Ok(subjects)
    }
}

fn reify_subject(
    collator: &dyn Collator,
    name: &str,
    items: &RawSubjectItems,
) -> IngestResult<Option<Subject>> {
    let items = match items {
        RawSubjectItems::Works(works) => SubjectItems::Works(
            works
                .iter()
                .map(RawWork::reify)
                .collect::<IngestResult<Vec<_>>>()?,
        ),
        RawSubjectItems::Subjects(subjects) => SubjectItems::Subjects(subjects.reify(collator)?),
    };

    if items.is_empty() {
        debug!("event=raw_subject_prune module=raw status=skipped subject={name}");
        return Ok(None);
    }

    Ok(Some(Subject::create_with(collator, name, items)?))
}
