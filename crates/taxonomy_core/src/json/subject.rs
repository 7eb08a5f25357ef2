use crate::json::work::WorkJson;
use crate::model::level::TaxonomyLevel;
use crate::model::subject::{Subject, SubjectItems};
use crate::model::work::Work;
use crate::model::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Items of a serialized subject; the element shape selects the variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubjectItemsJson {
    Subjects(Vec<SubjectJson>),
    Works(Vec<WorkJson>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectJson {
    pub name: String,
    pub has_subjects: bool,
    pub minutes: u64,
    pub items: SubjectItemsJson,
}

impl From<&Subject> for SubjectJson {
    fn from(subject: &Subject) -> Self {
        let items = match (subject.subjects(), subject.works()) {
            (Some(subjects), _) => SubjectItemsJson::Subjects(
                subjects.iter().map(|child| SubjectJson::from(child.as_ref())).collect(),
            ),
            (None, Some(works)) => {
                SubjectItemsJson::Works(works.iter().map(WorkJson::from).collect())
            }
            (None, None) => SubjectItemsJson::Works(Vec::new()),
        };

        Self {
            name: subject.name().to_string(),
            has_subjects: subject.has_subjects(),
            minutes: subject.minutes(),
            items,
        }
    }
}

/// Restores a subject trusting the serialized order and minutes.
///
/// # Errors
/// - `ModelError::EmptyName` / `ModelError::EmptyItems` for hollow mirrors.
/// - Any error raised while restoring nested works.
impl TryFrom<&SubjectJson> for Subject {
    type Error = ModelError;

    fn try_from(json: &SubjectJson) -> ModelResult<Self> {
        if json.name.is_empty() {
            return Err(ModelError::EmptyName { kind: "subject" });
        }

        let items = match &json.items {
            SubjectItemsJson::Subjects(children) => SubjectItems::Subjects(
                children
                    .iter()
                    .map(|child| Subject::try_from(child).map(Arc::new))
                    .collect::<ModelResult<Vec<_>>>()?,
            ),
            SubjectItemsJson::Works(works) => SubjectItems::Works(
                works
                    .iter()
                    .map(Work::try_from)
                    .collect::<ModelResult<Vec<_>>>()?,
            ),
        };
        if items.is_empty() {
            return Err(ModelError::EmptyItems(json.name.clone()));
        }

        Ok(Subject::restore(json.name.clone(), items, json.minutes))
    }
}
