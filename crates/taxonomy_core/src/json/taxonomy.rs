use crate::json::subject::SubjectJson;
use crate::model::level::TaxonomyLevel;
use crate::model::subject::Subject;
use crate::model::taxonomy::Taxonomy;
use crate::model::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonomyJson {
    pub name: String,
    pub minutes: u64,
    pub items: Vec<SubjectJson>,
}

impl TaxonomyJson {
    /// Restores the taxonomy described by this mirror.
    pub fn try_into_model(&self) -> ModelResult<Taxonomy> {
        Taxonomy::try_from(self)
    }
}

impl From<&Taxonomy> for TaxonomyJson {
    fn from(taxonomy: &Taxonomy) -> Self {
        Self {
            name: taxonomy.name().to_string(),
            minutes: taxonomy.minutes(),
            items: taxonomy
                .subjects()
                .iter()
                .map(|subject| SubjectJson::from(subject.as_ref()))
                .collect(),
        }
    }
}

impl TryFrom<&TaxonomyJson> for Taxonomy {
    type Error = ModelError;

    fn try_from(json: &TaxonomyJson) -> ModelResult<Self> {
        if json.name.is_empty() {
            return Err(ModelError::EmptyName { kind: "taxonomy" });
        }
        if json.items.is_empty() {
            return Err(ModelError::EmptySubjects(json.name.clone()));
        }

        let subjects = json
            .items
            .iter()
            .map(|item| Subject::try_from(item).map(Arc::new))
            .collect::<ModelResult<Vec<_>>>()?;
        Ok(Taxonomy::restore(json.name.clone(), subjects, json.minutes))
    }
}
