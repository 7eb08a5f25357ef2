//! Taxonomy repositories.
//!
//! # Responsibility
//! - Turn fetched raw taxonomies into validated, shareable taxonomies.
//! - Memoize successful retrievals per key.
//!
//! # Invariants
//! - `FetchingTaxonomyRepository` fetches and reifies on every call.
//! - The reified taxonomy is always named after `key.name`, before any
//!   localization.

use crate::model::collation::{Collator, DefaultCollator};
use crate::model::level::TaxonomyLevel;
use crate::model::taxonomy::Taxonomy;
use crate::raw::dictionary::Dictionary;
use crate::repo::fetcher::RawTaxonomyFetcher;
use crate::repo::key::TaxonomyKey;
use crate::repo::RepoResult;
use async_trait::async_trait;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Asynchronous source of validated taxonomies.
#[async_trait]
pub trait TaxonomyRepository: Send + Sync {
    async fn get_by_key(&self, key: &TaxonomyKey) -> RepoResult<Arc<Taxonomy>>;
}

#[async_trait]
impl<T> TaxonomyRepository for Arc<T>
where
    T: TaxonomyRepository + ?Sized,
{
    async fn get_by_key(&self, key: &TaxonomyKey) -> RepoResult<Arc<Taxonomy>> {
        self.as_ref().get_by_key(key).await
    }
}

/// Repository that fetches the raw taxonomy for `key.id` and reifies it.
pub struct FetchingTaxonomyRepository<F> {
    fetcher: F,
    dictionary: Option<Box<dyn Dictionary>>,
    collator: Box<dyn Collator>,
}

impl<F> FetchingTaxonomyRepository<F>
where
    F: RawTaxonomyFetcher,
{
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            dictionary: None,
            collator: Box::new(DefaultCollator),
        }
    }

    /// Localizes every fetched raw taxonomy through `dictionary`.
    pub fn with_dictionary(mut self, dictionary: impl Dictionary + 'static) -> Self {
        self.dictionary = Some(Box::new(dictionary));
        self
    }

    /// Orders reified subjects and works with `collator`.
    pub fn with_collator(mut self, collator: impl Collator + 'static) -> Self {
        self.collator = Box::new(collator);
        self
    }
}

#[async_trait]
impl<F> TaxonomyRepository for FetchingTaxonomyRepository<F>
where
    F: RawTaxonomyFetcher,
{
    async fn get_by_key(&self, key: &TaxonomyKey) -> RepoResult<Arc<Taxonomy>> {
        debug!(
            "event=taxonomy_fetch module=repo status=start taxonomy_id={}",
            key.id
        );

        let raw = match self.fetcher.fetch(&key.id).await {
            Ok(raw) => raw.with_name(key.name.as_str()),
            Err(err) => {
                warn!(
                    "event=taxonomy_fetch module=repo status=error taxonomy_id={} error={}",
                    key.id, err
                );
                return Err(err);
            }
        };

        let raw = match &self.dictionary {
            Some(dictionary) => raw.localize(dictionary.as_ref()),
            None => raw,
        };

        let taxonomy = raw.reify_with(self.collator.as_ref()).map_err(|err| {
            warn!(
                "event=taxonomy_reify module=repo status=error taxonomy_id={} error={}",
                key.id, err
            );
            err
        })?;

        info!(
            "event=taxonomy_fetch module=repo status=ok taxonomy_id={} subjects={} minutes={}",
            key.id,
            taxonomy.subjects().len(),
            taxonomy.minutes()
        );
        Ok(Arc::new(taxonomy))
    }
}

/// Memoizes successful retrievals of the wrapped repository by key.
pub struct CachingTaxonomyRepository<R> {
    inner: R,
    cache: RwLock<HashMap<TaxonomyKey, Arc<Taxonomy>>>,
}

impl<R> CachingTaxonomyRepository<R>
where
    R: TaxonomyRepository,
{
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Number of memoized taxonomies.
    pub async fn cached_len(&self) -> usize {
        self.cache.read().await.len()
    }
}

#[async_trait]
impl<R> TaxonomyRepository for CachingTaxonomyRepository<R>
where
    R: TaxonomyRepository,
{
    async fn get_by_key(&self, key: &TaxonomyKey) -> RepoResult<Arc<Taxonomy>> {
        if let Some(cached) = self.cache.read().await.get(key) {
            debug!(
                "event=taxonomy_cache module=repo status=hit taxonomy_id={}",
                key.id
            );
            return Ok(Arc::clone(cached));
        }

        debug!(
            "event=taxonomy_cache module=repo status=miss taxonomy_id={}",
            key.id
        );
        let taxonomy = self.inner.get_by_key(key).await?;
        self.cache
            .write()
            .await
            .insert(key.clone(), Arc::clone(&taxonomy));
        Ok(taxonomy)
    }
}

#[cfg(test)]
mod tests {
    use super::{FetchingTaxonomyRepository, TaxonomyRepository};
    use crate::model::level::TaxonomyLevel;
    use crate::model::subject::{Subject, SubjectItems};
    use crate::model::taxonomy::Taxonomy;
    use crate::model::work::Work;
    use crate::raw::taxonomy::RawTaxonomy;
    use crate::raw::IngestError;
    use crate::repo::fetcher::FactoryRawTaxonomyFetcher;
    use crate::repo::key::TaxonomyKey;
    use crate::repo::RepoError;
    use serde_json::json;
    use std::collections::HashMap;

    fn fetcher() -> FactoryRawTaxonomyFetcher {
        let raw = RawTaxonomy::from_value(json!({
            "name": "Source name",
            "rootSubjects": {
                "First subject": [{ "title": "Alpha", "minutes": 9 }],
                "Second subject": [
                    { "title": "Beta", "minutes": 7 },
                    { "title": "Gamma", "minutes": 8 }
                ]
            }
        }))
        .expect("raw taxonomy shape");
        FactoryRawTaxonomyFetcher::new()
            .with_raw("ok", raw)
            .with_factory("broken", |_| {
                RawTaxonomy::from_value(json!({
                    "name": "Broken",
                    "rootSubjects": { "S": [{ "title": "No minutes" }] }
                }))
                .map_err(RepoError::from)
            })
    }

    #[tokio::test]
    async fn reifies_fetched_taxonomy_under_key_name() {
        let repository = FetchingTaxonomyRepository::new(fetcher());
        let taxonomy = repository
            .get_by_key(&TaxonomyKey::new("ok", "My taxonomy"))
            .await
            .expect("valid taxonomy");

        let expected = Taxonomy::create(
            "My taxonomy",
            [
                Subject::create(
                    "Second subject",
                    SubjectItems::works([
                        Work::simple("Gamma", 8).expect("valid work"),
                        Work::simple("Beta", 7).expect("valid work"),
                    ]),
                )
                .expect("valid subject"),
                Subject::create(
                    "First subject",
                    SubjectItems::works([Work::simple("Alpha", 9).expect("valid work")]),
                )
                .expect("valid subject"),
            ],
        )
        .expect("valid taxonomy");
        assert_eq!(*taxonomy, expected);
    }

    #[tokio::test]
    async fn localizes_after_naming() {
        let dictionary: HashMap<String, String> = [
            ("My taxonomy".to_string(), "La mia tassonomia".to_string()),
            ("First subject".to_string(), "Primo".to_string()),
        ]
        .into_iter()
        .collect();
        let repository = FetchingTaxonomyRepository::new(fetcher()).with_dictionary(dictionary);

        let taxonomy = repository
            .get_by_key(&TaxonomyKey::new("ok", "My taxonomy"))
            .await
            .expect("valid taxonomy");
        assert_eq!(taxonomy.name(), "La mia tassonomia");
        assert!(taxonomy.subjects().iter().any(|subject| subject.name() == "Primo"));
    }

    #[tokio::test]
    async fn surfaces_fetch_and_ingest_failures() {
        let repository = FetchingTaxonomyRepository::new(fetcher());

        let err = repository
            .get_by_key(&TaxonomyKey::new("unknown", "Unknown"))
            .await
            .unwrap_err();
        assert_eq!(err, RepoError::InvalidTaxonomyId("unknown".to_string()));

        let err = repository
            .get_by_key(&TaxonomyKey::new("broken", "Broken"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            RepoError::Ingest(IngestError::MissingMinutes("No minutes".to_string()))
        );
    }
}
