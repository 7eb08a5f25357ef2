//! Raw taxonomy fetchers.
//!
//! # Responsibility
//! - Define the async source of raw taxonomies, addressed by taxonomy id.
//! - Provide an in-process factory registry and a memoizing decorator.
//!
//! # Invariants
//! - `CachingRawTaxonomyFetcher` stores raw values only after a successful
//!   fetch and never evicts them.

use crate::raw::taxonomy::RawTaxonomy;
use crate::repo::{RepoError, RepoResult};
use async_trait::async_trait;
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Asynchronous source of raw taxonomies.
#[async_trait]
pub trait RawTaxonomyFetcher: Send + Sync {
    async fn fetch(&self, taxonomy_id: &str) -> RepoResult<RawTaxonomy>;
}

#[async_trait]
impl<T> RawTaxonomyFetcher for Arc<T>
where
    T: RawTaxonomyFetcher + ?Sized,
{
    async fn fetch(&self, taxonomy_id: &str) -> RepoResult<RawTaxonomy> {
        self.as_ref().fetch(taxonomy_id).await
    }
}

type RawTaxonomyFactory = Box<dyn Fn(&str) -> RepoResult<RawTaxonomy> + Send + Sync>;

/// Fetcher backed by one synchronous factory per registered taxonomy id.
#[derive(Default)]
pub struct FactoryRawTaxonomyFetcher {
    factories: HashMap<String, RawTaxonomyFactory>,
}

impl FactoryRawTaxonomyFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `factory` under `taxonomy_id`, replacing any previous one.
    pub fn with_factory<F>(mut self, taxonomy_id: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&str) -> RepoResult<RawTaxonomy> + Send + Sync + 'static,
    {
        self.factories.insert(taxonomy_id.into(), Box::new(factory));
        self
    }

    /// Registers a fixed raw taxonomy under `taxonomy_id`.
    pub fn with_raw(self, taxonomy_id: impl Into<String>, raw: RawTaxonomy) -> Self {
        self.with_factory(taxonomy_id, move |_| Ok(raw.clone()))
    }

    pub fn contains(&self, taxonomy_id: &str) -> bool {
        self.factories.contains_key(taxonomy_id)
    }
}

#[async_trait]
impl RawTaxonomyFetcher for FactoryRawTaxonomyFetcher {
    async fn fetch(&self, taxonomy_id: &str) -> RepoResult<RawTaxonomy> {
        let factory = self
            .factories
            .get(taxonomy_id)
            .ok_or_else(|| RepoError::InvalidTaxonomyId(taxonomy_id.to_string()))?;
        factory(taxonomy_id)
    }
}

/// Memoizes successful fetches of the wrapped fetcher by taxonomy id.
pub struct CachingRawTaxonomyFetcher<F> {
    inner: F,
    cache: RwLock<HashMap<String, RawTaxonomy>>,
}

impl<F> CachingRawTaxonomyFetcher<F>
where
    F: RawTaxonomyFetcher,
{
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Number of memoized raw taxonomies.
    pub async fn cached_len(&self) -> usize {
        self.cache.read().await.len()
    }
}

#[async_trait]
impl<F> RawTaxonomyFetcher for CachingRawTaxonomyFetcher<F>
where
    F: RawTaxonomyFetcher,
{
    async fn fetch(&self, taxonomy_id: &str) -> RepoResult<RawTaxonomy> {
        if let Some(cached) = self.cache.read().await.get(taxonomy_id) {
            debug!("event=raw_fetch_cache module=repo status=hit taxonomy_id={taxonomy_id}");
            return Ok(cached.clone());
        }

        debug!("event=raw_fetch_cache module=repo status=miss taxonomy_id={taxonomy_id}");
        let fetched = self.inner.fetch(taxonomy_id).await?;
        self.cache
            .write()
            .await
            .insert(taxonomy_id.to_string(), fetched.clone());
        Ok(fetched)
    }
}

#[cfg(test)]
mod tests {
    use super::{CachingRawTaxonomyFetcher, FactoryRawTaxonomyFetcher, RawTaxonomyFetcher};
    use crate::raw::taxonomy::RawTaxonomy;
    use crate::repo::RepoError;
    use serde_json::json;

    fn raw(name: &str) -> RawTaxonomy {
        RawTaxonomy::from_value(json!({
            "name": name,
            "rootSubjects": { "Subject": [{ "title": "Alpha", "minutes": 9 }] }
        }))
        .expect("raw taxonomy shape")
    }

    #[tokio::test]
    async fn factory_fetcher_dispatches_by_id() {
        let fetcher = FactoryRawTaxonomyFetcher::new()
            .with_raw("a", raw("Alpha"))
            .with_factory("b", |id| Ok(raw(&format!("Built {id}"))));

        assert_eq!(fetcher.fetch("a").await.expect("registered").name, "Alpha");
        assert_eq!(fetcher.fetch("b").await.expect("registered").name, "Built b");
        assert!(fetcher.contains("a"));
    }

    #[tokio::test]
    async fn factory_fetcher_rejects_unknown_id() {
        let fetcher = FactoryRawTaxonomyFetcher::new().with_raw("a", raw("Alpha"));
        let err = fetcher.fetch("<ANY ID>").await.unwrap_err();
        assert_eq!(err, RepoError::InvalidTaxonomyId("<ANY ID>".to_string()));
    }

    #[tokio::test]
    async fn caching_fetcher_skips_failures() {
        let fetcher =
            CachingRawTaxonomyFetcher::new(FactoryRawTaxonomyFetcher::new().with_raw("a", raw("A")));

        assert!(fetcher.fetch("missing").await.is_err());
        assert_eq!(fetcher.cached_len().await, 0);

        let first = fetcher.fetch("a").await.expect("registered");
        let second = fetcher.fetch("a").await.expect("cached");
        assert_eq!(first, second);
        assert_eq!(fetcher.cached_len().await, 1);
    }
}
