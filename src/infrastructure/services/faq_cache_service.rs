//! FAQ cache service - Read-through caching around the FAQ service

use std::str::FromStr;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::domain::cache::{Cache, CacheExt, CacheResult, CacheTtls, FaqCacheKey, LIST_KEY_PATTERN};
use crate::domain::faq::{Faq, FaqId, FaqView, Language, NewFaq};
use crate::domain::DomainError;

use super::faq_service::{FaqService, UpdateFaq};

/// Payload served by a cached read, flagged with where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct CachedRead<T> {
    pub data: T,
    pub cache_hit: bool,
}

impl<T> CachedRead<T> {
    fn hit(data: T) -> Self {
        Self {
            data,
            cache_hit: true,
        }
    }

    fn miss(data: T) -> Self {
        Self {
            data,
            cache_hit: false,
        }
    }
}

/// Composes the FAQ service with the cache for every request path
///
/// The cache never decides correctness: a failing backend turns reads into
/// store reads and writes into no-ops. Only `warm_cache` reports cache
/// failures, since populating the cache is its whole job.
#[derive(Debug)]
pub struct FaqCacheService {
    faqs: Arc<FaqService>,
    cache: Arc<dyn Cache>,
    ttls: CacheTtls,
    supported_languages: Vec<Language>,
}

impl FaqCacheService {
    pub fn new(
        faqs: Arc<FaqService>,
        cache: Arc<dyn Cache>,
        ttls: CacheTtls,
        supported_languages: Vec<Language>,
    ) -> Self {
        Self {
            faqs,
            cache,
            ttls,
            supported_languages,
        }
    }

    pub fn supported_languages(&self) -> &[Language] {
        &self.supported_languages
    }

    /// Listing of every FAQ rendered in `lang`
    ///
    /// Unsupported codes fail before the cache or the store is touched.
    pub async fn list(&self, lang: &str) -> Result<CachedRead<Vec<FaqView>>, DomainError> {
        let lang = self.supported(lang)?;
        let key = FaqCacheKey::list(lang);

        if let CacheResult::Hit(data) = self.lookup(&key).await {
            debug!(key = %key, "Serving FAQ list from cache");
            return Ok(CachedRead::hit(data));
        }

        let data = self.render_list(lang).await?;
        self.store(&key, &data).await;

        Ok(CachedRead::miss(data))
    }

    /// FAQs whose question contains `query`, rendered in `lang`
    ///
    /// `lang` is not validated; unknown codes render the original text.
    pub async fn search(
        &self,
        query: &str,
        lang: &str,
    ) -> Result<CachedRead<Vec<FaqView>>, DomainError> {
        if query.is_empty() {
            return Err(DomainError::MissingQuery);
        }

        let key = FaqCacheKey::search(lang, query);

        if let CacheResult::Hit(data) = self.lookup(&key).await {
            debug!(key = %key, "Serving FAQ search from cache");
            return Ok(CachedRead::hit(data));
        }

        let matches = self.faqs.search(query).await?;
        let data = FaqView::render_all(&matches, lang);
        self.store(&key, &data).await;

        Ok(CachedRead::miss(data))
    }

    /// Creates every entry, then drops all list caches and caches each record
    ///
    /// Entries arrive already validated, so a bad batch is rejected before
    /// anything is persisted. A store failure stops the batch; the rows
    /// written before it stay, and list caches are still dropped so they
    /// cannot hide them.
    pub async fn bulk_create(&self, entries: Vec<NewFaq>) -> Result<Vec<Faq>, DomainError> {
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let total = entries.len();
        let mut created = Vec::with_capacity(total);
        let mut failure = None;

        for entry in entries {
            match self.faqs.create(entry).await {
                Ok(faq) => created.push(faq),
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }

        self.invalidate_lists().await;

        for faq in &created {
            self.store(&FaqCacheKey::item(faq.id()), faq).await;
        }

        if let Some(e) = failure {
            error!(
                created = created.len(),
                total,
                error = %e,
                "Bulk create stopped by store failure"
            );
            return Err(e);
        }

        info!(count = created.len(), "Bulk created FAQs");
        Ok(created)
    }

    /// Recomputes and stores the list cache for every supported language
    ///
    /// Any failure, from the store or the cache, fails the whole operation.
    pub async fn warm_cache(&self) -> Result<Vec<Language>, DomainError> {
        for &lang in &self.supported_languages {
            let key = FaqCacheKey::list(lang);

            let data = self.render_list(lang).await.map_err(|e| {
                error!(lang = %lang, error = %e, "Cache warmup failed loading FAQs");
                DomainError::cache_warm(format!("loading FAQs for '{}': {}", lang, e))
            })?;

            self.cache
                .set(&key.to_string(), &data, key.ttl(&self.ttls))
                .await
                .map_err(|e| {
                    error!(key = %key, error = %e, "Cache warmup failed writing entry");
                    DomainError::cache_warm(format!("writing '{}': {}", key, e))
                })?;
        }

        info!(languages = self.supported_languages.len(), "Cache warmed");
        Ok(self.supported_languages.clone())
    }

    /// Single FAQ record, cached under `faq:<id>`
    pub async fn retrieve(&self, id: &FaqId) -> Result<CachedRead<Faq>, DomainError> {
        let key = FaqCacheKey::item(id);

        if let CacheResult::Hit(faq) = self.lookup(&key).await {
            return Ok(CachedRead::hit(faq));
        }

        let faq = self.faqs.get_required(id).await?;
        self.store(&key, &faq).await;

        Ok(CachedRead::miss(faq))
    }

    /// Creates one FAQ and caches its record; list caches are left alone
    pub async fn create(&self, entry: NewFaq) -> Result<Faq, DomainError> {
        let faq = self.faqs.create(entry).await?;
        self.store(&FaqCacheKey::item(faq.id()), &faq).await;
        Ok(faq)
    }

    pub async fn update(&self, id: &FaqId, request: UpdateFaq) -> Result<Faq, DomainError> {
        let faq = self.faqs.update(id, request).await?;
        self.invalidate_item(id).await;
        Ok(faq)
    }

    pub async fn deactivate(&self, id: &FaqId) -> Result<Faq, DomainError> {
        let faq = self.faqs.deactivate(id).await?;
        self.invalidate_item(id).await;
        Ok(faq)
    }

    pub async fn delete(&self, id: &FaqId) -> Result<(), DomainError> {
        let deleted = self.faqs.delete(id).await?;
        self.invalidate_item(id).await;

        if deleted {
            Ok(())
        } else {
            Err(DomainError::not_found(format!("FAQ '{}' not found", id)))
        }
    }

    /// Whether the cache backend answers
    pub async fn cache_health(&self) -> bool {
        match self.cache.ping().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Cache health check failed");
                false
            }
        }
    }

    /// Whether the content store answers
    pub async fn store_health(&self) -> Result<usize, DomainError> {
        self.faqs.count().await
    }

    fn supported(&self, code: &str) -> Result<Language, DomainError> {
        Language::from_str(code)
            .ok()
            .filter(|lang| self.supported_languages.contains(lang))
            .ok_or_else(|| {
                let codes: Vec<&str> = self.supported_languages.iter().map(|l| l.code()).collect();
                DomainError::invalid_language(code, codes.as_slice())
            })
    }

    async fn render_list(&self, lang: Language) -> Result<Vec<FaqView>, DomainError> {
        let faqs = self.faqs.list().await?;
        Ok(FaqView::render_all(&faqs, lang.code()))
    }

    async fn lookup<T: DeserializeOwned + Send>(&self, key: &FaqCacheKey) -> CacheResult<T> {
        let key = key.to_string();

        match self.cache.get_raw(&key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => CacheResult::Hit(value),
                Err(e) => {
                    warn!(key = %key, error = %e, "Discarding undecodable cache entry");
                    CacheResult::Miss
                }
            },
            Ok(None) => CacheResult::Miss,
            Err(e) => {
                warn!(key = %key, error = %e, "Cache read failed, falling back to store");
                CacheResult::Unavailable
            }
        }
    }

    async fn store<T: Serialize + Send + Sync>(&self, key: &FaqCacheKey, value: &T) {
        let ttl = key.ttl(&self.ttls);
        let key = key.to_string();

        if let Err(e) = self.cache.set(&key, value, ttl).await {
            warn!(key = %key, error = %e, "Cache write failed");
        }
    }

    async fn invalidate_lists(&self) {
        match self.cache.delete_pattern(LIST_KEY_PATTERN).await {
            Ok(removed) => debug!(removed, "Invalidated FAQ list caches"),
            Err(e) => warn!(
                pattern = LIST_KEY_PATTERN,
                error = %e,
                "Failed to invalidate FAQ list caches"
            ),
        }
    }

    async fn invalidate_item(&self, id: &FaqId) {
        let key = FaqCacheKey::item(id).to_string();

        if let Err(e) = self.cache.delete(&key).await {
            warn!(key = %key, error = %e, "Failed to invalidate FAQ cache entry");
        }
    }
}
