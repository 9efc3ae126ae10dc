//! Translation cache decorator

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::cache::{Cache, CacheExt, FaqCacheKey};
use crate::domain::faq::{FaqField, Language};
use crate::domain::translation::Translator;
use crate::domain::DomainError;

/// Serves repeated translations from the cache
///
/// Entries live under `translation:<sha256>:<lang>`, keyed by the field's
/// format as well as the text. The cache is advisory:
/// read and write failures are logged and the inner translator is used.
pub struct CachedTranslator {
    inner: Arc<dyn Translator>,
    cache: Arc<dyn Cache>,
    ttl: Duration,
}

impl fmt::Debug for CachedTranslator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedTranslator")
            .field("cache", &self.cache)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl CachedTranslator {
    pub fn new(inner: Arc<dyn Translator>, cache: Arc<dyn Cache>, ttl: Duration) -> Self {
        Self { inner, cache, ttl }
    }
}

#[async_trait]
impl Translator for CachedTranslator {
    async fn translate(
        &self,
        text: &str,
        field: FaqField,
        target: Language,
    ) -> Result<String, DomainError> {
        let key = FaqCacheKey::translation(text, field, target).to_string();

        match self.cache.get::<String>(&key).await {
            Ok(Some(cached)) => return Ok(cached),
            Ok(None) => {}
            Err(e) => warn!(key = %key, error = %e, "Translation cache read failed"),
        }

        let translated = self.inner.translate(text, field, target).await?;

        if let Err(e) = self.cache.set(&key, &translated, self.ttl).await {
            warn!(key = %key, error = %e, "Translation cache write failed");
        }

        Ok(translated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cache::MockCache;
    use crate::domain::translation::MockTranslator;
    use mockall::predicate::eq;

    const DAY: Duration = Duration::from_secs(86_400);

    #[tokio::test]
    async fn test_miss_calls_inner_and_stores() {
        let mut inner = MockTranslator::new();
        inner
            .expect_translate()
            .with(eq("Hello"), eq(FaqField::Question), eq(Language::Hi))
            .times(1)
            .returning(|_, _, _| Ok("नमस्ते".to_string()));

        let cache = Arc::new(MockCache::new());
        let translator = CachedTranslator::new(Arc::new(inner), cache.clone(), DAY);

        let result = translator
            .translate("Hello", FaqField::Question, Language::Hi)
            .await
            .unwrap();

        let key = FaqCacheKey::translation("Hello", FaqField::Question, Language::Hi).to_string();
        assert_eq!(result, "नमस्ते");
        assert_eq!(cache.ttl_of(&key), Some(DAY));
    }

    #[tokio::test]
    async fn test_hit_skips_inner() {
        let mut inner = MockTranslator::new();
        inner.expect_translate().times(0);

        let key = FaqCacheKey::translation("Hello", FaqField::Question, Language::Bn).to_string();
        let cache = Arc::new(MockCache::new().with_entry(&key, &"হ্যালো", DAY));
        let translator = CachedTranslator::new(Arc::new(inner), cache, DAY);

        let result = translator
            .translate("Hello", FaqField::Question, Language::Bn)
            .await
            .unwrap();

        assert_eq!(result, "হ্যালো");
    }

    #[tokio::test]
    async fn test_question_and_answer_cached_apart() {
        let mut inner = MockTranslator::new();
        inner
            .expect_translate()
            .times(2)
            .returning(|text, field, _| Ok(format!("{}:{}", field.format(), text)));

        let cache = Arc::new(MockCache::new());
        let translator = CachedTranslator::new(Arc::new(inner), cache.clone(), DAY);

        let question = translator
            .translate("Refunds", FaqField::Question, Language::Hi)
            .await
            .unwrap();
        let answer = translator
            .translate("Refunds", FaqField::Answer, Language::Hi)
            .await
            .unwrap();

        assert_eq!(question, "text:Refunds");
        assert_eq!(answer, "html:Refunds");
        assert_eq!(cache.size().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_cache_down_still_translates() {
        let mut inner = MockTranslator::new();
        inner
            .expect_translate()
            .times(1)
            .returning(|_, _, _| Ok("নমস্কার".to_string()));

        let cache = Arc::new(MockCache::new().with_error("connection refused"));
        let translator = CachedTranslator::new(Arc::new(inner), cache, DAY);

        let result = translator
            .translate("Hello", FaqField::Question, Language::Bn)
            .await
            .unwrap();

        assert_eq!(result, "নমস্কার");
    }

    #[tokio::test]
    async fn test_inner_failure_is_not_cached() {
        let mut inner = MockTranslator::new();
        inner
            .expect_translate()
            .returning(|_, _, _| Err(DomainError::translation("provider down")));

        let cache = Arc::new(MockCache::new());
        let translator = CachedTranslator::new(Arc::new(inner), cache.clone(), DAY);

        let result = translator
            .translate("Hello", FaqField::Question, Language::Hi)
            .await;

        assert!(result.is_err());
        assert_eq!(cache.size().await.unwrap(), 0);
    }
}
