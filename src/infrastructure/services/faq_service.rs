//! FAQ service - Lifecycle of FAQ records and their translations

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::faq::{Faq, FaqField, FaqId, Language, NewFaq};
use crate::domain::storage::Storage;
use crate::domain::translation::Translator;
use crate::domain::DomainError;

/// Partial update of an FAQ
///
/// `None` leaves a field untouched. For translated fields an empty string
/// clears the stored translation. Updates never trigger translation.
#[derive(Debug, Clone, Default)]
pub struct UpdateFaq {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub question_hi: Option<String>,
    pub question_bn: Option<String>,
    pub answer_hi: Option<String>,
    pub answer_bn: Option<String>,
    pub default_language: Option<Language>,
    pub is_active: Option<bool>,
}

impl UpdateFaq {
    fn translations(&self) -> [(FaqField, Language, Option<&String>); 4] {
        [
            (FaqField::Question, Language::Hi, self.question_hi.as_ref()),
            (FaqField::Question, Language::Bn, self.question_bn.as_ref()),
            (FaqField::Answer, Language::Hi, self.answer_hi.as_ref()),
            (FaqField::Answer, Language::Bn, self.answer_bn.as_ref()),
        ]
    }
}

/// Creates, reads and edits FAQs against the content store
pub struct FaqService {
    storage: Arc<dyn Storage<Faq>>,
    translator: Arc<dyn Translator>,
}

impl fmt::Debug for FaqService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FaqService")
            .field("storage", &self.storage)
            .finish()
    }
}

impl FaqService {
    pub fn new(storage: Arc<dyn Storage<Faq>>, translator: Arc<dyn Translator>) -> Self {
        Self {
            storage,
            translator,
        }
    }

    /// Creates an FAQ: persist, translate, persist again
    ///
    /// A translation failure leaves the record stored with whatever
    /// translations were filled before the failure.
    pub async fn create(&self, input: NewFaq) -> Result<Faq, DomainError> {
        let mut faq = self.persist_new(input).await?;

        if self.apply_translations(&mut faq).await > 0 {
            faq = self.storage.update(faq).await?;
        }

        Ok(faq)
    }

    /// First phase of creation: stores the untranslated record
    pub async fn persist_new(&self, input: NewFaq) -> Result<Faq, DomainError> {
        let faq = self.storage.create(Faq::new(input)).await?;
        debug!(faq_id = %faq.id(), "Persisted new FAQ");
        Ok(faq)
    }

    /// Second phase of creation: fills every empty translated field
    ///
    /// Idempotent: fields that already hold a translation are left alone and
    /// the translator is not called for them. Stops at the first failure.
    /// Returns how many fields were filled; the caller persists the result.
    pub async fn apply_translations(&self, faq: &mut Faq) -> usize {
        let mut filled = 0;

        for (field, lang) in faq.missing_translations() {
            let source = faq.original(field).to_string();

            match self.translator.translate(&source, field, lang).await {
                Ok(text) => {
                    if faq.set_translation(field, lang, text) {
                        filled += 1;
                    }
                }
                Err(e) => {
                    warn!(
                        faq_id = %faq.id(),
                        field = field.as_str(),
                        lang = %lang,
                        error = %e,
                        "Translation failed, keeping FAQ partially translated"
                    );
                    break;
                }
            }
        }

        if filled > 0 {
            info!(faq_id = %faq.id(), filled, "Applied translations");
        }

        filled
    }

    pub async fn get(&self, id: &FaqId) -> Result<Option<Faq>, DomainError> {
        self.storage.get(id).await
    }

    pub async fn get_required(&self, id: &FaqId) -> Result<Faq, DomainError> {
        self.get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("FAQ '{}' not found", id)))
    }

    /// All FAQs, newest first
    pub async fn list(&self) -> Result<Vec<Faq>, DomainError> {
        let mut faqs = self.storage.list().await?;
        faqs.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(faqs)
    }

    /// FAQs whose original question contains `query`, ignoring case
    pub async fn search(&self, query: &str) -> Result<Vec<Faq>, DomainError> {
        let needle = query.to_lowercase();

        let matches = self
            .list()
            .await?
            .into_iter()
            .filter(|faq| faq.question().to_lowercase().contains(&needle))
            .collect();

        Ok(matches)
    }

    pub async fn update(&self, id: &FaqId, request: UpdateFaq) -> Result<Faq, DomainError> {
        let mut faq = self.get_required(id).await?;

        if let Some(question) = &request.question {
            faq.set_question(question.as_str())?;
        }

        if let Some(answer) = &request.answer {
            faq.set_answer(answer.as_str())?;
        }

        for (field, lang, value) in request.translations() {
            match value {
                Some(text) if text.trim().is_empty() => faq.clear_translation(field, lang),
                Some(text) => {
                    faq.set_translation(field, lang, text.as_str());
                }
                None => {}
            }
        }

        if let Some(lang) = request.default_language {
            faq.set_default_language(lang);
        }

        if let Some(active) = request.is_active {
            faq.set_active(active);
        }

        self.storage.update(faq).await
    }

    pub async fn deactivate(&self, id: &FaqId) -> Result<Faq, DomainError> {
        let mut faq = self.get_required(id).await?;
        faq.set_active(false);
        self.storage.update(faq).await
    }

    pub async fn delete(&self, id: &FaqId) -> Result<bool, DomainError> {
        self.storage.delete(id).await
    }

    /// Number of stored FAQs; doubles as a store reachability check
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.storage.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::storage::mock::MockStorage;
    use crate::domain::translation::MockTranslator;
    use crate::infrastructure::storage::InMemoryStorage;

    fn echo_translator() -> MockTranslator {
        let mut translator = MockTranslator::new();
        translator
            .expect_translate()
            .returning(|text, _, lang| Ok(format!("{} [{}]", text, lang)));
        translator
    }

    fn service(translator: MockTranslator) -> (FaqService, Arc<InMemoryStorage<Faq>>) {
        let storage = Arc::new(InMemoryStorage::<Faq>::new());
        let service = FaqService::new(storage.clone(), Arc::new(translator));
        (service, storage)
    }

    fn new_faq(question: &str) -> NewFaq {
        NewFaq::new(question, "A", Language::En).unwrap()
    }

    #[tokio::test]
    async fn test_create_fills_all_translations() {
        let (service, storage) = service(echo_translator());

        let faq = service.create(new_faq("Q")).await.unwrap();

        assert_eq!(faq.translation(FaqField::Question, Language::Hi), Some("Q [hi]"));
        assert_eq!(faq.translation(FaqField::Question, Language::Bn), Some("Q [bn]"));
        assert_eq!(faq.translation(FaqField::Answer, Language::Hi), Some("A [hi]"));
        assert_eq!(faq.translation(FaqField::Answer, Language::Bn), Some("A [bn]"));

        let stored = storage.get(faq.id()).await.unwrap().unwrap();
        assert_eq!(stored, faq);
    }

    #[tokio::test]
    async fn test_apply_translations_is_idempotent() {
        let (service, _) = service(echo_translator());
        let mut faq = service.create(new_faq("Q")).await.unwrap();
        let before = faq.clone();

        let mut silent = MockTranslator::new();
        silent.expect_translate().times(0);
        let (second, _) = self::service(silent);

        assert_eq!(second.apply_translations(&mut faq).await, 0);
        assert_eq!(faq, before);
    }

    #[tokio::test]
    async fn test_translation_failure_keeps_record() {
        let mut translator = MockTranslator::new();
        translator
            .expect_translate()
            .times(1)
            .returning(|_, _, _| Err(DomainError::translation("timeout")));
        let (service, storage) = service(translator);

        let faq = service.create(new_faq("Q")).await.unwrap();

        assert_eq!(faq.missing_translations().len(), 4);
        assert!(storage.exists(faq.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_partial_translation_is_persisted() {
        let mut translator = MockTranslator::new();
        translator
            .expect_translate()
            .returning(|text, field, lang| match (field, lang) {
                (FaqField::Question, Language::Hi) => Ok(format!("{} [hi]", text)),
                _ => Err(DomainError::translation("quota exceeded")),
            });
        let (service, storage) = service(translator);

        let faq = service.create(new_faq("Q")).await.unwrap();
        let stored = storage.get(faq.id()).await.unwrap().unwrap();

        assert_eq!(stored.translation(FaqField::Question, Language::Hi), Some("Q [hi]"));
        assert_eq!(stored.translation(FaqField::Question, Language::Bn), None);
        assert_eq!(stored.translation(FaqField::Answer, Language::Hi), None);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let (service, _) = service(echo_translator());

        let first = service.create(new_faq("First?")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = service.create(new_faq("Second?")).await.unwrap();

        let ids: Vec<_> = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|faq| faq.id().clone())
            .collect();

        assert_eq!(ids, vec![second.id().clone(), first.id().clone()]);
    }

    #[tokio::test]
    async fn test_search_matches_question_case_insensitively() {
        let (service, _) = service(echo_translator());

        service.create(new_faq("How do I reset my Password?")).await.unwrap();
        service
            .create(NewFaq::new("Billing cycle?", "password is not here", Language::En).unwrap())
            .await
            .unwrap();

        let results = service.search("PASSWORD").await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].question(), "How do I reset my Password?");
    }

    #[tokio::test]
    async fn test_update_does_not_retranslate() {
        let mut translator = MockTranslator::new();
        translator
            .expect_translate()
            .times(4)
            .returning(|text, _, lang| Ok(format!("{} [{}]", text, lang)));
        let (service, _) = service(translator);

        let faq = service.create(new_faq("Q")).await.unwrap();

        let updated = service
            .update(
                faq.id(),
                UpdateFaq {
                    question: Some("New question".to_string()),
                    answer_bn: Some(String::new()),
                    default_language: Some(Language::Hi),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.question(), "New question");
        assert_eq!(updated.translation(FaqField::Question, Language::Hi), Some("Q [hi]"));
        assert_eq!(updated.translation(FaqField::Answer, Language::Bn), None);
        assert_eq!(updated.default_language(), Language::Hi);
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_question() {
        let (service, _) = service(echo_translator());
        let faq = service.create(new_faq("Q")).await.unwrap();

        let result = service
            .update(
                faq.id(),
                UpdateFaq {
                    question: Some("   ".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_deactivate_and_delete() {
        let (service, _) = service(echo_translator());
        let faq = service.create(new_faq("Q")).await.unwrap();

        let deactivated = service.deactivate(faq.id()).await.unwrap();
        assert!(!deactivated.is_active());

        assert!(service.delete(faq.id()).await.unwrap());
        assert!(service.get(faq.id()).await.unwrap().is_none());
        assert!(matches!(
            service.deactivate(faq.id()).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_storage_error_propagates() {
        let storage: Arc<MockStorage<Faq>> = Arc::new(MockStorage::new().with_error("db down"));
        let service = FaqService::new(storage, Arc::new(echo_translator()));

        let result = service.list().await;
        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }
}
