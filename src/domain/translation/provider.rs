//! Translator trait definition

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::faq::{FaqField, Language};
use crate::domain::DomainError;

/// Translates FAQ text into a target language
///
/// Implementations fail with `DomainError::TranslationUnavailable` when the
/// provider errors or times out. Retry policy belongs to the caller.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translates `text`, which holds the given field's content
    async fn translate(
        &self,
        text: &str,
        field: FaqField,
        target: Language,
    ) -> Result<String, DomainError>;
}
