use async_trait::async_trait;

use crate::domain::faq::{FaqField, Language};
use crate::domain::translation::Translator;
use crate::domain::DomainError;

/// Translator used when no provider is configured; every call fails
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledTranslator;

#[async_trait]
impl Translator for DisabledTranslator {
    async fn translate(
        &self,
        _text: &str,
        _field: FaqField,
        _target: Language,
    ) -> Result<String, DomainError> {
        Err(DomainError::translation("No translation provider configured"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_always_unavailable() {
        let result = DisabledTranslator
            .translate("Hello", FaqField::Answer, Language::Hi)
            .await;

        assert!(matches!(
            result,
            Err(DomainError::TranslationUnavailable { .. })
        ));
    }
}
