//! Language-resolved FAQ representation

use serde::{Deserialize, Serialize};

use super::entity::{Faq, FaqField, FaqId};
use super::language::Language;

/// An FAQ with its text resolved for one requested language
///
/// This is both the public JSON shape and the payload cached for list and
/// search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqView {
    pub id: FaqId,
    pub translated_question: String,
    pub translated_answer: String,
    pub default_language: Language,
}

impl FaqView {
    /// Renders `faq` for a raw language code, English when absent
    pub fn render(faq: &Faq, lang: Option<&str>) -> Self {
        let lang = lang.or(Some(Language::En.code()));

        Self {
            id: faq.id().clone(),
            translated_question: faq.text(FaqField::Question, lang).to_string(),
            translated_answer: faq.text(FaqField::Answer, lang).to_string(),
            default_language: faq.default_language(),
        }
    }

    pub fn render_all<'a>(faqs: impl IntoIterator<Item = &'a Faq>, lang: &str) -> Vec<Self> {
        faqs.into_iter()
            .map(|faq| Self::render(faq, Some(lang)))
            .collect()
    }
}
