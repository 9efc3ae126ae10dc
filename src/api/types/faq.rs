//! Request and response bodies for the FAQ endpoints

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::faq::{FaqView, Language, NewFaq};
use crate::domain::DomainError;
use crate::infrastructure::services::UpdateFaq;

/// Language code used when a request does not name one
pub const DEFAULT_LANG: &str = "en";

/// Body for creating an FAQ, alone or inside a bulk request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFaqRequest {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub default_language: Option<String>,
}

impl CreateFaqRequest {
    pub fn into_new_faq(self) -> Result<NewFaq, DomainError> {
        let default_language = parse_language(self.default_language.as_deref())?;
        NewFaq::new(self.question, self.answer, default_language)
    }
}

/// Validates a whole batch, naming the first bad entry
///
/// An empty batch is valid and yields no entries.
pub fn into_new_faqs(requests: Vec<CreateFaqRequest>) -> Result<Vec<NewFaq>, DomainError> {
    requests
        .into_iter()
        .enumerate()
        .map(|(index, request)| {
            request.into_new_faq().map_err(|e| match e {
                DomainError::Validation { message } => {
                    DomainError::validation(format!("Entry {}: {}", index, message))
                }
                other => other,
            })
        })
        .collect()
}

/// Partial update body; omitted fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFaqRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub question_hi: Option<String>,
    pub question_bn: Option<String>,
    pub answer_hi: Option<String>,
    pub answer_bn: Option<String>,
    pub default_language: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateFaqRequest {
    pub fn into_update(self) -> Result<UpdateFaq, DomainError> {
        let default_language = match self.default_language.as_deref() {
            Some(code) => Some(parse_language(Some(code))?),
            None => None,
        };

        Ok(UpdateFaq {
            question: self.question,
            answer: self.answer,
            question_hi: self.question_hi,
            question_bn: self.question_bn,
            answer_hi: self.answer_hi,
            answer_bn: self.answer_bn,
            default_language,
            is_active: self.is_active,
        })
    }
}

fn parse_language(code: Option<&str>) -> Result<Language, DomainError> {
    match code {
        None => Ok(Language::default()),
        Some(code) => Language::from_str(code),
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LangQuery {
    pub lang: Option<String>,
}

impl LangQuery {
    pub fn lang(&self) -> &str {
        self.lang.as_deref().unwrap_or(DEFAULT_LANG)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub lang: Option<String>,
}

impl SearchQuery {
    pub fn query(&self) -> &str {
        self.q.as_deref().unwrap_or_default()
    }

    pub fn lang(&self) -> &str {
        self.lang.as_deref().unwrap_or(DEFAULT_LANG)
    }
}

/// List and search response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqListResponse {
    pub data: Vec<FaqView>,
    pub cache_hit: bool,
}

/// Single FAQ read through the per-item cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqDetailResponse {
    pub data: FaqView,
    pub cache_hit: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteFaqResponse {
    pub deleted: bool,
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarmCacheResponse {
    pub status: String,
    pub languages: Vec<Language>,
}
