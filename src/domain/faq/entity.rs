//! FAQ entity and related types

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::language::Language;
use super::validation::{validate_answer, validate_question};
use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::DomainError;

/// Opaque FAQ identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FaqId(String);

impl FaqId {
    /// Generates a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Parses an identifier received from a client
    pub fn parse(id: &str) -> Result<Self, DomainError> {
        let uuid = Uuid::parse_str(id)
            .map_err(|_| DomainError::validation(format!("Invalid FAQ id '{}'", id)))?;

        Ok(Self(uuid.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl StorageKey for FaqId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for FaqId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<FaqId> for String {
    fn from(id: FaqId) -> Self {
        id.0
    }
}

impl std::fmt::Display for FaqId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Translatable text field of an FAQ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaqField {
    Question,
    Answer,
}

impl FaqField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Question => "question",
            Self::Answer => "answer",
        }
    }

    /// Markup of the field's text: questions are plain, answers are HTML
    pub fn format(&self) -> &'static str {
        match self {
            Self::Question => "text",
            Self::Answer => "html",
        }
    }
}

/// Validated input for a new FAQ
#[derive(Debug, Clone, PartialEq)]
pub struct NewFaq {
    question: String,
    answer: String,
    default_language: Language,
}

impl NewFaq {
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        default_language: Language,
    ) -> Result<Self, DomainError> {
        let question = question.into();
        let answer = answer.into();

        validate_question(&question)?;
        validate_answer(&answer)?;

        Ok(Self {
            question,
            answer,
            default_language,
        })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn default_language(&self) -> Language {
        self.default_language
    }
}

/// Frequently asked question with Hindi and Bengali translations
///
/// `question` and `answer` hold the original text. Translated fields are
/// either unset or hold a non-empty translation; they are filled once after
/// creation and are not re-synced when the original changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    id: FaqId,
    question: String,
    answer: String,
    #[serde(default)]
    question_hi: Option<String>,
    #[serde(default)]
    question_bn: Option<String>,
    #[serde(default)]
    answer_hi: Option<String>,
    #[serde(default)]
    answer_bn: Option<String>,
    default_language: Language,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Faq {
    /// Creates an untranslated FAQ from validated input
    pub fn new(input: NewFaq) -> Self {
        let now = Utc::now();

        Self {
            id: FaqId::generate(),
            question: input.question,
            answer: input.answer,
            question_hi: None,
            question_bn: None,
            answer_hi: None,
            answer_bn: None,
            default_language: input.default_language,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    // Getters

    pub fn id(&self) -> &FaqId {
        &self.id
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn default_language(&self) -> Language {
        self.default_language
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Original (untranslated) text of a field
    pub fn original(&self, field: FaqField) -> &str {
        match field {
            FaqField::Question => &self.question,
            FaqField::Answer => &self.answer,
        }
    }

    /// Stored translation of a field; `None` for English or when unset
    pub fn translation(&self, field: FaqField, lang: Language) -> Option<&str> {
        let slot = match (field, lang) {
            (_, Language::En) => return None,
            (FaqField::Question, Language::Hi) => &self.question_hi,
            (FaqField::Question, Language::Bn) => &self.question_bn,
            (FaqField::Answer, Language::Hi) => &self.answer_hi,
            (FaqField::Answer, Language::Bn) => &self.answer_bn,
        };

        slot.as_deref().filter(|s| !s.is_empty())
    }

    /// Text of a field in the given language, falling back to the original
    /// when no translation is stored
    pub fn text_in(&self, field: FaqField, lang: Language) -> &str {
        self.translation(field, lang)
            .unwrap_or_else(|| self.original(field))
    }

    /// Resolves a field for a raw language code
    ///
    /// Without a code the FAQ's own default language is used. An unrecognized
    /// code resolves to the original field, not to the default language.
    pub fn text(&self, field: FaqField, lang: Option<&str>) -> &str {
        match lang {
            None => self.text_in(field, self.default_language),
            Some(code) => match Language::from_str(code) {
                Ok(lang) => self.text_in(field, lang),
                Err(_) => self.original(field),
            },
        }
    }

    /// Translations not yet filled, in question-then-answer order
    pub fn missing_translations(&self) -> Vec<(FaqField, Language)> {
        [FaqField::Question, FaqField::Answer]
            .into_iter()
            .flat_map(|field| {
                Language::TRANSLATION_TARGETS
                    .into_iter()
                    .map(move |lang| (field, lang))
            })
            .filter(|(field, lang)| self.translation(*field, *lang).is_none())
            .collect()
    }

    /// Stores a translation; blank text or English is ignored
    pub fn set_translation(
        &mut self,
        field: FaqField,
        lang: Language,
        text: impl Into<String>,
    ) -> bool {
        let text = text.into();

        if text.trim().is_empty() {
            return false;
        }

        let slot = match (field, lang) {
            (_, Language::En) => return false,
            (FaqField::Question, Language::Hi) => &mut self.question_hi,
            (FaqField::Question, Language::Bn) => &mut self.question_bn,
            (FaqField::Answer, Language::Hi) => &mut self.answer_hi,
            (FaqField::Answer, Language::Bn) => &mut self.answer_bn,
        };

        *slot = Some(text);
        self.touch();
        true
    }

    /// Clears a translation
    pub fn clear_translation(&mut self, field: FaqField, lang: Language) {
        let slot = match (field, lang) {
            (_, Language::En) => return,
            (FaqField::Question, Language::Hi) => &mut self.question_hi,
            (FaqField::Question, Language::Bn) => &mut self.question_bn,
            (FaqField::Answer, Language::Hi) => &mut self.answer_hi,
            (FaqField::Answer, Language::Bn) => &mut self.answer_bn,
        };

        *slot = None;
        self.touch();
    }

    // Setters

    pub fn set_question(&mut self, question: impl Into<String>) -> Result<(), DomainError> {
        let question = question.into();
        validate_question(&question)?;
        self.question = question;
        self.touch();
        Ok(())
    }

    pub fn set_answer(&mut self, answer: impl Into<String>) -> Result<(), DomainError> {
        let answer = answer.into();
        validate_answer(&answer)?;
        self.answer = answer;
        self.touch();
        Ok(())
    }

    pub fn set_default_language(&mut self, lang: Language) {
        self.default_language = lang;
        self.touch();
    }

    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for Faq {
    type Key = FaqId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}
