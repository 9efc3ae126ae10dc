//! FAQ input validation

use std::fmt;

use crate::domain::DomainError;

/// Maximum length of a question, in characters
pub const MAX_QUESTION_LENGTH: usize = 1_000;

/// Maximum length of an answer, in characters (rich text markup included)
pub const MAX_ANSWER_LENGTH: usize = 20_000;

/// FAQ validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum FaqValidationError {
    /// Question is empty or whitespace
    EmptyQuestion,
    /// Question exceeds maximum length
    QuestionTooLong { length: usize, max: usize },
    /// Answer is empty or whitespace
    EmptyAnswer,
    /// Answer exceeds maximum length
    AnswerTooLong { length: usize, max: usize },
}

impl fmt::Display for FaqValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyQuestion => write!(f, "Question cannot be empty"),
            Self::QuestionTooLong { length, max } => {
                write!(f, "Question too long: {} characters (max {})", length, max)
            }
            Self::EmptyAnswer => write!(f, "Answer cannot be empty"),
            Self::AnswerTooLong { length, max } => {
                write!(f, "Answer too long: {} characters (max {})", length, max)
            }
        }
    }
}

impl std::error::Error for FaqValidationError {}

impl From<FaqValidationError> for DomainError {
    fn from(err: FaqValidationError) -> Self {
        DomainError::validation(err.to_string())
    }
}

pub fn validate_question(question: &str) -> Result<(), FaqValidationError> {
    if question.trim().is_empty() {
        return Err(FaqValidationError::EmptyQuestion);
    }

    let length = question.chars().count();

    if length > MAX_QUESTION_LENGTH {
        return Err(FaqValidationError::QuestionTooLong {
            length,
            max: MAX_QUESTION_LENGTH,
        });
    }

    Ok(())
}

pub fn validate_answer(answer: &str) -> Result<(), FaqValidationError> {
    if answer.trim().is_empty() {
        return Err(FaqValidationError::EmptyAnswer);
    }

    let length = answer.chars().count();

    if length > MAX_ANSWER_LENGTH {
        return Err(FaqValidationError::AnswerTooLong {
            length,
            max: MAX_ANSWER_LENGTH,
        });
    }

    Ok(())
}
