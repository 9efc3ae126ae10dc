//! FAQ domain - Multilingual question/answer entries

mod entity;
mod language;
mod validation;
mod view;

pub use entity::{Faq, FaqField, FaqId, NewFaq};
pub use language::Language;
pub use validation::{
    validate_answer, validate_question, FaqValidationError, MAX_ANSWER_LENGTH,
    MAX_QUESTION_LENGTH,
};
pub use view::FaqView;
