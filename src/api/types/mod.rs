//! HTTP request/response types

pub mod error;
pub mod faq;
pub mod json;

pub use error::{ApiError, ApiErrorDetail, ApiErrorResponse, ApiErrorType};
pub use faq::{
    into_new_faqs, CreateFaqRequest, DeleteFaqResponse, FaqDetailResponse, FaqListResponse,
    LangQuery, SearchQuery, UpdateFaqRequest, WarmCacheResponse,
};
pub use json::Json;
