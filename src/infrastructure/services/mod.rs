//! Infrastructure services

mod faq_cache_service;
mod faq_service;

pub use faq_cache_service::{CachedRead, FaqCacheService};
pub use faq_service::{FaqService, UpdateFaq};
