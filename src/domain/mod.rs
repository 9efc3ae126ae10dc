//! Domain layer - Core business logic and entities

pub mod cache;
pub mod error;
pub mod faq;
pub mod storage;
pub mod translation;

pub use cache::{Cache, CacheExt, CacheResult, CacheTtls, FaqCacheKey};
pub use error::DomainError;
pub use faq::{Faq, FaqField, FaqId, FaqView, Language, NewFaq};
pub use storage::{Storage, StorageEntity, StorageKey};
pub use translation::Translator;
