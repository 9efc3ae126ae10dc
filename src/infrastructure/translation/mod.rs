//! Translation infrastructure - Provider clients and decorators

mod cached;
mod disabled;
mod factory;
mod http;

pub use cached::CachedTranslator;
pub use disabled::DisabledTranslator;
pub use factory::{TranslationProviderType, TranslatorConfig, TranslatorFactory};
pub use http::{HttpTranslator, HttpTranslatorConfig};
