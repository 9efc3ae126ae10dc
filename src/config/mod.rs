//! Layered application configuration

mod app_config;

pub use app_config::{
    AppConfig, CacheSettings, LanguagesConfig, LogFormat, LoggingConfig, ServerConfig,
    StorageSettings, TranslationSettings,
};
