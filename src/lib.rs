//! Multilingual FAQ service
//!
//! Stores question/answer pairs, translates them once into Hindi and Bengali
//! when they are created, and serves language-resolved lists and searches
//! through a read-through cache.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::AppConfig;

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::api::state::AppState;
use crate::config::{CacheSettings, StorageSettings, TranslationSettings};
use crate::domain::faq::Faq;
use crate::infrastructure::{
    cache::{CacheConfig, CacheFactory, CacheType},
    services::{FaqCacheService, FaqService},
    storage::{PostgresConfig, StorageConfig, StorageFactory, StorageType},
    translation::{TranslationProviderType, TranslatorConfig, TranslatorFactory},
};
use tracing::info;

/// Table backing the FAQ store when PostgreSQL is selected
const FAQ_TABLE: &str = "faqs";

/// Create the application state with the default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
///
/// An unreachable Redis falls back to the in-memory cache so the server can
/// still answer from the store.
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    build_app_state(config, CacheMode::Fallback).await
}

/// Create the application state for a one-shot cache warmup
///
/// The configured cache backend must be reachable; there is no fallback.
pub async fn create_warmup_state(config: &AppConfig) -> anyhow::Result<AppState> {
    build_app_state(config, CacheMode::Strict).await
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CacheMode {
    Fallback,
    Strict,
}

async fn build_app_state(config: &AppConfig, mode: CacheMode) -> anyhow::Result<AppState> {
    let languages = config.languages.parse()?;
    let ttls = config.cache.ttls()?;

    let storage_config = storage_config(&config.storage)?;
    info!(backend = ?storage_config.storage_type(), "Initializing FAQ store");
    let storage = StorageFactory::create::<Faq>(&storage_config, FAQ_TABLE).await?;

    let cache_cfg = cache_config(&config.cache)?;
    let factory = CacheFactory::new();
    let cache = match mode {
        CacheMode::Fallback => factory.create_or_fallback(&cache_cfg).await?,
        CacheMode::Strict => factory.create(&cache_cfg).await?,
    };

    let translator = TranslatorFactory::create(
        &translator_config(&config.translation)?,
        cache.clone(),
        ttls.translation,
    )?;

    let faqs = Arc::new(FaqService::new(storage, translator));
    let service = FaqCacheService::new(faqs, cache, ttls, languages);

    info!(
        languages = ?service.supported_languages(),
        "Application state initialized"
    );

    Ok(AppState::new(Arc::new(service)))
}

fn storage_config(settings: &StorageSettings) -> anyhow::Result<StorageConfig> {
    match StorageType::from_str(&settings.backend)? {
        StorageType::InMemory => Ok(StorageConfig::in_memory()),
        StorageType::Postgres => {
            let url = settings
                .database_url
                .clone()
                .or_else(|| std::env::var("DATABASE_URL").ok())
                .ok_or_else(|| {
                    anyhow::anyhow!("storage.database_url or DATABASE_URL is required for postgres")
                })?;

            Ok(StorageConfig::postgres(
                PostgresConfig::new(url).with_max_connections(settings.max_connections),
            ))
        }
    }
}

fn cache_config(settings: &CacheSettings) -> anyhow::Result<CacheConfig> {
    let mut config = match CacheType::from_str(&settings.backend)? {
        CacheType::InMemory => CacheConfig::in_memory(),
        CacheType::Redis => {
            let url = settings
                .redis_url
                .clone()
                .ok_or_else(|| anyhow::anyhow!("cache.redis_url is required for redis"))?;
            CacheConfig::redis(url)
        }
    };

    if let Some(prefix) = &settings.key_prefix {
        config = config.with_key_prefix(prefix.clone());
    }

    Ok(config
        .with_ttls(settings.ttls()?)
        .with_max_capacity(settings.max_capacity)
        .with_operation_timeout(settings.operation_timeout()))
}

fn translator_config(settings: &TranslationSettings) -> anyhow::Result<TranslatorConfig> {
    Ok(TranslatorConfig {
        provider: TranslationProviderType::from_str(&settings.provider)?,
        url: settings.url.clone(),
        api_key: settings.api_key.clone(),
        timeout: Some(Duration::from_secs(settings.timeout_secs)),
    })
}
