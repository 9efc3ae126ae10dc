use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::cache::CacheTtls;
use crate::domain::faq::Language;
use crate::domain::DomainError;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub cache: CacheSettings,
    pub languages: LanguagesConfig,
    pub storage: StorageSettings,
    pub translation: TranslationSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Cache backend and TTL policy
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// `in_memory` or `redis`
    pub backend: String,
    pub redis_url: Option<String>,
    pub key_prefix: Option<String>,
    /// TTL for list and single-record entries
    pub default_ttl_secs: u64,
    pub search_ttl_secs: u64,
    pub translation_ttl_secs: u64,
    pub max_capacity: u64,
    pub operation_timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LanguagesConfig {
    /// Codes accepted by the list endpoint and warmed by `warm_cache`
    pub supported: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// `in_memory` or `postgres`
    pub backend: String,
    pub database_url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranslationSettings {
    /// `disabled` or `http`
    pub provider: String,
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        let ttls = CacheTtls::default();

        Self {
            backend: "in_memory".to_string(),
            redis_url: None,
            key_prefix: None,
            default_ttl_secs: ttls.default.as_secs(),
            search_ttl_secs: ttls.search.as_secs(),
            translation_ttl_secs: ttls.translation.as_secs(),
            max_capacity: 10_000,
            operation_timeout_ms: 500,
        }
    }
}

impl Default for LanguagesConfig {
    fn default() -> Self {
        Self {
            supported: Language::ALL.iter().map(|l| l.code().to_string()).collect(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: "in_memory".to_string(),
            database_url: None,
            max_connections: 10,
        }
    }
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            provider: "disabled".to_string(),
            url: None,
            api_key: None,
            timeout_secs: 10,
        }
    }
}

impl CacheSettings {
    /// Entry lifetimes per key family; every TTL must be at least one second
    pub fn ttls(&self) -> Result<CacheTtls, DomainError> {
        for (name, secs) in [
            ("cache.default_ttl_secs", self.default_ttl_secs),
            ("cache.search_ttl_secs", self.search_ttl_secs),
            ("cache.translation_ttl_secs", self.translation_ttl_secs),
        ] {
            if secs == 0 {
                return Err(DomainError::configuration(format!(
                    "{} must be greater than zero",
                    name
                )));
            }
        }

        Ok(CacheTtls::default()
            .with_default(Duration::from_secs(self.default_ttl_secs))
            .with_search(Duration::from_secs(self.search_ttl_secs))
            .with_translation(Duration::from_secs(self.translation_ttl_secs)))
    }

    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }
}

impl LanguagesConfig {
    /// Parses the configured codes; unknown codes or an empty list are errors
    pub fn parse(&self) -> Result<Vec<Language>, DomainError> {
        if self.supported.is_empty() {
            return Err(DomainError::configuration(
                "languages.supported must list at least one language",
            ));
        }

        let mut languages = Vec::with_capacity(self.supported.len());

        for code in &self.supported {
            let lang = Language::from_str(code.trim()).map_err(|_| {
                DomainError::configuration(format!("Unsupported language in config: '{}'", code))
            })?;

            if !languages.contains(&lang) {
                languages.push(lang);
            }
        }

        Ok(languages)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("languages.supported")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
