//! Translator selection from configuration

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::domain::cache::Cache;
use crate::domain::translation::Translator;
use crate::domain::DomainError;

use super::cached::CachedTranslator;
use super::disabled::DisabledTranslator;
use super::http::{HttpTranslator, HttpTranslatorConfig};

/// Supported translation providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TranslationProviderType {
    #[default]
    Disabled,
    /// LibreTranslate-compatible HTTP API
    Http,
}

impl std::fmt::Display for TranslationProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disabled => write!(f, "disabled"),
            Self::Http => write!(f, "http"),
        }
    }
}

impl std::str::FromStr for TranslationProviderType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "disabled" | "none" | "" => Ok(Self::Disabled),
            "http" | "libretranslate" => Ok(Self::Http),
            _ => Err(DomainError::configuration(format!(
                "Unknown translation provider: {}. Valid providers: disabled, http",
                s
            ))),
        }
    }
}

/// Settings for building the translator chain
#[derive(Debug, Clone, Default)]
pub struct TranslatorConfig {
    pub provider: TranslationProviderType,
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub timeout: Option<Duration>,
}

pub struct TranslatorFactory;

impl TranslatorFactory {
    /// Builds the configured translator; HTTP providers are wrapped with the
    /// translation cache
    pub fn create(
        config: &TranslatorConfig,
        cache: Arc<dyn Cache>,
        translation_ttl: Duration,
    ) -> Result<Arc<dyn Translator>, DomainError> {
        match config.provider {
            TranslationProviderType::Disabled => {
                warn!("Translation provider disabled; new FAQs will not be translated");
                Ok(Arc::new(DisabledTranslator))
            }
            TranslationProviderType::Http => {
                let url = config.url.clone().ok_or_else(|| {
                    DomainError::configuration("translation.url is required for the http provider")
                })?;

                let mut http_config = HttpTranslatorConfig::new(&url);

                if let Some(api_key) = &config.api_key {
                    http_config = http_config.with_api_key(api_key.clone());
                }

                if let Some(timeout) = config.timeout {
                    http_config = http_config.with_timeout(timeout);
                }

                info!(url = %url, "Using HTTP translation provider");

                let http = Arc::new(HttpTranslator::new(http_config)?);
                Ok(Arc::new(CachedTranslator::new(http, cache, translation_ttl)))
            }
        }
    }
}
