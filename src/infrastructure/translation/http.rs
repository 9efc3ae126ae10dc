//! LibreTranslate-compatible HTTP translator

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::faq::{FaqField, Language};
use crate::domain::translation::Translator;
use crate::domain::DomainError;

/// Configuration for the HTTP translator
#[derive(Debug, Clone)]
pub struct HttpTranslatorConfig {
    /// Base URL of the provider; `/translate` is appended
    pub base_url: String,
    /// Sent as `api_key` in the request body when set
    pub api_key: Option<String>,
    /// Upper bound on a single translation request
    pub timeout: Duration,
}

impl HttpTranslatorConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'static str,
    target: &'static str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateResponse {
    translated_text: String,
}

/// Translator calling a remote translation provider over HTTP
#[derive(Debug, Clone)]
pub struct HttpTranslator {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpTranslator {
    pub fn new(config: HttpTranslatorConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DomainError::configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            endpoint: format!("{}/translate", config.base_url.trim_end_matches('/')),
            api_key: config.api_key,
        })
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(
        &self,
        text: &str,
        field: FaqField,
        target: Language,
    ) -> Result<String, DomainError> {
        let body = TranslateRequest {
            q: text,
            source: "auto",
            target: target.code(),
            format: field.format(),
            api_key: self.api_key.as_deref(),
        };

        debug!(target_lang = %target, field = field.as_str(), "Requesting translation");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::translation(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            return Err(DomainError::translation(format!(
                "HTTP {}: {}",
                status, error_body
            )));
        }

        let parsed: TranslateResponse = response
            .json()
            .await
            .map_err(|e| DomainError::translation(format!("Failed to parse response: {}", e)))?;

        if parsed.translated_text.trim().is_empty() {
            return Err(DomainError::translation("Provider returned an empty translation"));
        }

        Ok(parsed.translated_text)
    }
}
