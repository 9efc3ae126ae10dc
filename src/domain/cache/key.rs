//! Cache key construction and TTL policy

use std::fmt;
use std::time::Duration;

use sha2::{Digest, Sha256};

use crate::domain::faq::{FaqField, FaqId, Language};

/// Glob matching every list cache entry, one per language
pub const LIST_KEY_PATTERN: &str = "faq_list_*";

/// Namespaced cache key for each cached use-case
///
/// Every family has its own prefix, so keys from different families never
/// collide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FaqCacheKey {
    /// Single FAQ record: `faq:<id>`
    Item(FaqId),
    /// Full listing rendered in one language: `faq_list_<lang>`
    List(Language),
    /// Search results: `faq_search_<lang>_<query>`
    Search { lang: String, query: String },
    /// Translated text: `translation:<sha256 of format and text>:<lang>`
    Translation { text_digest: String, lang: Language },
}

impl FaqCacheKey {
    pub fn item(id: &FaqId) -> Self {
        Self::Item(id.clone())
    }

    pub fn list(lang: Language) -> Self {
        Self::List(lang)
    }

    /// Search key for a raw language code and raw query text
    ///
    /// Unrecognized codes render exactly like English, so they share its key.
    pub fn search(lang: &str, query: &str) -> Self {
        let lang = lang
            .parse::<Language>()
            .map(|l| l.code())
            .unwrap_or(Language::En.code());

        Self::Search {
            lang: lang.to_string(),
            query: query.to_string(),
        }
    }

    /// The field's format is hashed with the text, so plain and HTML
    /// renderings of the same string are cached apart
    pub fn translation(text: &str, field: FaqField, lang: Language) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(field.format().as_bytes());
        hasher.update(b":");
        hasher.update(text.as_bytes());
        let digest = hasher.finalize();

        Self::Translation {
            text_digest: hex::encode(digest),
            lang,
        }
    }

    /// TTL this key's family is cached for
    pub fn ttl(&self, ttls: &CacheTtls) -> Duration {
        match self {
            Self::Item(_) | Self::List(_) => ttls.default,
            Self::Search { .. } => ttls.search,
            Self::Translation { .. } => ttls.translation,
        }
    }
}

impl fmt::Display for FaqCacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item(id) => write!(f, "faq:{}", id),
            Self::List(lang) => write!(f, "faq_list_{}", lang),
            Self::Search { lang, query } => write!(f, "faq_search_{}_{}", lang, query),
            Self::Translation { text_digest, lang } => {
                write!(f, "translation:{}:{}", text_digest, lang)
            }
        }
    }
}

/// Purpose-specific TTLs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtls {
    /// Listings and single records
    pub default: Duration,
    /// Search results
    pub search: Duration,
    /// Translated strings
    pub translation: Duration,
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            default: Duration::from_secs(3600),
            search: Duration::from_secs(300),
            translation: Duration::from_secs(86_400),
        }
    }
}

impl CacheTtls {
    pub fn with_default(mut self, ttl: Duration) -> Self {
        self.default = ttl;
        self
    }

    pub fn with_search(mut self, ttl: Duration) -> Self {
        self.search = ttl;
        self
    }

    pub fn with_translation(mut self, ttl: Duration) -> Self {
        self.translation = ttl;
        self
    }

    /// Longest TTL in the policy
    pub fn max(&self) -> Duration {
        self.default.max(self.search).max(self.translation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_key() {
        let id = FaqId::generate();
        assert_eq!(FaqCacheKey::item(&id).to_string(), format!("faq:{}", id));
    }

    #[test]
    fn test_list_key() {
        assert_eq!(FaqCacheKey::list(Language::Hi).to_string(), "faq_list_hi");
    }

    #[test]
    fn test_search_key_keeps_raw_query() {
        let key = FaqCacheKey::search("bn", "What Is");
        assert_eq!(key.to_string(), "faq_search_bn_What Is");
    }

    #[test]
    fn test_search_key_unknown_lang_shares_english_key() {
        assert_eq!(
            FaqCacheKey::search("fr", "rust").to_string(),
            FaqCacheKey::search("en", "rust").to_string()
        );
    }

    #[test]
    fn test_search_key_unknown_lang_cannot_forge_other_keys() {
        let forged = FaqCacheKey::search("hi_a", "b").to_string();
        let genuine = FaqCacheKey::search("hi", "a_b").to_string();
        assert_ne!(forged, genuine);
    }

    #[test]
    fn test_translation_key_hashes_format_and_text() {
        let key = FaqCacheKey::translation("hello", FaqField::Question, Language::Bn).to_string();

        assert_eq!(
            key,
            "translation:eadf732aba96d643feaa39909a300bc8a25b15fabdf41bf20819b8ce8fd3746f:bn"
        );
        assert_ne!(
            FaqCacheKey::translation("hello", FaqField::Answer, Language::Bn),
            FaqCacheKey::translation("hello", FaqField::Question, Language::Bn)
        );
    }

    #[test]
    fn test_list_pattern_matches_list_keys_only() {
        let prefix = LIST_KEY_PATTERN.trim_end_matches('*');

        assert!(FaqCacheKey::list(Language::En).to_string().starts_with(prefix));
        assert!(!FaqCacheKey::search("en", "q").to_string().starts_with(prefix));
        assert!(!FaqCacheKey::item(&FaqId::generate()).to_string().starts_with(prefix));
    }

    #[test]
    fn test_ttl_per_family() {
        let ttls = CacheTtls::default();

        assert_eq!(FaqCacheKey::list(Language::En).ttl(&ttls), Duration::from_secs(3600));
        assert_eq!(FaqCacheKey::search("en", "q").ttl(&ttls), Duration::from_secs(300));
        assert_eq!(
            FaqCacheKey::translation("x", FaqField::Answer, Language::Hi).ttl(&ttls),
            Duration::from_secs(86_400)
        );
    }

    #[test]
    fn test_ttls_max() {
        let ttls = CacheTtls::default().with_default(Duration::from_secs(100_000));
        assert_eq!(ttls.max(), Duration::from_secs(100_000));
    }
}
