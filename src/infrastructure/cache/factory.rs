//! Cache factory for runtime selection

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::domain::cache::{Cache, CacheTtls};
use crate::domain::DomainError;

use super::in_memory::{InMemoryCache, InMemoryCacheConfig};
use super::redis::{RedisCache, RedisCacheConfig};

/// Supported cache types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheType {
    /// In-memory cache using moka
    #[default]
    InMemory,
    /// Redis cache
    Redis,
}

impl std::fmt::Display for CacheType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheType::InMemory => write!(f, "in_memory"),
            CacheType::Redis => write!(f, "redis"),
        }
    }
}

impl std::str::FromStr for CacheType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in_memory" | "inmemory" | "memory" => Ok(CacheType::InMemory),
            "redis" => Ok(CacheType::Redis),
            _ => Err(DomainError::configuration(format!(
                "Unknown cache type: {}. Valid types: in_memory, redis",
                s
            ))),
        }
    }
}

/// Configuration for cache factory
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Type of cache to create
    pub cache_type: CacheType,
    /// Redis URL (required for Redis type)
    pub redis_url: Option<String>,
    /// Key prefix for namespacing (Redis only)
    pub key_prefix: Option<String>,
    /// Purpose-specific TTLs; the longest one bounds in-memory entries
    pub ttls: CacheTtls,
    /// Maximum capacity (in-memory only)
    pub max_capacity: u64,
    /// Per-command timeout (Redis only)
    pub operation_timeout: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_type: CacheType::InMemory,
            redis_url: None,
            key_prefix: None,
            ttls: CacheTtls::default(),
            max_capacity: 10_000,
            operation_timeout: Duration::from_millis(500),
        }
    }
}

impl CacheConfig {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn redis(url: impl Into<String>) -> Self {
        Self {
            cache_type: CacheType::Redis,
            redis_url: Some(url.into()),
            ..Default::default()
        }
    }

    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    pub fn with_ttls(mut self, ttls: CacheTtls) -> Self {
        self.ttls = ttls;
        self
    }

    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = capacity;
        self
    }

    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = timeout;
        self
    }
}

/// Factory for creating cache instances
#[derive(Debug, Default)]
pub struct CacheFactory;

impl CacheFactory {
    pub fn new() -> Self {
        Self
    }

    /// Creates a cache instance based on configuration
    pub async fn create(&self, config: &CacheConfig) -> Result<Arc<dyn Cache>, DomainError> {
        match config.cache_type {
            CacheType::InMemory => Ok(self.create_in_memory(config)),
            CacheType::Redis => {
                let url = config.redis_url.clone().ok_or_else(|| {
                    DomainError::configuration("Redis URL is required for Redis cache type")
                })?;

                let mut redis_config =
                    RedisCacheConfig::new(url).with_operation_timeout(config.operation_timeout);

                if let Some(prefix) = &config.key_prefix {
                    redis_config = redis_config.with_key_prefix(prefix.clone());
                }

                let cache = RedisCache::new(redis_config).await?;
                Ok(Arc::new(cache))
            }
        }
    }

    /// Creates the configured cache, falling back to in-memory when Redis
    /// cannot be reached
    ///
    /// Configuration errors (such as a missing Redis URL) are still returned.
    pub async fn create_or_fallback(
        &self,
        config: &CacheConfig,
    ) -> Result<Arc<dyn Cache>, DomainError> {
        match self.create(config).await {
            Ok(cache) => {
                info!(backend = %config.cache_type, "Cache backend initialized");
                Ok(cache)
            }
            Err(DomainError::CacheUnavailable { message }) => {
                warn!(
                    backend = %config.cache_type,
                    error = %message,
                    "Cache backend unreachable, falling back to in-memory cache"
                );
                Ok(self.create_in_memory(config))
            }
            Err(e) => Err(e),
        }
    }

    fn create_in_memory(&self, config: &CacheConfig) -> Arc<dyn Cache> {
        let in_memory_config = InMemoryCacheConfig::default()
            .with_max_capacity(config.max_capacity)
            .with_max_ttl(config.ttls.max());

        Arc::new(InMemoryCache::with_config(in_memory_config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cache::CacheExt;

    #[test]
    fn test_cache_type_from_str() {
        assert_eq!("in_memory".parse::<CacheType>().unwrap(), CacheType::InMemory);
        assert_eq!("memory".parse::<CacheType>().unwrap(), CacheType::InMemory);
        assert_eq!("REDIS".parse::<CacheType>().unwrap(), CacheType::Redis);
        assert!("memcached".parse::<CacheType>().is_err());
    }

    #[test]
    fn test_cache_type_display() {
        assert_eq!(CacheType::InMemory.to_string(), "in_memory");
        assert_eq!(CacheType::Redis.to_string(), "redis");
    }

    #[test]
    fn test_cache_config_redis() {
        let config = CacheConfig::redis("redis://localhost:6379")
            .with_key_prefix("faqs")
            .with_max_capacity(50);

        assert_eq!(config.cache_type, CacheType::Redis);
        assert_eq!(config.redis_url.as_deref(), Some("redis://localhost:6379"));
        assert_eq!(config.key_prefix.as_deref(), Some("faqs"));
        assert_eq!(config.max_capacity, 50);
    }

    #[tokio::test]
    async fn test_factory_create_in_memory() {
        let cache = CacheFactory::new()
            .create(&CacheConfig::in_memory())
            .await
            .unwrap();

        cache
            .set("test", &"value", Duration::from_secs(60))
            .await
            .unwrap();

        let result: Option<String> = cache.get("test").await.unwrap();
        assert_eq!(result, Some("value".to_string()));
    }

    #[tokio::test]
    async fn test_in_memory_keeps_long_ttl_entries() {
        let cache = CacheFactory::new()
            .create(&CacheConfig::in_memory())
            .await
            .unwrap();

        cache
            .set("translation:abc:hi", &"namaste", CacheTtls::default().translation)
            .await
            .unwrap();

        assert!(cache.exists("translation:abc:hi").await.unwrap());
    }

    #[tokio::test]
    async fn test_factory_create_redis_missing_url() {
        let config = CacheConfig {
            cache_type: CacheType::Redis,
            redis_url: None,
            ..Default::default()
        };

        let result = CacheFactory::new().create(&config).await;
        assert!(matches!(result, Err(DomainError::Configuration { .. })));

        let result = CacheFactory::new().create_or_fallback(&config).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_unreachable_redis_falls_back_to_in_memory() {
        let config = CacheConfig::redis("redis://127.0.0.1:1")
            .with_operation_timeout(Duration::from_millis(100));

        let cache = CacheFactory::new()
            .create_or_fallback(&config)
            .await
            .unwrap();

        assert!(cache.ping().await.is_ok());
        cache
            .set("faq_list_en", &Vec::<String>::new(), Duration::from_secs(60))
            .await
            .unwrap();
        assert!(cache.exists("faq_list_en").await.unwrap());
    }
}
