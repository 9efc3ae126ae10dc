//! Redis cache implementation

use std::fmt;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{Client, RedisResult};

use crate::domain::cache::Cache;
use crate::domain::DomainError;

/// Configuration for Redis cache
#[derive(Debug, Clone)]
pub struct RedisCacheConfig {
    /// Redis connection URL (e.g., "redis://127.0.0.1:6379")
    pub url: String,
    /// Key prefix for namespacing
    pub key_prefix: Option<String>,
    /// Time allowed for the initial connection
    pub connection_timeout: Duration,
    /// Time allowed for any single command
    pub operation_timeout: Duration,
}

impl Default for RedisCacheConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            key_prefix: None,
            connection_timeout: Duration::from_secs(5),
            operation_timeout: Duration::from_millis(500),
        }
    }
}

impl RedisCacheConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = timeout;
        self
    }
}

/// Shared cache backed by Redis
///
/// Every command is bounded by `operation_timeout`; a slow or unreachable
/// server surfaces as `DomainError::CacheUnavailable` instead of stalling
/// the request.
#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
    config: RedisCacheConfig,
}

impl fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisCache")
            .field("config", &self.config)
            .field("connection", &"<ConnectionManager>")
            .finish()
    }
}

impl RedisCache {
    /// Connects to Redis, failing if the server is not reachable in time
    pub async fn new(config: RedisCacheConfig) -> Result<Self, DomainError> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| DomainError::cache(format!("Failed to create Redis client: {}", e)))?;

        let connection =
            tokio::time::timeout(config.connection_timeout, ConnectionManager::new(client))
                .await
                .map_err(|_| {
                    DomainError::cache(format!(
                        "Timed out connecting to Redis after {:?}",
                        config.connection_timeout
                    ))
                })?
                .map_err(|e| DomainError::cache(format!("Failed to connect to Redis: {}", e)))?;

        Ok(Self { connection, config })
    }

    fn prefix_key(&self, key: &str) -> String {
        match &self.config.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }

    async fn run<T, F>(&self, operation: &str, key: &str, command: F) -> Result<T, DomainError>
    where
        F: Future<Output = RedisResult<T>>,
    {
        match tokio::time::timeout(self.config.operation_timeout, command).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(DomainError::cache(format!(
                "Failed to {} '{}': {}",
                operation, key, e
            ))),
            Err(_) => Err(DomainError::cache(format!(
                "Timed out trying to {} '{}' after {:?}",
                operation, key, self.config.operation_timeout
            ))),
        }
    }

    async fn scan(&self, pattern: &str) -> Result<Vec<String>, DomainError> {
        let prefixed_pattern = self.prefix_key(pattern);
        let mut conn = self.connection.clone();

        let mut cursor = 0u64;
        let mut found = Vec::new();

        loop {
            let (new_cursor, keys): (u64, Vec<String>) = self
                .run(
                    "scan",
                    pattern,
                    redis::cmd("SCAN")
                        .arg(cursor)
                        .arg("MATCH")
                        .arg(&prefixed_pattern)
                        .arg("COUNT")
                        .arg(100)
                        .query_async(&mut conn),
                )
                .await?;

            found.extend(keys);
            cursor = new_cursor;

            if cursor == 0 {
                break;
            }
        }

        Ok(found)
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError> {
        let prefixed_key = self.prefix_key(key);
        let mut conn = self.connection.clone();

        self.run(
            "get",
            key,
            redis::cmd("GET").arg(&prefixed_key).query_async(&mut conn),
        )
        .await
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError> {
        let prefixed_key = self.prefix_key(key);
        let mut conn = self.connection.clone();

        let ttl_secs = ttl.as_secs().max(1);

        self.run(
            "set",
            key,
            redis::cmd("SET")
                .arg(&prefixed_key)
                .arg(value)
                .arg("EX")
                .arg(ttl_secs)
                .query_async::<()>(&mut conn),
        )
        .await
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        let prefixed_key = self.prefix_key(key);
        let mut conn = self.connection.clone();

        let deleted: i64 = self
            .run(
                "delete",
                key,
                redis::cmd("DEL").arg(&prefixed_key).query_async(&mut conn),
            )
            .await?;

        Ok(deleted > 0)
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<usize, DomainError> {
        let keys = self.scan(pattern).await?;
        let mut conn = self.connection.clone();
        let mut total_deleted = 0usize;

        for chunk in keys.chunks(100) {
            let deleted: i64 = self
                .run(
                    "delete keys matching",
                    pattern,
                    redis::cmd("DEL").arg(chunk.to_vec()).query_async(&mut conn),
                )
                .await?;
            total_deleted += deleted as usize;
        }

        Ok(total_deleted)
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        let prefixed_key = self.prefix_key(key);
        let mut conn = self.connection.clone();

        let count: i64 = self
            .run(
                "check existence of",
                key,
                redis::cmd("EXISTS").arg(&prefixed_key).query_async(&mut conn),
            )
            .await?;

        Ok(count > 0)
    }

    async fn clear(&self) -> Result<(), DomainError> {
        match &self.config.key_prefix {
            Some(_) => {
                self.delete_pattern("*").await?;
            }
            None => {
                let mut conn = self.connection.clone();
                self.run(
                    "flush",
                    "*",
                    redis::cmd("FLUSHDB").query_async::<()>(&mut conn),
                )
                .await?;
            }
        }

        Ok(())
    }

    async fn size(&self) -> Result<usize, DomainError> {
        match &self.config.key_prefix {
            Some(_) => Ok(self.scan("*").await?.len()),
            None => {
                let mut conn = self.connection.clone();
                self.run(
                    "count",
                    "*",
                    redis::cmd("DBSIZE").query_async::<usize>(&mut conn),
                )
                .await
            }
        }
    }

    async fn ping(&self) -> Result<(), DomainError> {
        let mut conn = self.connection.clone();

        let reply: String = self
            .run("ping", "server", redis::cmd("PING").query_async(&mut conn))
            .await?;

        if reply == "PONG" {
            Ok(())
        } else {
            Err(DomainError::cache(format!(
                "Unexpected PING reply from Redis: {}",
                reply
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cache::CacheExt;

    fn get_test_config() -> RedisCacheConfig {
        RedisCacheConfig::new("redis://127.0.0.1:6379").with_key_prefix("faq_test")
    }

    #[test]
    fn test_config_builders() {
        let config = RedisCacheConfig::new("redis://cache:6379")
            .with_key_prefix("faqs")
            .with_connection_timeout(Duration::from_secs(2))
            .with_operation_timeout(Duration::from_millis(250));

        assert_eq!(config.url, "redis://cache:6379");
        assert_eq!(config.key_prefix.as_deref(), Some("faqs"));
        assert_eq!(config.connection_timeout, Duration::from_secs(2));
        assert_eq!(config.operation_timeout, Duration::from_millis(250));
    }

    #[tokio::test]
    async fn test_invalid_url_is_cache_error() {
        let result = RedisCache::new(RedisCacheConfig::new("not a url")).await;
        assert!(matches!(result, Err(DomainError::CacheUnavailable { .. })));
    }

    #[tokio::test]
    #[ignore = "Requires running Redis instance"]
    async fn test_redis_set_and_get() {
        let cache = RedisCache::new(get_test_config()).await.unwrap();

        cache
            .set("faq_list_en", &vec!["q1"], Duration::from_secs(60))
            .await
            .unwrap();

        let result: Option<Vec<String>> = cache.get("faq_list_en").await.unwrap();
        assert_eq!(result, Some(vec!["q1".to_string()]));

        cache.delete("faq_list_en").await.unwrap();
    }

    #[tokio::test]
    #[ignore = "Requires running Redis instance"]
    async fn test_redis_delete_pattern() {
        let cache = RedisCache::new(get_test_config()).await.unwrap();

        for key in ["faq_list_en", "faq_list_hi", "faq_search_en_q"] {
            cache.set(key, &"data", Duration::from_secs(60)).await.unwrap();
        }

        let deleted = cache.delete_pattern("faq_list_*").await.unwrap();
        assert_eq!(deleted, 2);
        assert!(cache.exists("faq_search_en_q").await.unwrap());

        cache.delete("faq_search_en_q").await.unwrap();
    }

    #[tokio::test]
    #[ignore = "Requires running Redis instance"]
    async fn test_redis_ping() {
        let cache = RedisCache::new(get_test_config()).await.unwrap();
        assert!(cache.ping().await.is_ok());
    }
}
