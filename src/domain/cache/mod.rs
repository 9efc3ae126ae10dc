//! Cache domain - Cache abstraction, key families and TTL policy

mod key;
mod lookup;
mod repository;

pub use key::{CacheTtls, FaqCacheKey, LIST_KEY_PATTERN};
pub use lookup::CacheResult;
pub use repository::{glob_to_regex, Cache, CacheExt};

#[cfg(test)]
pub use repository::mock::MockCache;
