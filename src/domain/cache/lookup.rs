//! Outcome of a cache lookup

/// Result of reading a key from a cache that may be down
///
/// `Unavailable` means the backend failed; callers fall back to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Hit(T),
    Miss,
    Unavailable,
}
