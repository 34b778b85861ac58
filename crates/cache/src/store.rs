use std::time::Duration;

use async_trait::async_trait;

use crate::error::CacheError;

/// Minimal key-value contract the location path depends on.
///
/// Implementations must make [`incr`](KvStore::incr) atomic: the counter
/// increment and the expiry on first use happen as one step so concurrent
/// callers on different instances agree on the count.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store `value`, replacing any previous one. `ttl = None` keeps it until
    /// overwritten.
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), CacheError>;

    /// Increment the counter at `key`, starting a `ttl` expiry when the key is
    /// created. Returns the post-increment value.
    async fn incr(&self, key: &str, ttl: Duration) -> Result<i64, CacheError>;
}
