/// Failures at the key-value boundary.
///
/// Every variant means "cache unavailable". Reads and mirror writes on the
/// location path degrade to the durable store; the rate limiter propagates.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Cache operation timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Cache payload could not be (de)serialized: {0}")]
    Serialization(#[from] serde_json::Error),
}
