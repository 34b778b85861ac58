//! Fast key-value cache boundary and the caches built on it.
//!
//! - [`KvStore`] -- `GET` / `SET [ttl]` / `INCR [ttl]` over Redis
//!   ([`RedisStore`]) or process memory ([`MemoryStore`]).
//! - [`LocationCache`] -- latest driver position snapshot per driver.
//! - [`LocationRateLimiter`] -- per-driver fixed-window ping limiter shared
//!   across instances through the store.
//! - [`TtlCache`] -- in-process, short-lived read accelerator.

pub mod error;
pub mod location;
pub mod memory;
pub mod rate_limit;
pub mod redis_store;
pub mod store;
pub mod ttl_cache;

pub use error::CacheError;
pub use location::{LocationCache, LocationSnapshot};
pub use memory::MemoryStore;
pub use rate_limit::LocationRateLimiter;
pub use redis_store::RedisStore;
pub use store::KvStore;
pub use ttl_cache::TtlCache;
