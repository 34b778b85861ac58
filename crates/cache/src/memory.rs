//! In-process [`KvStore`] for tests and single-instance development.
//!
//! Counters are only shared within one process, so this backend does not
//! give horizontally scaled instances a common rate-limit view.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use ridehail_core::clock::{Clock, SystemClock};
use ridehail_core::types::Timestamp;

use crate::error::CacheError;
use crate::store::KvStore;

struct Entry {
    value: String,
    expires_at: Option<Timestamp>,
}

impl Entry {
    fn is_live(&self, now: Timestamp) -> bool {
        self.expires_at.is_none_or(|at| at > now)
    }
}

/// A mutex-guarded map with clock-driven expiry.
pub struct MemoryStore {
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Number of live keys.
    pub fn len(&self) -> usize {
        let now = self.clock.now();
        self.lock().values().filter(|e| e.is_live(now)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Entry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn expiry(&self, now: Timestamp, ttl: Duration) -> Timestamp {
        now + chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::days(36_500))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let now = self.clock.now();
        let mut entries = self.lock();
        match entries.get(key) {
            Some(entry) if entry.is_live(now) => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), CacheError> {
        let now = self.clock.now();
        let expires_at = ttl.map(|ttl| self.expiry(now, ttl));
        self.lock().insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn incr(&self, key: &str, ttl: Duration) -> Result<i64, CacheError> {
        let now = self.clock.now();
        let mut entries = self.lock();

        let current = entries
            .get(key)
            .filter(|e| e.is_live(now))
            .and_then(|e| e.value.parse::<i64>().ok());

        let (count, expires_at) = match current {
            Some(n) => (n + 1, entries.get(key).and_then(|e| e.expires_at)),
            None => (1, Some(self.expiry(now, ttl))),
        };
        entries.insert(
            key.to_string(),
            Entry {
                value: count.to_string(),
                expires_at,
            },
        );
        Ok(count)
    }
}
