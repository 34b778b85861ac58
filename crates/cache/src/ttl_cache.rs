//! Short-lived in-process cache.
//!
//! Entries expire `ttl` after insertion. They are dropped on read, and an
//! insert into a map holding [`PRUNE_THRESHOLD`] or more entries first drops
//! every expired one. Invalidation is explicit; there is no background
//! sweeper.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};

use ridehail_core::clock::Clock;
use ridehail_core::types::Timestamp;

/// Map size at which an insert sweeps out expired entries.
pub const PRUNE_THRESHOLD: usize = 1024;

pub struct TtlCache<K, V> {
    ttl: chrono::Duration,
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<K, (V, Timestamp)>>,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    pub fn new(ttl: chrono::Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        let now = self.clock.now();
        let mut entries = self.lock();
        match entries.get(key) {
            Some((value, expires_at)) if *expires_at > now => Some(value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn insert(&self, key: K, value: V) {
        let now = self.clock.now();
        let mut entries = self.lock();
        if entries.len() >= PRUNE_THRESHOLD {
            entries.retain(|_, (_, expires_at)| *expires_at > now);
        }
        entries.insert(key, (value, now + self.ttl));
    }

    /// Entries currently held, expired ones included.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn invalidate(&self, key: &K) {
        self.lock().remove(key);
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<K, (V, Timestamp)>> {
        // A panic while holding the lock cannot leave the map half-written.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ridehail_core::clock::ManualClock;

    fn cache() -> (Arc<ManualClock>, TtlCache<i64, String>) {
        let clock = Arc::new(ManualClock::starting_now());
        let cache = TtlCache::new(chrono::Duration::seconds(5), clock.clone());
        (clock, cache)
    }

    #[test]
    fn hit_within_ttl() {
        let (clock, cache) = cache();
        cache.insert(1, "alice".into());
        clock.advance(chrono::Duration::milliseconds(4999));
        assert_eq!(cache.get(&1).as_deref(), Some("alice"));
    }

    #[test]
    fn miss_after_ttl() {
        let (clock, cache) = cache();
        cache.insert(1, "alice".into());
        clock.advance(chrono::Duration::seconds(5));
        assert_eq!(cache.get(&1), None);
    }

    #[test]
    fn invalidate_removes_one_key() {
        let (_, cache) = cache();
        cache.insert(1, "alice".into());
        cache.insert(2, "bob".into());
        cache.invalidate(&1);
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get(&2).as_deref(), Some("bob"));
    }

    #[test]
    fn insert_sweeps_expired_entries_once_large() {
        let (clock, cache) = cache();
        for id in 0..PRUNE_THRESHOLD as i64 {
            cache.insert(id, format!("user-{id}"));
        }
        assert_eq!(cache.len(), PRUNE_THRESHOLD);

        clock.advance(chrono::Duration::seconds(6));
        cache.insert(-1, "fresh".into());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&-1).as_deref(), Some("fresh"));
    }

    #[test]
    fn small_map_is_not_swept() {
        let (clock, cache) = cache();
        cache.insert(1, "alice".into());
        clock.advance(chrono::Duration::seconds(6));
        cache.insert(2, "bob".into());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn clear_removes_everything() {
        let (_, cache) = cache();
        cache.insert(1, "alice".into());
        cache.insert(2, "bob".into());
        cache.clear();
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get(&2), None);
    }
}
