//! Per-driver location ping limiter.
//!
//! A fixed window anchored at the first ping: the store counter is created
//! with the window as its expiry, and pings beyond `max_per_window` are
//! refused until it lapses.

use std::sync::Arc;
use std::time::Duration;

use ridehail_core::types::DbId;

use crate::error::CacheError;
use crate::store::KvStore;

pub const DEFAULT_MAX_PER_WINDOW: i64 = 1;
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(1);

#[derive(Clone)]
pub struct LocationRateLimiter {
    store: Arc<dyn KvStore>,
    max_per_window: i64,
    window: Duration,
}

impl LocationRateLimiter {
    pub fn new(store: Arc<dyn KvStore>, max_per_window: i64, window: Duration) -> Self {
        Self {
            store,
            max_per_window: max_per_window.max(1),
            window,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn key(driver_id: DbId) -> String {
        format!("driver:location:rate:{driver_id}")
    }

    /// Count one ping for `driver_id`. `Ok(true)` means it is within budget.
    pub async fn check(&self, driver_id: DbId) -> Result<bool, CacheError> {
        let count = self.store.incr(&Self::key(driver_id), self.window).await?;
        Ok(count <= self.max_per_window)
    }
}
