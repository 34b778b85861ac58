//! Latest-position mirror for drivers.
//!
//! Snapshots are overwritten by each accepted ping and carry no expiry;
//! readers judge staleness from [`LocationSnapshot::updated_at`].

use std::sync::Arc;

use ridehail_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::error::CacheError;
use crate::store::KvStore;

/// The cached view of a driver's last accepted ping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSnapshot {
    pub latitude: f64,
    pub longitude: f64,
    pub heading: Option<f64>,
    pub speed: Option<f64>,
    pub accuracy: Option<f64>,
    pub is_online: bool,
    pub is_available: bool,
    pub updated_at: Timestamp,
}

#[derive(Clone)]
pub struct LocationCache {
    store: Arc<dyn KvStore>,
}

impl LocationCache {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    pub fn key(driver_id: DbId) -> String {
        format!("driver:location:{driver_id}")
    }

    pub async fn put(&self, driver_id: DbId, snapshot: &LocationSnapshot) -> Result<(), CacheError> {
        let body = serde_json::to_string(snapshot)?;
        self.store.set(&Self::key(driver_id), &body, None).await
    }

    /// Returns `None` on a miss. A corrupt entry is reported as an error so
    /// the caller can fall back to the durable history.
    pub async fn get(&self, driver_id: DbId) -> Result<Option<LocationSnapshot>, CacheError> {
        match self.store.get(&Self::key(driver_id)).await? {
            Some(body) => Ok(Some(serde_json::from_str(&body)?)),
            None => Ok(None),
        }
    }
}
