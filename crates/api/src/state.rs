use std::sync::Arc;

use ridehail_cache::{KvStore, LocationCache, LocationRateLimiter};
use ridehail_core::clock::Clock;
use ridehail_events::{Notifier, WalletProvisioner};

use crate::config::ServerConfig;
use crate::services::{AuthService, LocationService, RideService};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: ridehail_db::DbPool,
    /// Server configuration (read by the auth extractors).
    pub config: Arc<ServerConfig>,
    /// Credentials, sessions and the user-info cache.
    pub auth: Arc<AuthService>,
    /// Driver location pings and reads.
    pub locations: Arc<LocationService>,
    /// Ride acceptance.
    pub rides: Arc<RideService>,
    /// Key-value cache behind locations and rate limits; checked by `/health`.
    pub store: Arc<dyn KvStore>,
}

impl AppState {
    /// Wire the services over their shared collaborators.
    pub fn new(
        pool: ridehail_db::DbPool,
        config: ServerConfig,
        clock: Arc<dyn Clock>,
        store: Arc<dyn KvStore>,
        notifier: Arc<dyn Notifier>,
        wallets: Arc<dyn WalletProvisioner>,
    ) -> Self {
        let auth = AuthService::new(pool.clone(), &config, clock.clone(), notifier, wallets);
        let locations = LocationService::new(
            pool.clone(),
            LocationCache::new(store.clone()),
            LocationRateLimiter::new(
                store.clone(),
                config.location.rate_limit_max,
                config.location.rate_limit_window,
            ),
            clock.clone(),
        );
        let rides = RideService::new(pool.clone(), clock);

        Self {
            pool,
            config: Arc::new(config),
            auth: Arc::new(auth),
            locations: Arc::new(locations),
            rides: Arc::new(rides),
            store,
        }
    }
}
