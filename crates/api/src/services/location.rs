//! Driver location pings: rate limiting, durable write, cache mirror and
//! ETA toward the active ride.

use std::sync::Arc;

use ridehail_cache::{LocationCache, LocationRateLimiter, LocationSnapshot};
use ridehail_core::clock::Clock;
use ridehail_core::error::CoreError;
use ridehail_core::geo::{self, Coordinates, EtaEstimate};
use ridehail_core::status::RideStatus;
use ridehail_core::types::DbId;
use ridehail_db::models::account::DriverPosition;
use ridehail_db::models::location::{CreateLocationSample, LocationSample};
use ridehail_db::repositories::{DriverRepo, LocationRepo, RideRepo};
use ridehail_db::{begin_read_committed, DbPool};
use serde::Serialize;

use crate::error::AppResult;

/// One ping as reported by the driver's device.
#[derive(Debug, Clone, Copy)]
pub struct LocationPing {
    pub position: Coordinates,
    pub heading: Option<f64>,
    /// Metres per second.
    pub speed: Option<f64>,
    pub accuracy: Option<f64>,
    pub is_online: bool,
    pub is_available: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationUpdate {
    pub driver_id: DbId,
    pub latitude: f64,
    pub longitude: f64,
    pub active_ride: Option<ActiveRideEta>,
}

/// ETA toward pickup (`ACCEPTED`) or drop-off (`IN_PROGRESS`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveRideEta {
    pub ride_id: DbId,
    pub status: RideStatus,
    pub eta: EtaEstimate,
}

pub struct LocationService {
    pool: DbPool,
    cache: LocationCache,
    limiter: LocationRateLimiter,
    clock: Arc<dyn Clock>,
}

impl LocationService {
    pub fn new(
        pool: DbPool,
        cache: LocationCache,
        limiter: LocationRateLimiter,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            pool,
            cache,
            limiter,
            clock,
        }
    }

    /// Accept a ping for `driver_id`.
    ///
    /// The durable update and the history row commit together. The cache
    /// mirror is written afterwards and its failure is only logged. A rate
    /// limiter outage is an error.
    pub async fn record_location(&self, driver_id: DbId, ping: LocationPing) -> AppResult<LocationUpdate> {
        ping.position.validate()?;

        if DriverRepo::find_by_id(&self.pool, driver_id).await?.is_none() {
            return Err(CoreError::NotFound {
                entity: "Driver",
                id: driver_id,
            }
            .into());
        }

        // An unreachable limiter fails the ping; only the mirror write below
        // is allowed to fail quietly.
        if !self.limiter.check(driver_id).await.inspect_err(|e| {
            tracing::error!(driver_id, error = %e, "Rate limiter unavailable");
        })? {
            return Err(CoreError::RateLimited(format!(
                "Location updates are limited to one per {} ms",
                self.limiter.window().as_millis()
            ))
            .into());
        }

        let now = self.clock.now();
        let Coordinates {
            latitude,
            longitude,
        } = ping.position;

        let mut tx = begin_read_committed(&self.pool).await?;
        DriverRepo::update_position(
            &mut *tx,
            driver_id,
            &DriverPosition {
                latitude,
                longitude,
                is_online: ping.is_online,
                is_available: ping.is_available,
                recorded_at: now,
            },
        )
        .await?;
        LocationRepo::insert(
            &mut *tx,
            &CreateLocationSample {
                driver_id,
                latitude,
                longitude,
                heading: ping.heading,
                speed: ping.speed,
                accuracy: ping.accuracy,
                is_online: ping.is_online,
                is_available: ping.is_available,
                recorded_at: now,
            },
        )
        .await?;
        tx.commit().await?;

        let snapshot = LocationSnapshot {
            latitude,
            longitude,
            heading: ping.heading,
            speed: ping.speed,
            accuracy: ping.accuracy,
            is_online: ping.is_online,
            is_available: ping.is_available,
            updated_at: now,
        };
        if let Err(e) = self.cache.put(driver_id, &snapshot).await {
            tracing::warn!(driver_id, error = %e, "Location cache write failed");
        }

        let active_ride = self.active_ride_eta(driver_id, ping.position, ping.speed).await?;

        tracing::debug!(driver_id, latitude, longitude, "Location recorded");
        Ok(LocationUpdate {
            driver_id,
            latitude,
            longitude,
            active_ride,
        })
    }

    /// Latest known position, read through the cache.
    ///
    /// `None` when the driver has never reported.
    pub async fn read_location(&self, driver_id: DbId) -> AppResult<Option<LocationSnapshot>> {
        match self.cache.get(driver_id).await {
            Ok(Some(snapshot)) => return Ok(Some(snapshot)),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(driver_id, error = %e, "Location cache read failed, using history");
            }
        }

        let Some(sample) = LocationRepo::latest_for_driver(&self.pool, driver_id).await? else {
            return Ok(None);
        };
        let snapshot = snapshot_from_sample(&sample);

        if let Err(e) = self.cache.put(driver_id, &snapshot).await {
            tracing::warn!(driver_id, error = %e, "Location cache repopulation failed");
        }
        Ok(Some(snapshot))
    }

    async fn active_ride_eta(
        &self,
        driver_id: DbId,
        position: Coordinates,
        speed: Option<f64>,
    ) -> AppResult<Option<ActiveRideEta>> {
        let Some(ride) = RideRepo::find_active_for_driver(&self.pool, driver_id).await? else {
            return Ok(None);
        };

        let status = ride.ride_status()?;
        let target = match status {
            RideStatus::Accepted => ride.origin(),
            RideStatus::InProgress => ride.destination(),
            _ => return Ok(None),
        };

        Ok(Some(ActiveRideEta {
            ride_id: ride.id,
            status,
            eta: geo::estimate(position, target, speed),
        }))
    }
}

fn snapshot_from_sample(sample: &LocationSample) -> LocationSnapshot {
    LocationSnapshot {
        latitude: sample.latitude,
        longitude: sample.longitude,
        heading: sample.heading,
        speed: sample.speed,
        accuracy: sample.accuracy,
        is_online: sample.is_online,
        is_available: sample.is_available,
        updated_at: sample.recorded_at,
    }
}
