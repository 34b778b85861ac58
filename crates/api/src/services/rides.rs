//! Ride acceptance.
//!
//! Two conditional updates decide every race: the driver claim (online,
//! available, approved) and the ride accept (`REQUESTED`, no driver). Both
//! run in one read-committed transaction; if either matches no row the
//! transaction is rolled back and the caller gets a [`AcceptOutcome::Rejected`]
//! value instead of an error.

use std::sync::Arc;

use ridehail_core::clock::Clock;
use ridehail_core::geo::Coordinates;
use ridehail_core::status::RideStatus;
use ridehail_core::types::{DbId, Timestamp};
use ridehail_db::models::ride::CreateRideStatusHistory;
use ridehail_db::repositories::{AccountRepo, DriverRepo, RideRepo, VehicleRepo};
use ridehail_db::{begin_read_committed, DbPool};
use serde::Serialize;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy)]
pub struct AcceptRequest {
    pub driver_id: DbId,
    pub ride_id: DbId,
    pub current_location: Coordinates,
    pub estimated_pickup_minutes: i64,
}

/// Result of an acceptance attempt. Losing a race is an expected outcome,
/// not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AcceptOutcome {
    Accepted(AcceptedRide),
    Rejected { reason: RejectReason },
}

impl AcceptOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectReason {
    /// Driver missing, offline, busy, or not approved.
    DriverUnavailable,
    /// Ride missing, already taken, or no longer requested.
    RideUnavailable,
}

impl RejectReason {
    pub fn message(self) -> &'static str {
        match self {
            Self::DriverUnavailable => "Driver not found or not available",
            Self::RideUnavailable => "Ride not found or already accepted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcceptedRide {
    pub ride_id: DbId,
    pub status: RideStatus,
    pub accepted_at: Timestamp,
    pub estimated_pickup_minutes: i64,
    pub driver: DriverCard,
}

/// What the passenger side is shown about the assigned driver.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverCard {
    pub id: DbId,
    pub name: String,
    pub phone: String,
    pub rating: f64,
    pub vehicle: Option<VehicleCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleCard {
    pub model: String,
    pub color: String,
    pub license_plate: String,
}

pub struct RideService {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl RideService {
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }

    pub async fn accept_ride(&self, req: AcceptRequest) -> AppResult<AcceptOutcome> {
        req.current_location.validate()?;
        let AcceptRequest {
            driver_id, ride_id, ..
        } = req;
        tracing::info!(driver_id, ride_id, "Driver attempting to accept ride");

        let now = self.clock.now();
        let mut tx = begin_read_committed(&self.pool).await?;

        let Some(driver) = DriverRepo::claim_for_ride(&mut *tx, driver_id).await? else {
            tx.rollback().await?;
            return Ok(rejected(driver_id, ride_id, RejectReason::DriverUnavailable));
        };

        let vehicle = VehicleRepo::find_by_driver_id(&mut *tx, driver_id).await?;

        let Some(ride) =
            RideRepo::accept(&mut *tx, ride_id, driver_id, vehicle.as_ref().map(|v| v.id), now)
                .await?
        else {
            tx.rollback().await?;
            return Ok(rejected(driver_id, ride_id, RejectReason::RideUnavailable));
        };

        let account = AccountRepo::find_by_id(&mut *tx, driver.account_id)
            .await?
            .ok_or_else(|| {
                AppError::InternalError(format!("Driver {driver_id} has no account"))
            })?;

        RideRepo::record_status_change(
            &mut *tx,
            &CreateRideStatusHistory {
                ride_id,
                driver_id: Some(driver_id),
                previous_status: RideStatus::Requested,
                new_status: RideStatus::Accepted,
                location: Some(req.current_location),
                notes: Some(format!("Accepted by driver {}", account.first_name)),
            },
        )
        .await?;

        tx.commit().await?;

        tracing::info!(driver_id, ride_id, "Ride accepted");

        Ok(AcceptOutcome::Accepted(AcceptedRide {
            ride_id: ride.id,
            status: RideStatus::Accepted,
            accepted_at: ride.accepted_at.unwrap_or(now),
            estimated_pickup_minutes: req.estimated_pickup_minutes,
            driver: DriverCard {
                id: driver.id,
                name: account.full_name(),
                phone: account.phone,
                rating: driver.average_rating,
                vehicle: vehicle.map(|v| VehicleCard {
                    model: v.model,
                    color: v.color,
                    license_plate: v.license_plate,
                }),
            },
        }))
    }
}

fn rejected(driver_id: DbId, ride_id: DbId, reason: RejectReason) -> AcceptOutcome {
    tracing::info!(driver_id, ride_id, ?reason, "Ride acceptance rejected");
    AcceptOutcome::Rejected { reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejection_serializes_with_reason() {
        let outcome = AcceptOutcome::Rejected {
            reason: RejectReason::RideUnavailable,
        };
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"outcome": "rejected", "reason": "RIDE_UNAVAILABLE"})
        );
        assert!(!outcome.is_accepted());
    }

    #[test]
    fn reasons_have_distinct_messages() {
        assert_ne!(
            RejectReason::DriverUnavailable.message(),
            RejectReason::RideUnavailable.message()
        );
    }
}
