//! Ride and ride status history models.

use ridehail_core::error::CoreError;
use ridehail_core::geo::Coordinates;
use ridehail_core::status::RideStatus;
use ridehail_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A ride row from the `rides` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Ride {
    pub id: DbId,
    pub passenger_id: DbId,
    pub driver_id: Option<DbId>,
    pub vehicle_id: Option<DbId>,
    pub status: String,
    pub origin_latitude: f64,
    pub origin_longitude: f64,
    pub destination_latitude: f64,
    pub destination_longitude: f64,
    pub requested_at: Timestamp,
    pub accepted_at: Option<Timestamp>,
    pub started_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub cancelled_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Ride {
    pub fn ride_status(&self) -> Result<RideStatus, CoreError> {
        self.status.parse()
    }

    pub fn origin(&self) -> Coordinates {
        Coordinates::new(self.origin_latitude, self.origin_longitude)
    }

    pub fn destination(&self) -> Coordinates {
        Coordinates::new(self.destination_latitude, self.destination_longitude)
    }
}

/// DTO for requesting a new ride.
#[derive(Debug, Clone)]
pub struct CreateRide {
    pub passenger_id: DbId,
    pub origin: Coordinates,
    pub destination: Coordinates,
}

/// An append-only row from `ride_status_history`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RideStatusHistory {
    pub id: DbId,
    pub ride_id: DbId,
    pub driver_id: Option<DbId>,
    pub previous_status: String,
    pub new_status: String,
    pub location_latitude: Option<f64>,
    pub location_longitude: Option<f64>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for recording a status transition.
#[derive(Debug, Clone)]
pub struct CreateRideStatusHistory {
    pub ride_id: DbId,
    pub driver_id: Option<DbId>,
    pub previous_status: RideStatus,
    pub new_status: RideStatus,
    pub location: Option<Coordinates>,
    pub notes: Option<String>,
}
