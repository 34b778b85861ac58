//! Repository for the `rides` and `ride_status_history` tables.

use ridehail_core::status::RideStatus;
use ridehail_core::types::{DbId, Timestamp};
use sqlx::PgExecutor;

use crate::models::ride::{CreateRide, CreateRideStatusHistory, Ride, RideStatusHistory};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, passenger_id, driver_id, vehicle_id, status, \
                        origin_latitude, origin_longitude, destination_latitude, destination_longitude, \
                        requested_at, accepted_at, started_at, completed_at, cancelled_at, \
                        created_at, updated_at";

const HISTORY_COLUMNS: &str = "id, ride_id, driver_id, previous_status, new_status, \
                                location_latitude, location_longitude, notes, created_at";

pub struct RideRepo;

impl RideRepo {
    /// Insert a new ride in `REQUESTED` state.
    pub async fn create<'e>(db: impl PgExecutor<'e>, input: &CreateRide) -> Result<Ride, sqlx::Error> {
        let query = format!(
            "INSERT INTO rides (passenger_id, status, origin_latitude, origin_longitude,
                                destination_latitude, destination_longitude)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ride>(&query)
            .bind(input.passenger_id)
            .bind(RideStatus::Requested.as_str())
            .bind(input.origin.latitude)
            .bind(input.origin.longitude)
            .bind(input.destination.latitude)
            .bind(input.destination.longitude)
            .fetch_one(db)
            .await
    }

    pub async fn find_by_id<'e>(db: impl PgExecutor<'e>, id: DbId) -> Result<Option<Ride>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rides WHERE id = $1");
        sqlx::query_as::<_, Ride>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
    }

    /// Stamp a ride as accepted by `driver_id`.
    ///
    /// The `status = 'REQUESTED' AND driver_id IS NULL` predicate is the race
    /// judge: of several concurrent callers exactly one matches the row, the
    /// rest get `None`.
    pub async fn accept<'e>(
        db: impl PgExecutor<'e>,
        ride_id: DbId,
        driver_id: DbId,
        vehicle_id: Option<DbId>,
        accepted_at: Timestamp,
    ) -> Result<Option<Ride>, sqlx::Error> {
        let query = format!(
            "UPDATE rides SET
                driver_id = $2,
                vehicle_id = $3,
                status = $4,
                accepted_at = $5
             WHERE id = $1
               AND status = $6
               AND driver_id IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ride>(&query)
            .bind(ride_id)
            .bind(driver_id)
            .bind(vehicle_id)
            .bind(RideStatus::Accepted.as_str())
            .bind(accepted_at)
            .bind(RideStatus::Requested.as_str())
            .fetch_optional(db)
            .await
    }

    /// Move a ride from `from` to `to`, stamping the matching timestamp.
    ///
    /// Returns `None` if the ride is not currently in `from`.
    pub async fn transition<'e>(
        db: impl PgExecutor<'e>,
        ride_id: DbId,
        from: RideStatus,
        to: RideStatus,
        at: Timestamp,
    ) -> Result<Option<Ride>, sqlx::Error> {
        let stamp_column = match to {
            RideStatus::Requested => "requested_at",
            RideStatus::Accepted => "accepted_at",
            RideStatus::InProgress => "started_at",
            RideStatus::Completed => "completed_at",
            RideStatus::Cancelled => "cancelled_at",
        };
        let query = format!(
            "UPDATE rides SET status = $3, {stamp_column} = $4
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ride>(&query)
            .bind(ride_id)
            .bind(from.as_str())
            .bind(to.as_str())
            .bind(at)
            .fetch_optional(db)
            .await
    }

    /// The ride a driver is currently serving (`ACCEPTED` or `IN_PROGRESS`).
    pub async fn find_active_for_driver<'e>(
        db: impl PgExecutor<'e>,
        driver_id: DbId,
    ) -> Result<Option<Ride>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM rides
             WHERE driver_id = $1 AND status IN ($2, $3)
             ORDER BY accepted_at DESC NULLS LAST
             LIMIT 1"
        );
        sqlx::query_as::<_, Ride>(&query)
            .bind(driver_id)
            .bind(RideStatus::Accepted.as_str())
            .bind(RideStatus::InProgress.as_str())
            .fetch_optional(db)
            .await
    }

    /// Append a status transition to the ride's history.
    pub async fn record_status_change<'e>(
        db: impl PgExecutor<'e>,
        input: &CreateRideStatusHistory,
    ) -> Result<RideStatusHistory, sqlx::Error> {
        let query = format!(
            "INSERT INTO ride_status_history
                (ride_id, driver_id, previous_status, new_status,
                 location_latitude, location_longitude, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {HISTORY_COLUMNS}"
        );
        sqlx::query_as::<_, RideStatusHistory>(&query)
            .bind(input.ride_id)
            .bind(input.driver_id)
            .bind(input.previous_status.as_str())
            .bind(input.new_status.as_str())
            .bind(input.location.map(|l| l.latitude))
            .bind(input.location.map(|l| l.longitude))
            .bind(&input.notes)
            .fetch_one(db)
            .await
    }

    /// Full history for a ride, oldest first.
    pub async fn list_history<'e>(
        db: impl PgExecutor<'e>,
        ride_id: DbId,
    ) -> Result<Vec<RideStatusHistory>, sqlx::Error> {
        let query = format!(
            "SELECT {HISTORY_COLUMNS} FROM ride_status_history
             WHERE ride_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, RideStatusHistory>(&query)
            .bind(ride_id)
            .fetch_all(db)
            .await
    }
}
