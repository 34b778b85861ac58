//! Repository for the append-only `driver_locations` table.

use ridehail_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::location::{CreateLocationSample, LocationSample};

const COLUMNS: &str = "id, driver_id, latitude, longitude, heading, speed, accuracy, \
                        is_online, is_available, recorded_at";

pub struct LocationRepo;

impl LocationRepo {
    /// Append a location sample. Samples are never updated.
    pub async fn insert<'e>(
        db: impl PgExecutor<'e>,
        input: &CreateLocationSample,
    ) -> Result<LocationSample, sqlx::Error> {
        let query = format!(
            "INSERT INTO driver_locations
                (driver_id, latitude, longitude, heading, speed, accuracy,
                 is_online, is_available, recorded_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LocationSample>(&query)
            .bind(input.driver_id)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(input.heading)
            .bind(input.speed)
            .bind(input.accuracy)
            .bind(input.is_online)
            .bind(input.is_available)
            .bind(input.recorded_at)
            .fetch_one(db)
            .await
    }

    /// The most recent sample for a driver, if any.
    pub async fn latest_for_driver<'e>(
        db: impl PgExecutor<'e>,
        driver_id: DbId,
    ) -> Result<Option<LocationSample>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM driver_locations
             WHERE driver_id = $1
             ORDER BY recorded_at DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, LocationSample>(&query)
            .bind(driver_id)
            .fetch_optional(db)
            .await
    }

    pub async fn count_for_driver<'e>(
        db: impl PgExecutor<'e>,
        driver_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM driver_locations WHERE driver_id = $1")
            .bind(driver_id)
            .fetch_one(db)
            .await
    }
}
