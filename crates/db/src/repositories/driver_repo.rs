//! Repository for the `drivers` table.

use ridehail_core::status::DriverStatus;
use ridehail_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::account::{CreateDriver, Driver, DriverPosition};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, account_id, license_number, license_expiry_date, account_status, \
                        background_check_status, is_online, is_available, is_active_trip, \
                        current_latitude, current_longitude, last_location_update, \
                        average_rating, total_rides, created_at, updated_at";

pub struct DriverRepo;

impl DriverRepo {
    /// Insert a driver profile with `PENDING` approval and background check.
    pub async fn create<'e>(
        db: impl PgExecutor<'e>,
        input: &CreateDriver,
    ) -> Result<Driver, sqlx::Error> {
        let query = format!(
            "INSERT INTO drivers (account_id, license_number, license_expiry_date,
                                  account_status, background_check_status)
             VALUES ($1, $2, $3, $4, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Driver>(&query)
            .bind(input.account_id)
            .bind(&input.license_number)
            .bind(input.license_expiry_date)
            .bind(DriverStatus::Pending.as_str())
            .fetch_one(db)
            .await
    }

    pub async fn find_by_id<'e>(
        db: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Driver>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM drivers WHERE id = $1");
        sqlx::query_as::<_, Driver>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
    }

    pub async fn find_by_account_id<'e>(
        db: impl PgExecutor<'e>,
        account_id: DbId,
    ) -> Result<Option<Driver>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM drivers WHERE account_id = $1");
        sqlx::query_as::<_, Driver>(&query)
            .bind(account_id)
            .fetch_optional(db)
            .await
    }

    /// Set the approval status. Returns `None` if the driver does not exist.
    pub async fn update_status<'e>(
        db: impl PgExecutor<'e>,
        id: DbId,
        status: DriverStatus,
    ) -> Result<Option<Driver>, sqlx::Error> {
        let query = format!(
            "UPDATE drivers SET account_status = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Driver>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(db)
            .await
    }

    /// Toggle the online/available flags without touching the position.
    pub async fn set_availability<'e>(
        db: impl PgExecutor<'e>,
        id: DbId,
        is_online: bool,
        is_available: bool,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE drivers SET is_online = $2, is_available = $3 WHERE id = $1")
                .bind(id)
                .bind(is_online)
                .bind(is_available)
                .execute(db)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Write the denormalized current position and flags.
    pub async fn update_position<'e>(
        db: impl PgExecutor<'e>,
        id: DbId,
        position: &DriverPosition,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE drivers SET
                current_latitude = $2,
                current_longitude = $3,
                is_online = $4,
                is_available = $5,
                last_location_update = $6
             WHERE id = $1",
        )
        .bind(id)
        .bind(position.latitude)
        .bind(position.longitude)
        .bind(position.is_online)
        .bind(position.is_available)
        .bind(position.recorded_at)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Conditionally take an eligible driver off the market for a new trip.
    ///
    /// Matches only when the driver is online, available, `APPROVED` and not
    /// already on a trip, so two concurrent claims for the same driver cannot
    /// both succeed. A ping that reports the driver available mid-trip does
    /// not make them claimable.
    /// Returns `None` when the driver is missing or ineligible.
    pub async fn claim_for_ride<'e>(
        db: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Driver>, sqlx::Error> {
        let query = format!(
            "UPDATE drivers SET is_available = false, is_active_trip = true
             WHERE id = $1
               AND is_online = true
               AND is_available = true
               AND is_active_trip = false
               AND account_status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Driver>(&query)
            .bind(id)
            .bind(DriverStatus::Approved.as_str())
            .fetch_optional(db)
            .await
    }
}
