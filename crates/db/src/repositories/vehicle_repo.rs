//! Repository for the `vehicles` table.

use ridehail_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::account::{CreateVehicle, Vehicle};

const COLUMNS: &str = "id, driver_id, model, color, license_plate, created_at, updated_at";

pub struct VehicleRepo;

impl VehicleRepo {
    pub async fn create<'e>(
        db: impl PgExecutor<'e>,
        input: &CreateVehicle,
    ) -> Result<Vehicle, sqlx::Error> {
        let query = format!(
            "INSERT INTO vehicles (driver_id, model, color, license_plate)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vehicle>(&query)
            .bind(input.driver_id)
            .bind(&input.model)
            .bind(&input.color)
            .bind(&input.license_plate)
            .fetch_one(db)
            .await
    }

    /// The vehicle assigned to a driver, if any.
    pub async fn find_by_driver_id<'e>(
        db: impl PgExecutor<'e>,
        driver_id: DbId,
    ) -> Result<Option<Vehicle>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vehicles WHERE driver_id = $1");
        sqlx::query_as::<_, Vehicle>(&query)
            .bind(driver_id)
            .fetch_optional(db)
            .await
    }
}
