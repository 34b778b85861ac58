//! Repository for the `passengers` table.

use ridehail_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::account::Passenger;

const COLUMNS: &str = "id, account_id, average_rating, total_rides, created_at, updated_at";

pub struct PassengerRepo;

impl PassengerRepo {
    /// Create the passenger profile for an account.
    pub async fn create<'e>(
        db: impl PgExecutor<'e>,
        account_id: DbId,
    ) -> Result<Passenger, sqlx::Error> {
        let query = format!(
            "INSERT INTO passengers (account_id) VALUES ($1) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Passenger>(&query)
            .bind(account_id)
            .fetch_one(db)
            .await
    }

    pub async fn find_by_account_id<'e>(
        db: impl PgExecutor<'e>,
        account_id: DbId,
    ) -> Result<Option<Passenger>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM passengers WHERE account_id = $1");
        sqlx::query_as::<_, Passenger>(&query)
            .bind(account_id)
            .fetch_optional(db)
            .await
    }
}
