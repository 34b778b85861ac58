//! Repository for the `accounts` table.

use ridehail_core::types::{DbId, Timestamp};
use sqlx::PgExecutor;

use crate::models::account::{Account, CreateAccount, FailedLogin};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, phone, password_hash, first_name, last_name, profile_image, \
                        is_admin, failed_login_count, locked_until, created_at, updated_at";

/// Provides CRUD and login-bookkeeping operations for accounts.
pub struct AccountRepo;

impl AccountRepo {
    /// Insert a new account, returning the created row.
    pub async fn create<'e>(
        db: impl PgExecutor<'e>,
        input: &CreateAccount,
    ) -> Result<Account, sqlx::Error> {
        let query = format!(
            "INSERT INTO accounts (email, phone, password_hash, first_name, last_name, profile_image)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Account>(&query)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.password_hash)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.profile_image)
            .fetch_one(db)
            .await
    }

    pub async fn find_by_id<'e>(
        db: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE id = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
    }

    /// Find an account by email (case-sensitive).
    pub async fn find_by_email<'e>(
        db: impl PgExecutor<'e>,
        email: &str,
    ) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE email = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(email)
            .fetch_optional(db)
            .await
    }

    pub async fn find_by_phone<'e>(
        db: impl PgExecutor<'e>,
        phone: &str,
    ) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE phone = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(phone)
            .fetch_optional(db)
            .await
    }

    /// Count one failed login and lock the account once the counter reaches
    /// `max_attempts`.
    ///
    /// The increment happens in the database, so concurrent failures all
    /// count. Returns the counter and lock after the update, or `None` if
    /// the account does not exist.
    pub async fn record_failed_login<'e>(
        db: impl PgExecutor<'e>,
        id: DbId,
        max_attempts: i32,
        lock_until: Timestamp,
    ) -> Result<Option<FailedLogin>, sqlx::Error> {
        sqlx::query_as::<_, FailedLogin>(
            "UPDATE accounts SET
                failed_login_count = failed_login_count + 1,
                locked_until = CASE
                    WHEN failed_login_count + 1 >= $2 THEN $3
                    ELSE locked_until
                END
             WHERE id = $1
             RETURNING failed_login_count, locked_until",
        )
        .bind(id)
        .bind(max_attempts)
        .bind(lock_until)
        .fetch_optional(db)
        .await
    }

    /// Record a successful login: reset `failed_login_count` and clear `locked_until`.
    pub async fn record_successful_login<'e>(
        db: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE accounts SET failed_login_count = 0, locked_until = NULL WHERE id = $1",
        )
        .bind(id)
        .execute(db)
        .await?;
        Ok(())
    }

    /// Update an account's password hash. Returns `true` if the row was updated.
    pub async fn update_password<'e>(
        db: impl PgExecutor<'e>,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE accounts SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace the password and lift any lockout in one statement.
    pub async fn reset_password<'e>(
        db: impl PgExecutor<'e>,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE accounts SET
                password_hash = $2,
                failed_login_count = 0,
                locked_until = NULL
             WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Grant or revoke the administrator flag.
    pub async fn set_admin<'e>(
        db: impl PgExecutor<'e>,
        id: DbId,
        is_admin: bool,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE accounts SET is_admin = $2 WHERE id = $1")
            .bind(id)
            .bind(is_admin)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
