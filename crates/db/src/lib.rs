//! PostgreSQL persistence for accounts, sessions, driver locations, rides,
//! and the authentication audit trail.
//!
//! - [`models`] -- row structs and create DTOs.
//! - [`repositories`] -- zero-sized repository structs.

use sqlx::postgres::PgPoolOptions;
use sqlx::{Postgres, Transaction};

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// A transaction on the shared pool.
pub type DbTransaction = Transaction<'static, Postgres>;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}

/// Begin a transaction at READ COMMITTED isolation.
///
/// Multi-step writes (registration, refresh rotation, ride acceptance) run
/// inside one of these and rely on conditional `UPDATE ... WHERE` predicates
/// plus unique constraints, not application locks, to judge races.
pub async fn begin_read_committed(pool: &DbPool) -> Result<DbTransaction, sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL READ COMMITTED")
        .execute(&mut *tx)
        .await?;
    Ok(tx)
}
