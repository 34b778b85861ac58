//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept any [`sqlx::PgExecutor`] as the first argument, so the same
//! query runs against `&PgPool` or inside a transaction (`&mut *tx`).

pub mod account_repo;
pub mod auth_log_repo;
pub mod driver_repo;
pub mod location_repo;
pub mod passenger_repo;
pub mod ride_repo;
pub mod session_repo;
pub mod vehicle_repo;

pub use account_repo::AccountRepo;
pub use auth_log_repo::AuthLogRepo;
pub use driver_repo::DriverRepo;
pub use location_repo::LocationRepo;
pub use passenger_repo::PassengerRepo;
pub use ride_repo::RideRepo;
pub use session_repo::SessionRepo;
pub use vehicle_repo::VehicleRepo;
