//! Account, driver, passenger, and vehicle models.

use ridehail_core::error::CoreError;
use ridehail_core::status::DriverStatus;
use ridehail_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

/// Full account row from the `accounts` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: DbId,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub profile_image: Option<String>,
    pub is_admin: bool,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Account {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Counter state returned by a failed login update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct FailedLogin {
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
}

/// DTO for creating a new account.
#[derive(Debug, Clone)]
pub struct CreateAccount {
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub profile_image: Option<String>,
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// A driver profile row from the `drivers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Driver {
    pub id: DbId,
    pub account_id: DbId,
    pub license_number: String,
    pub license_expiry_date: Timestamp,
    pub account_status: String,
    pub background_check_status: String,
    pub is_online: bool,
    pub is_available: bool,
    pub is_active_trip: bool,
    pub current_latitude: Option<f64>,
    pub current_longitude: Option<f64>,
    pub last_location_update: Option<Timestamp>,
    pub average_rating: f64,
    pub total_rides: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Driver {
    /// Parse the stored approval status.
    pub fn status(&self) -> Result<DriverStatus, CoreError> {
        self.account_status.parse()
    }
}

/// DTO for creating a driver profile.
#[derive(Debug, Clone)]
pub struct CreateDriver {
    pub account_id: DbId,
    pub license_number: String,
    pub license_expiry_date: Timestamp,
}

/// New denormalized position written on every accepted location ping.
#[derive(Debug, Clone, Copy)]
pub struct DriverPosition {
    pub latitude: f64,
    pub longitude: f64,
    pub is_online: bool,
    pub is_available: bool,
    pub recorded_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Passenger
// ---------------------------------------------------------------------------

/// A passenger profile row from the `passengers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Passenger {
    pub id: DbId,
    pub account_id: DbId,
    pub average_rating: f64,
    pub total_rides: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Vehicle
// ---------------------------------------------------------------------------

/// A vehicle row from the `vehicles` table. Each driver owns at most one.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vehicle {
    pub id: DbId,
    pub driver_id: DbId,
    pub model: String,
    pub color: String,
    pub license_plate: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a vehicle to a driver.
#[derive(Debug, Clone)]
pub struct CreateVehicle {
    pub driver_id: DbId,
    pub model: String,
    pub color: String,
    pub license_plate: String,
}
