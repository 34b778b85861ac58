//! Driver location history model.

use ridehail_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// An immutable location sample from `driver_locations`.
#[derive(Debug, Clone, FromRow)]
pub struct LocationSample {
    pub id: DbId,
    pub driver_id: DbId,
    pub latitude: f64,
    pub longitude: f64,
    pub heading: Option<f64>,
    pub speed: Option<f64>,
    pub accuracy: Option<f64>,
    pub is_online: bool,
    pub is_available: bool,
    pub recorded_at: Timestamp,
}

/// DTO for appending a location sample.
#[derive(Debug, Clone)]
pub struct CreateLocationSample {
    pub driver_id: DbId,
    pub latitude: f64,
    pub longitude: f64,
    pub heading: Option<f64>,
    pub speed: Option<f64>,
    pub accuracy: Option<f64>,
    pub is_online: bool,
    pub is_available: bool,
    pub recorded_at: Timestamp,
}
