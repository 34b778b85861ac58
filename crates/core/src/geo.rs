//! Great-circle distance and arrival-time estimates.
//!
//! Pure functions, no I/O. Distances are in kilometres, speeds in metres per
//! second as reported by the driver's device.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Cruising speed assumed when the device reports no usable speed.
pub const DEFAULT_SPEED_KMH: f64 = 30.0;

/// m/s -> km/h.
const MPS_TO_KMH: f64 = 3.6;

/// A WGS-84 point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Reject NaN and out-of-range values.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(CoreError::Validation(format!(
                "Latitude must be between -90 and 90, got {}",
                self.latitude
            )));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(CoreError::Validation(format!(
                "Longitude must be between -180 and 180, got {}",
                self.longitude
            )));
        }
        Ok(())
    }
}

/// Haversine distance between two points in kilometres.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Estimated minutes to cover `distance_km`.
///
/// Uses the sampled speed when it is positive, otherwise
/// [`DEFAULT_SPEED_KMH`]. Always rounds up.
pub fn eta_minutes(distance_km: f64, speed_mps: Option<f64>) -> i64 {
    let speed_kmh = match speed_mps {
        Some(s) if s > 0.0 => s * MPS_TO_KMH,
        _ => DEFAULT_SPEED_KMH,
    };
    (distance_km / speed_kmh * 60.0).ceil() as i64
}

/// Distance and arrival estimate toward a target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EtaEstimate {
    /// Rounded to two decimals.
    pub distance_km: f64,
    pub minutes: i64,
}

/// Estimate arrival from `from` to `to` given an optional speed sample.
pub fn estimate(from: Coordinates, to: Coordinates, speed_mps: Option<f64>) -> EtaEstimate {
    let distance = distance_km(from.latitude, from.longitude, to.latitude, to.longitude);
    EtaEstimate {
        distance_km: (distance * 100.0).round() / 100.0,
        minutes: eta_minutes(distance, speed_mps),
    }
}
