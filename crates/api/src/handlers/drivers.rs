//! Handlers for driver location.

use axum::extract::{Path, State};
use axum::Json;
use ridehail_cache::LocationSnapshot;
use ridehail_core::geo::Coordinates;
use ridehail_core::types::DbId;
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireDriver;
use crate::response::DataResponse;
use crate::services::location::{LocationPing, LocationUpdate};
use crate::state::AppState;

/// Request body for `PUT /drivers/me/location`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLocationRequest {
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude out of range"))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "Longitude out of range"))]
    pub longitude: f64,
    #[validate(range(min = 0.0, max = 360.0, message = "Heading must be 0 to 360 degrees"))]
    pub heading: Option<f64>,
    /// Metres per second.
    #[validate(range(min = 0.0, message = "Speed must not be negative"))]
    pub speed: Option<f64>,
    #[validate(range(min = 0.0, message = "Accuracy must not be negative"))]
    pub accuracy: Option<f64>,
    pub is_online: bool,
    pub is_available: bool,
}

/// PUT /api/v1/drivers/me/location
///
/// At most one accepted ping per driver per rate-limit window; the rest get
/// 429. Includes an ETA when the driver is serving a ride.
pub async fn update_location(
    State(state): State<AppState>,
    driver: RequireDriver,
    Json(input): Json<UpdateLocationRequest>,
) -> AppResult<Json<DataResponse<LocationUpdate>>> {
    input.validate()?;

    let update = state
        .locations
        .record_location(
            driver.driver_id,
            LocationPing {
                position: Coordinates::new(input.latitude, input.longitude),
                heading: input.heading,
                speed: input.speed,
                accuracy: input.accuracy,
                is_online: input.is_online,
                is_available: input.is_available,
            },
        )
        .await?;

    Ok(Json(DataResponse { data: update }))
}

/// GET /api/v1/drivers/{id}/location
///
/// `data` is `null` when the driver has never reported a position.
pub async fn get_location(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(driver_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Option<LocationSnapshot>>>> {
    let snapshot = state.locations.read_location(driver_id).await?;
    Ok(Json(DataResponse { data: snapshot }))
}
