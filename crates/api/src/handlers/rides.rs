//! Handlers for the `/rides` resource.

use axum::extract::{Path, State};
use axum::Json;
use ridehail_core::geo::Coordinates;
use ridehail_core::types::DbId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::rbac::RequireDriver;
use crate::services::rides::{AcceptOutcome, AcceptRequest, AcceptedRide, RejectReason};
use crate::state::AppState;

/// Request body for `POST /rides/{id}/accept`.
#[derive(Debug, Deserialize, Validate)]
pub struct AcceptRideRequest {
    pub current_location: Coordinates,
    #[validate(range(min = 0, max = 240, message = "Pickup estimate must be 0 to 240 minutes"))]
    pub estimated_pickup_minutes: i64,
}

/// Both outcomes answer 200; `success` tells them apart so a client that
/// lost the race can move on to another ride.
#[derive(Debug, Serialize)]
pub struct AcceptRideResponse {
    pub success: bool,
    pub data: Option<AcceptedRide>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<RejectReason>,
    pub message: &'static str,
}

impl From<AcceptOutcome> for AcceptRideResponse {
    fn from(outcome: AcceptOutcome) -> Self {
        match outcome {
            AcceptOutcome::Accepted(ride) => Self {
                success: true,
                data: Some(ride),
                reason: None,
                message: "Ride accepted",
            },
            AcceptOutcome::Rejected { reason } => Self {
                success: false,
                data: None,
                reason: Some(reason),
                message: reason.message(),
            },
        }
    }
}

/// POST /api/v1/rides/{id}/accept
pub async fn accept_ride(
    State(state): State<AppState>,
    driver: RequireDriver,
    Path(ride_id): Path<DbId>,
    Json(input): Json<AcceptRideRequest>,
) -> AppResult<Json<AcceptRideResponse>> {
    input.validate()?;

    let outcome = state
        .rides
        .accept_ride(AcceptRequest {
            driver_id: driver.driver_id,
            ride_id,
            current_location: input.current_location,
            estimated_pickup_minutes: input.estimated_pickup_minutes,
        })
        .await?;

    Ok(Json(outcome.into()))
}
