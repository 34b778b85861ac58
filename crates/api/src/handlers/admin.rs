//! Handlers for the `/admin` resource.

use axum::extract::{Path, State};
use axum::Json;
use ridehail_core::status::DriverStatus;
use ridehail_core::types::DbId;
use ridehail_db::models::account::Driver;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /admin/drivers/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateDriverStatusRequest {
    pub status: DriverStatus,
}

/// PUT /api/v1/admin/drivers/{id}/status
pub async fn update_driver_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(driver_id): Path<DbId>,
    Json(input): Json<UpdateDriverStatusRequest>,
) -> AppResult<Json<DataResponse<Driver>>> {
    tracing::info!(
        admin_id = admin.account_id,
        driver_id,
        status = %input.status,
        "Admin updating driver status"
    );
    let driver = state
        .auth
        .update_driver_status(driver_id, input.status)
        .await?;
    Ok(Json(DataResponse { data: driver }))
}
