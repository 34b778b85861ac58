//! Role gates built on [`AuthUser`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use ridehail_core::error::CoreError;
use ridehail_core::types::DbId;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the administrator flag. Rejects with 403 otherwise.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.claims.is_admin {
            return Err(AppError::Core(CoreError::Forbidden(
                "Administrator access required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires a driver profile on the token; exposes the driver id.
///
/// Approval status is not checked here. Operations that need an approved
/// driver check it against the store, since the token copy can be stale.
pub struct RequireDriver {
    pub user: AuthUser,
    pub driver_id: DbId,
}

impl FromRequestParts<AppState> for RequireDriver {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        let driver_id = user.claims.driver_id.filter(|_| user.claims.is_driver).ok_or_else(|| {
            AppError::Core(CoreError::Forbidden("Driver profile required".into()))
        })?;
        Ok(RequireDriver { user, driver_id })
    }
}
