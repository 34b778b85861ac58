pub mod admin;
pub mod auth;
pub mod drivers;
pub mod health;
pub mod rides;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                     register (public)
/// /auth/login                        login (public)
/// /auth/refresh                      refresh (public)
/// /auth/logout                       logout (requires auth)
/// /auth/me                           current profile (requires auth)
/// /auth/forgot-password              start password reset (public)
/// /auth/reset-password               complete password reset (public)
/// /auth/change-password              change password (requires auth)
///
/// /drivers/me/location               report position (driver only)
/// /drivers/{id}/location             latest position (requires auth)
///
/// /rides/{id}/accept                 accept a requested ride (driver only)
///
/// /admin/drivers/{id}/status         approve / reject / suspend (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/drivers", drivers::router())
        .nest("/rides", rides::router())
        .nest("/admin", admin::router())
}
