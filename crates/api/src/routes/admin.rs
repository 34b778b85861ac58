use axum::routing::put;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`. Every handler requires [`RequireAdmin`].
///
/// ```text
/// PUT /drivers/{id}/status  -> update_driver_status
/// ```
///
/// [`RequireAdmin`]: crate::middleware::rbac::RequireAdmin
pub fn router() -> Router<AppState> {
    Router::new().route("/drivers/{id}/status", put(admin::update_driver_status))
}
