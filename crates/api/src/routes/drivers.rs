//! Route definitions for the `/drivers` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::drivers;
use crate::state::AppState;

/// Routes mounted at `/drivers`.
///
/// ```text
/// PUT /me/location    -> update_location (driver only)
/// GET /{id}/location  -> get_location (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me/location", put(drivers::update_location))
        .route("/{id}/location", get(drivers::get_location))
}
