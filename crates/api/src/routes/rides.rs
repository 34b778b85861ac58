//! Route definitions for the `/rides` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::rides;
use crate::state::AppState;

/// Routes mounted at `/rides`.
///
/// ```text
/// POST /{id}/accept  -> accept_ride (driver only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/accept", post(rides::accept_ride))
}
