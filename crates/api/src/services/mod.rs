//! Service layer: the stateful flows behind the HTTP handlers.
//!
//! Each service owns its collaborators (pool, caches, clock, dispatchers)
//! and is shared through [`AppState`](crate::state::AppState) as an `Arc`.

pub mod auth;
pub mod location;
pub mod rides;

pub use auth::AuthService;
pub use location::LocationService;
pub use rides::RideService;
