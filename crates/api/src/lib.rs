//! Ride-hailing API server library.
//!
//! Exposes config, state, error handling, services and routes so the binary
//! entrypoint and the integration tests build the exact same application.

pub mod auth;
pub mod background;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod services;
pub mod state;
