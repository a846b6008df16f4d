//! frag-axum: Axum adapter for the Fragrs service.
//!
//! Builds the HTTP router over a [`frag_store::FragmentStore`] backend:
//! Basic-auth protected `/v1/fragments` routes, health check, response
//! envelope, and error-to-status mapping.

pub mod app;
pub mod auth;
pub mod response;
pub mod routes;
pub mod state;
mod error;

pub use app::router;
pub use auth::{owner_id, BasicUsers, Owner};
pub use error::ApiError;
pub use state::AppState;
