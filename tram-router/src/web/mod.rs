//! Web layer for the tram router.
//!
//! Provides HTTP endpoints for listing stops and finding routes.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
