//! Web layer for the travel alarm.
//!
//! Exposes route resolution, journey setup and proximity checks as JSON
//! endpoints. Every `/api` call except session creation names its session
//! in the `x-session-id` header.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, SESSION_HEADER, create_router};
pub use state::AppState;
