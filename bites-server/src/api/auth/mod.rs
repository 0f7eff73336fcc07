//! Registration, login and profile routes
//!
//! Register and login are public; the profile route requires the token
//! they hand out.

pub mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/auth/register", post(handler::register))
        .route("/api/auth/login", post(handler::login))
        .route("/api/auth/user-details", get(handler::user_details))
}
