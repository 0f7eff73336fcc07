//! Push notification routes
//!
//! The VAPID public key is public (browsers need it before login); the
//! subscription management routes are admin-only.

pub mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/notification", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/vapid-public-key", get(handler::vapid_public_key))
        .route("/admin/subscribe", post(handler::subscribe))
        .route("/admin/unsubscribe", post(handler::unsubscribe))
        .route("/admin/test", post(handler::test))
        .route("/admin/debug", get(handler::debug))
}
