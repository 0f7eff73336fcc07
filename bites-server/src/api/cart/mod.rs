//! Cart routes (all require a logged-in user)

pub mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/cart", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::add))
        .route(
            "/{id}",
            axum::routing::put(handler::update_quantity).delete(handler::remove),
        )
}
