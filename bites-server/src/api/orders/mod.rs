//! Order routes
//!
//! Checkout and the user's own history require a logged-in user; the
//! fulfillment console requires the ADMIN role (enforced per handler).

pub mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/order", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/cash-on-delivery", post(handler::cash_on_delivery))
        .route("/order-list", get(handler::order_list))
        .route("/cancel", put(handler::cancel))
        .route("/admin/all", get(handler::admin_all))
        .route("/admin/update-delivered", put(handler::update_delivered))
}
