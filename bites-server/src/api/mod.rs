//! API route modules
//!
//! - [`health`] - liveness check
//! - [`auth`] - registration and login
//! - [`products`] - product catalog
//! - [`cart`] - cart line items
//! - [`addresses`] - delivery addresses
//! - [`orders`] - checkout and fulfillment
//! - [`notifications`] - push subscription management

pub mod addresses;
pub mod auth;
pub mod cart;
pub mod health;
pub mod notifications;
pub mod orders;
pub mod products;

use axum::Router;

use crate::core::ServerState;

/// Assemble the full application router
pub fn create_router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(products::router())
        .merge(cart::router())
        .merge(addresses::router())
        .merge(orders::router())
        .merge(notifications::router())
        .with_state(state)
}
