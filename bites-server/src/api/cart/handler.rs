//! Cart handlers
//!
//! Every operation is scoped to the authenticated user; touching another
//! user's cart line is rejected.

use axum::Json;
use axum::extract::{Path, State};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{CartItem, CartItemCreate, CartItemFull, CartItemUpdate};
use crate::db::repository::{CartRepository, ProductRepository};
use crate::utils::{ApiResponse, AppError, AppResult, ok, ok_empty, ok_with_message};

/// GET /api/cart
pub async fn list(
    user: CurrentUser,
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<CartItemFull>>>> {
    let user_id = user.record_id()?;
    let cart = CartRepository::new(state.get_db());
    let products = ProductRepository::new(state.get_db());

    let items = cart.find_for_user(&user_id).await?;
    let mut full = Vec::with_capacity(items.len());
    for item in items {
        let product = products.find_by_id(&item.product.to_string()).await?;
        full.push(CartItemFull { item, product });
    }
    Ok(ok(full))
}

/// POST /api/cart
pub async fn add(
    user: CurrentUser,
    State(state): State<ServerState>,
    Json(payload): Json<CartItemCreate>,
) -> AppResult<Json<ApiResponse<CartItem>>> {
    let user_id = user.record_id()?;
    let products = ProductRepository::new(state.get_db());

    let product = products
        .find_by_id(&payload.product_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", payload.product_id)))?;
    let product_id = product
        .id
        .ok_or_else(|| AppError::internal("Product row missing id"))?;

    let cart = CartRepository::new(state.get_db());
    let item = cart.add(user_id, product_id, payload.quantity).await?;
    Ok(ok_with_message(item, "Item added to cart"))
}

/// PUT /api/cart/{id}
pub async fn update_quantity(
    user: CurrentUser,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CartItemUpdate>,
) -> AppResult<Json<ApiResponse<CartItem>>> {
    let cart = CartRepository::new(state.get_db());
    let item = find_owned(&cart, &id, &user).await?;

    let id = item
        .id
        .as_ref()
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal("Cart line missing id"))?;
    let updated = cart.set_quantity(&id, payload.quantity).await?;
    Ok(ok_with_message(updated, "Cart updated"))
}

/// DELETE /api/cart/{id}
pub async fn remove(
    user: CurrentUser,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let cart = CartRepository::new(state.get_db());
    let item = find_owned(&cart, &id, &user).await?;

    let id = item
        .id
        .as_ref()
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal("Cart line missing id"))?;
    cart.remove(&id).await?;
    Ok(ok_empty("Item removed from cart"))
}

async fn find_owned(cart: &CartRepository, id: &str, user: &CurrentUser) -> AppResult<CartItem> {
    let item = cart
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Cart item {} not found", id)))?;
    if item.user != user.record_id()? {
        return Err(AppError::forbidden("Cart item belongs to another user"));
    }
    Ok(item)
}
