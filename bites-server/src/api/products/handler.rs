//! Product catalog handlers

use axum::Json;
use axum::extract::{Path, State};

use crate::auth::AdminUser;
use crate::core::ServerState;
use crate::db::models::{Product, ProductCreate, ProductUpdate};
use crate::db::repository::ProductRepository;
use crate::utils::{ApiResponse, AppError, AppResult, ok, ok_empty, ok_with_message};

/// GET /api/product
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<Product>>>> {
    let repo = ProductRepository::new(state.get_db());
    let products = repo.find_all_published().await?;
    Ok(ok(products))
}

/// GET /api/product/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let repo = ProductRepository::new(state.get_db());
    let product = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", id)))?;
    Ok(ok(product))
}

/// POST /api/product (admin)
pub async fn create(
    _admin: AdminUser,
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let repo = ProductRepository::new(state.get_db());
    let product = repo.create(payload).await?;
    tracing::info!(name = %product.name, "Product created");
    Ok(ok_with_message(product, "Product created"))
}

/// PUT /api/product/{id} (admin)
pub async fn update(
    _admin: AdminUser,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let repo = ProductRepository::new(state.get_db());
    let product = repo.update(&id, payload).await?;
    Ok(ok_with_message(product, "Product updated"))
}

/// DELETE /api/product/{id} (admin)
pub async fn delete(
    _admin: AdminUser,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let repo = ProductRepository::new(state.get_db());
    repo.delete(&id).await?;
    Ok(ok_empty("Product deleted"))
}
