//! Delivery address handlers

use axum::Json;
use axum::extract::{Path, State};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Address, AddressCreate, AddressUpdate};
use crate::db::repository::AddressRepository;
use crate::utils::{ApiResponse, AppError, AppResult, ok, ok_with_message};

/// GET /api/address
pub async fn list(
    user: CurrentUser,
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<Address>>>> {
    let repo = AddressRepository::new(state.get_db());
    let addresses = repo.find_active_for_user(&user.record_id()?).await?;
    Ok(ok(addresses))
}

/// POST /api/address
pub async fn create(
    user: CurrentUser,
    State(state): State<ServerState>,
    Json(payload): Json<AddressCreate>,
) -> AppResult<Json<ApiResponse<Address>>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = AddressRepository::new(state.get_db());
    let address = repo.create(user.record_id()?, payload).await?;
    Ok(ok_with_message(address, "Address created"))
}

/// PUT /api/address/{id}
pub async fn update(
    user: CurrentUser,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<AddressUpdate>,
) -> AppResult<Json<ApiResponse<Address>>> {
    let repo = AddressRepository::new(state.get_db());
    let address = find_owned(&repo, &id, &user).await?;

    let id = address
        .id
        .as_ref()
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal("Address row missing id"))?;
    let updated = repo.update(&id, payload).await?;
    Ok(ok_with_message(updated, "Address updated"))
}

/// DELETE /api/address/{id} (soft delete)
pub async fn remove(
    user: CurrentUser,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Address>>> {
    let repo = AddressRepository::new(state.get_db());
    let address = find_owned(&repo, &id, &user).await?;

    let id = address
        .id
        .as_ref()
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal("Address row missing id"))?;
    let disabled = repo.disable(&id).await?;
    Ok(ok_with_message(disabled, "Address removed"))
}

async fn find_owned(repo: &AddressRepository, id: &str, user: &CurrentUser) -> AppResult<Address> {
    let address = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Address {} not found", id)))?;
    if address.user != user.record_id()? {
        return Err(AppError::forbidden("Address belongs to another user"));
    }
    Ok(address)
}
