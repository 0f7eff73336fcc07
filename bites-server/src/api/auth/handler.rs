//! Registration and login handlers

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Role, UserCreate, UserInfo};
use crate::db::repository::UserRepository;
use crate::utils::{ApiResponse, AppError, AppResult, ok, ok_with_message};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<ApiResponse<UserInfo>>> {
    if payload.name.trim().is_empty() || payload.email.trim().is_empty() {
        return Err(AppError::validation("Provide name, email and password"));
    }
    if payload.password.len() < 8 {
        return Err(AppError::validation(
            "Password must be at least 8 characters",
        ));
    }

    let repo = UserRepository::new(state.get_db());
    let user = repo.create(payload, Role::User).await?;

    tracing::info!(email = %user.email, "User registered");
    Ok(ok_with_message(
        UserInfo::from(&user),
        "User registered successfully",
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let repo = UserRepository::new(state.get_db());

    let user = repo
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    let valid = user
        .verify_password(&payload.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
    if !valid {
        return Err(AppError::invalid_credentials());
    }

    let user_id = user
        .id
        .as_ref()
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal("User row missing id"))?;

    let token = state
        .get_jwt_service()
        .generate_token(&user_id, &user.name, user.role)
        .map_err(|e| AppError::internal(format!("Token generation failed: {}", e)))?;

    tracing::info!(email = %user.email, "User logged in");
    Ok(ok_with_message(
        LoginResponse {
            token,
            user: UserInfo::from(&user),
        },
        "Login successful",
    ))
}

/// GET /api/auth/user-details
///
/// The profile behind the presented token, fresh from the database.
pub async fn user_details(
    user: CurrentUser,
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<UserInfo>>> {
    let repo = UserRepository::new(state.get_db());
    let found = repo
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(ok(UserInfo::from(&found)))
}
