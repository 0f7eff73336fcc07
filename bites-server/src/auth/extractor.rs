//! Request extractors for authenticated users
//!
//! `CurrentUser` validates the Bearer token on every extraction.
//! `AdminUser` wraps it and additionally requires the ADMIN role.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::jwt::{CurrentUser, JwtError, JwtService};
use crate::core::state::ServerState;
use crate::utils::AppError;

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(AppError::unauthorized)?;

        let token =
            JwtService::extract_from_header(auth_header).ok_or_else(AppError::unauthorized)?;

        let claims = state
            .get_jwt_service()
            .validate_token(token)
            .map_err(|e| match e {
                JwtError::ExpiredToken => AppError::token_expired(),
                _ => AppError::invalid_token(e.to_string()),
            })?;

        Ok(CurrentUser::from(claims))
    }
}

/// Extractor that only admits users with the ADMIN role
#[derive(Debug, Clone)]
pub struct AdminUser(pub CurrentUser);

impl FromRequestParts<ServerState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            return Err(AppError::forbidden("Admin role required"));
        }
        Ok(AdminUser(user))
    }
}
