//! Push notification handlers

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::auth::AdminUser;
use crate::core::ServerState;
use crate::db::models::{PushSubscription, SubscriptionCreate};
use crate::db::repository::SubscriptionRepository;
use crate::services::NotifierEvent;
use crate::utils::{ApiResponse, AppError, AppResult, ok, ok_empty, ok_with_message};

#[derive(Debug, Serialize)]
pub struct VapidKeyResponse {
    pub public_key: String,
}

#[derive(Debug, Deserialize)]
pub struct UnsubscribeRequest {
    pub endpoint: String,
}

/// Channel configuration and subscription count for troubleshooting
#[derive(Debug, Serialize)]
pub struct NotificationDebugInfo {
    pub subscriptions: usize,
    pub push_configured: bool,
    pub email_configured: bool,
}

/// GET /api/notification/vapid-public-key (public)
pub async fn vapid_public_key(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<VapidKeyResponse>>> {
    let public_key = state
        .config
        .vapid_public_key
        .clone()
        .ok_or_else(|| AppError::not_found("Push notifications are not configured"))?;
    Ok(ok(VapidKeyResponse { public_key }))
}

/// POST /api/notification/admin/subscribe (admin)
pub async fn subscribe(
    _admin: AdminUser,
    State(state): State<ServerState>,
    Json(payload): Json<SubscriptionCreate>,
) -> AppResult<Json<ApiResponse<PushSubscription>>> {
    let repo = SubscriptionRepository::new(state.get_db());
    let sub = repo.upsert(payload).await?;
    tracing::info!(endpoint = %sub.masked_endpoint(), "Push subscription stored");
    Ok(ok_with_message(sub, "Subscription saved"))
}

/// POST /api/notification/admin/unsubscribe (admin)
pub async fn unsubscribe(
    _admin: AdminUser,
    State(state): State<ServerState>,
    Json(payload): Json<UnsubscribeRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let repo = SubscriptionRepository::new(state.get_db());
    repo.remove_by_endpoint(&payload.endpoint).await?;
    Ok(ok_empty("Subscription removed"))
}

/// POST /api/notification/admin/test (admin)
pub async fn test(
    _admin: AdminUser,
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.notifier.notifier().notify(NotifierEvent::Test);
    Ok(ok_empty("Test notification queued"))
}

/// GET /api/notification/admin/debug (admin)
pub async fn debug(
    _admin: AdminUser,
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<NotificationDebugInfo>>> {
    let repo = SubscriptionRepository::new(state.get_db());
    Ok(ok(NotificationDebugInfo {
        subscriptions: repo.count().await?,
        push_configured: state.config.vapid_private_key.is_some(),
        email_configured: state.config.resend_api_key.is_some()
            && state.config.admin_email.is_some(),
    }))
}
