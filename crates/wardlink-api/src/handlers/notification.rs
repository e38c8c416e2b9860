//! Notification dashboard handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use wardlink_entity::notification::Notification;

use crate::dto::response::{ApiResponse, CountResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthAccount;
use crate::state::AppState;

/// GET /api/notifications
pub async fn list_unread(
    State(state): State<AppState>,
    auth: AuthAccount,
) -> Result<Json<ApiResponse<Vec<Notification>>>, ApiError> {
    let unread = state.notification_service.unread(&auth).await?;
    Ok(Json(ApiResponse::ok(unread)))
}

/// GET /api/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthAccount,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    let count = state.notification_service.unread_count(&auth).await?;
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}

/// POST /api/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.notification_service.mark_read(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Marked as read".to_string(),
    })))
}
