//! Link request workflow handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use wardlink_entity::link_request::LinkDecision;

use crate::dto::request::{CreateLinkRequest, LinkDecisionRequest};
use crate::dto::response::{AccountResponse, ApiResponse, LinkRequestResponse};
use crate::error::ApiError;
use crate::extractors::AuthAccount;
use crate::state::AppState;

/// POST /api/link-requests
pub async fn create_link_request(
    State(state): State<AppState>,
    auth: AuthAccount,
    Json(req): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LinkRequestResponse>>), ApiError> {
    let request = state
        .link_service
        .request_link(&auth, &req.guardian_phone_number)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(request.into()))))
}

/// GET /api/link-requests/pending
pub async fn pending_requests(
    State(state): State<AppState>,
    auth: AuthAccount,
) -> Result<Json<ApiResponse<Vec<LinkRequestResponse>>>, ApiError> {
    let pending = state.link_service.pending_requests(&auth).await?;
    let items = pending.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::ok(items)))
}

/// POST /api/link-requests/{id}/decision
pub async fn decide_request(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(id): Path<Uuid>,
    Json(req): Json<LinkDecisionRequest>,
) -> Result<Json<ApiResponse<LinkRequestResponse>>, ApiError> {
    let decision: LinkDecision = req.decision.parse()?;
    let updated = state.link_service.decide_request(&auth, id, decision).await?;
    Ok(Json(ApiResponse::ok(updated.into())))
}

/// GET /api/accounts/me/dependents
pub async fn list_dependents(
    State(state): State<AppState>,
    auth: AuthAccount,
) -> Result<Json<ApiResponse<Vec<AccountResponse>>>, ApiError> {
    let dependents = state.link_service.dependents(&auth).await?;
    let items = dependents.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::ok(items)))
}
