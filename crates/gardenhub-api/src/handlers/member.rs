//! Garden membership handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use crate::dto::request::{ChangeRoleRequest, MembersQuery};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidJson};
use crate::state::AppState;

/// GET /garden-members?gardenId=...
pub async fn list_members(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<MembersQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let members = state
        .membership_service
        .list_members(&auth, query.garden_id)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": members })))
}

/// PATCH /garden-members/{id}
pub async fn change_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidJson(req): ValidJson<ChangeRoleRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let membership = state
        .membership_service
        .change_role(&auth, id, &req.role)
        .await?;
    let permissions = membership.permissions();
    Ok(Json(serde_json::json!({
        "success": true,
        "data": { "membership": membership, "permissions": permissions }
    })))
}

/// DELETE /garden-members/{id}
pub async fn remove_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.membership_service.remove_member(&auth, id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Member removed" } }),
    ))
}
