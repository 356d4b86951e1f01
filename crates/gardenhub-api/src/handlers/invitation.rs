//! Invitation handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::warn;
use uuid::Uuid;

use gardenhub_core::error::AppError;
use gardenhub_service::invitation::{
    CreateInvitationRequest as SvcCreateInvitation, InvitationAction,
};

use crate::dto::request::{CreateInvitationRequest, RespondInvitationRequest};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidJson};
use crate::state::AppState;

/// POST /garden-invitations
///
/// Invitations are garden-scoped; a body naming a location is refused.
pub async fn create_invitation(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<CreateInvitationRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    if let Some(location_id) = req.garden_location_id {
        warn!(
            user_id = %auth.user_id,
            garden_location_id = %location_id,
            "Client sent a location-scoped invitation"
        );
        return Err(AppError::validation(
            "Invitations are scoped to gardens; send gardenId instead of gardenLocationId",
        )
        .into());
    }
    let garden_id = req
        .garden_id
        .ok_or_else(|| AppError::validation("gardenId is required"))?;

    let invitation = state
        .invitation_service
        .create_invitation(
            &auth,
            SvcCreateInvitation {
                garden_id,
                email: req.email,
                role: req.role,
                message: req.message,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "success": true, "id": invitation.id, "data": invitation })),
    ))
}

/// GET /garden-invitations
pub async fn list_my_invitations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let invitations = state.invitation_service.list_pending_for_user(&auth).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": invitations })))
}

/// GET /gardens/{id}/invitations
pub async fn list_garden_invitations(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(garden_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let invitations = state
        .invitation_service
        .list_pending_for_garden(&auth, garden_id)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": invitations })))
}

/// PATCH /garden-invitations/{id}
pub async fn respond_to_invitation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidJson(req): ValidJson<RespondInvitationRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let action: InvitationAction = req.action.parse()?;
    let resolution = state.invitation_service.respond(&auth, id, action).await?;

    let message = match action {
        InvitationAction::Accept => "Invitation accepted",
        InvitationAction::Decline => "Invitation declined",
    };
    Ok(Json(serde_json::json!({
        "success": true,
        "message": message,
        "data": resolution,
    })))
}
