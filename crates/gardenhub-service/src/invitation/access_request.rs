//! Access requests: invitations a prospective member files for themselves.
//!
//! An access request is stored as an ordinary pending invitation with
//! role `member`, the requester as both inviter and addressee, and an
//! auto-generated message. It is approved through the normal accept
//! path by someone who can manage the garden's members.

use std::sync::Arc;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use gardenhub_core::config::InvitationConfig;
use gardenhub_core::error::AppError;
use gardenhub_database::Store;
use gardenhub_entity::invitation::{CreateInvitation, GardenInvitation};
use gardenhub_entity::membership::GardenRole;

use super::service::normalize_email;
use crate::context::RequestContext;

/// Request to join a garden.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessRequest {
    pub garden_id: Uuid,
    /// Optional note appended to the generated message.
    pub message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AccessRequestService {
    store: Arc<dyn Store>,
    ttl: Duration,
}

impl AccessRequestService {
    pub fn new(store: Arc<dyn Store>, config: &InvitationConfig) -> Self {
        Self {
            store,
            ttl: Duration::days(config.ttl_days),
        }
    }

    /// Files an access request for the caller.
    ///
    /// Owners and members cannot request access, and a caller with a live
    /// request or invitation for the garden cannot file another.
    pub async fn request_access(
        &self,
        ctx: &RequestContext,
        req: AccessRequest,
    ) -> Result<GardenInvitation, AppError> {
        let email = normalize_email(&ctx.email)?;

        let mut uow = self.store.begin().await?;
        let garden = uow
            .find_garden(req.garden_id)
            .await?
            .ok_or_else(|| AppError::not_found("Garden not found"))?;

        if garden.is_owned_by(ctx.user_id)
            || uow
                .find_membership(garden.id, ctx.user_id)
                .await?
                .is_some()
        {
            return Err(AppError::conflict("You are already a member of this garden"));
        }

        if uow
            .find_live_invitation(garden.id, &email, ctx.request_time)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(
                "A pending invitation or access request already exists for this garden",
            ));
        }

        let mut message = format!("{} requested access to {}", ctx.username, garden.name);
        if let Some(note) = req.message.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            message.push_str(": ");
            message.push_str(note);
        }

        let invitation = uow
            .insert_invitation(&CreateInvitation {
                garden_id: garden.id,
                invited_by_user_id: ctx.user_id,
                invited_user_email: email,
                invited_user_id: Some(ctx.user_id),
                role: GardenRole::Member,
                message: Some(message),
                is_access_request: true,
                expires_at: ctx.request_time + self.ttl,
            })
            .await?;
        uow.commit().await?;

        info!(
            user_id = %ctx.user_id,
            garden_id = %garden.id,
            invitation_id = %invitation.id,
            "Access requested"
        );

        Ok(invitation)
    }
}
