//! The invitation workflow.
//!
//! ```text
//! pending ──accept──▶ accepted   (membership provisioned in the same unit of work)
//!    │
//!    └────decline──▶ declined
//! ```
//!
//! `expired` is never written: a pending invitation whose `expires_at`
//! has passed is treated as expired when it is read or resolved.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use gardenhub_auth::gate::AuthorizationGate;
use gardenhub_core::config::InvitationConfig;
use gardenhub_core::error::AppError;
use gardenhub_database::{Store, UnitOfWork};
use gardenhub_entity::invitation::{
    CreateInvitation, GardenInvitation, InvitationDetails, InvitationStatus,
};
use gardenhub_entity::membership::{Capability, GardenMembership, GardenRole};

use crate::context::RequestContext;

/// Request to invite someone to a garden.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInvitationRequest {
    pub garden_id: Uuid,
    pub email: String,
    pub role: String,
    pub message: Option<String>,
}

/// How the addressee answers an invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationAction {
    Accept,
    Decline,
}

impl fmt::Display for InvitationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Accept => "accept",
            Self::Decline => "decline",
        })
    }
}

impl FromStr for InvitationAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "accept" => Ok(Self::Accept),
            "decline" => Ok(Self::Decline),
            _ => Err(AppError::validation(format!(
                "Invalid action: '{s}'. Expected 'accept' or 'decline'"
            ))),
        }
    }
}

/// Result of answering an invitation.
#[derive(Debug, Clone, Serialize)]
pub struct InvitationResolution {
    pub invitation: GardenInvitation,
    /// The membership the invitation resolved to (accept only).
    pub membership: Option<GardenMembership>,
    /// `false` when the membership already existed before this call.
    pub membership_created: bool,
}

/// Creates, lists, and resolves garden invitations.
#[derive(Debug, Clone)]
pub struct InvitationService {
    store: Arc<dyn Store>,
    ttl: Duration,
}

impl InvitationService {
    /// Creates a new invitation service.
    pub fn new(store: Arc<dyn Store>, config: &InvitationConfig) -> Self {
        Self {
            store,
            ttl: Duration::days(config.ttl_days),
        }
    }

    /// Invites an email address to a garden.
    ///
    /// The inviter needs `can_invite_users` (owners always have it). The
    /// invitation is refused when the address already belongs to a member
    /// or already has a live invitation for this garden.
    pub async fn create_invitation(
        &self,
        ctx: &RequestContext,
        req: CreateInvitationRequest,
    ) -> Result<GardenInvitation, AppError> {
        let role: GardenRole = req.role.parse()?;
        if !role.is_assignable() {
            return Err(AppError::validation("The owner role cannot be granted by invitation"));
        }
        let email = normalize_email(&req.email)?;

        let mut uow = self.store.begin().await?;
        let access = AuthorizationGate::require(
            uow.as_mut(),
            ctx.user_id,
            req.garden_id,
            Capability::InviteUsers,
        )
        .await?;

        if let Some(user) = uow.find_user_by_email(&email).await? {
            let is_member = access.garden.is_owned_by(user.id)
                || uow.find_membership(req.garden_id, user.id).await?.is_some();
            if is_member {
                return Err(AppError::conflict(format!(
                    "{email} is already a member of this garden"
                )));
            }
        }

        if uow
            .find_live_invitation(req.garden_id, &email, ctx.request_time)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(format!(
                "{email} already has a pending invitation to this garden"
            )));
        }

        let invitation = uow
            .insert_invitation(&CreateInvitation {
                garden_id: req.garden_id,
                invited_by_user_id: ctx.user_id,
                invited_user_email: email,
                invited_user_id: None,
                role,
                message: req.message.filter(|m| !m.trim().is_empty()),
                is_access_request: false,
                expires_at: ctx.request_time + self.ttl,
            })
            .await?;
        uow.commit().await?;

        info!(
            user_id = %ctx.user_id,
            garden_id = %invitation.garden_id,
            invitation_id = %invitation.id,
            role = %invitation.role,
            "Invitation created"
        );

        Ok(invitation)
    }

    /// Live invitations addressed to the caller's email.
    pub async fn list_pending_for_user(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<InvitationDetails>, AppError> {
        let mut uow = self.store.begin().await?;
        uow.list_pending_for_email(&ctx.email, ctx.request_time).await
    }

    /// Live invitations and access requests of one garden.
    ///
    /// Non-members see `NotFound`; members need `can_invite_users` or
    /// `can_manage_members`.
    pub async fn list_pending_for_garden(
        &self,
        ctx: &RequestContext,
        garden_id: Uuid,
    ) -> Result<Vec<InvitationDetails>, AppError> {
        let mut uow = self.store.begin().await?;
        let access = AuthorizationGate::require_view(uow.as_mut(), ctx.user_id, garden_id).await?;
        if !(access.can(Capability::InviteUsers) || access.can(Capability::ManageMembers)) {
            return Err(AppError::forbidden(
                "Missing permission to view this garden's invitations",
            ));
        }
        uow.list_pending_for_garden(garden_id, ctx.request_time).await
    }

    /// Applies an accept or decline action.
    pub async fn respond(
        &self,
        ctx: &RequestContext,
        invitation_id: Uuid,
        action: InvitationAction,
    ) -> Result<InvitationResolution, AppError> {
        match action {
            InvitationAction::Accept => self.accept_invitation(ctx, invitation_id).await,
            InvitationAction::Decline => {
                let invitation = self.decline_invitation(ctx, invitation_id).await?;
                Ok(InvitationResolution {
                    invitation,
                    membership: None,
                    membership_created: false,
                })
            }
        }
    }

    /// Accepts an invitation, provisioning the membership it grants.
    ///
    /// Idempotent: if the beneficiary is already a member, no second
    /// membership is created and the existing one is kept as is. An
    /// invitation already accepted for the same user accepts again
    /// without error.
    pub async fn accept_invitation(
        &self,
        ctx: &RequestContext,
        invitation_id: Uuid,
    ) -> Result<InvitationResolution, AppError> {
        let mut uow = self.store.begin().await?;
        let invitation = lock(uow.as_mut(), invitation_id).await?;
        ensure_can_resolve(uow.as_mut(), ctx, &invitation, InvitationAction::Accept).await?;

        let beneficiary = invitation.beneficiary(ctx.user_id);

        match invitation.effective_status(ctx.request_time) {
            InvitationStatus::Pending => {}
            InvitationStatus::Accepted if invitation.invited_user_id == Some(beneficiary) => {
                let membership = uow
                    .find_membership(invitation.garden_id, beneficiary)
                    .await?
                    .ok_or_else(|| {
                        AppError::invalid_state(
                            "Invitation was accepted but the membership has since been removed",
                        )
                    })?;
                debug!(invitation_id = %invitation_id, "Invitation already accepted");
                return Ok(InvitationResolution {
                    invitation,
                    membership: Some(membership),
                    membership_created: false,
                });
            }
            status => {
                return Err(AppError::invalid_state(format!(
                    "Invitation is {status} and can no longer be accepted"
                )));
            }
        }

        let (membership, membership_created) = match uow
            .insert_membership(invitation.garden_id, beneficiary, invitation.role)
            .await?
        {
            Some(created) => (created, true),
            None => {
                let existing = uow
                    .find_membership(invitation.garden_id, beneficiary)
                    .await?
                    .ok_or_else(|| AppError::internal("Membership vanished during acceptance"))?;
                (existing, false)
            }
        };

        let invitation = uow
            .update_invitation_status(invitation_id, InvitationStatus::Accepted, Some(beneficiary))
            .await?
            .ok_or_else(|| AppError::not_found("Invitation not found"))?;
        uow.commit().await?;

        info!(
            user_id = %ctx.user_id,
            garden_id = %invitation.garden_id,
            invitation_id = %invitation_id,
            membership_id = %membership.id,
            member_user_id = %beneficiary,
            created = membership_created,
            "Invitation accepted"
        );

        Ok(InvitationResolution {
            invitation,
            membership: Some(membership),
            membership_created,
        })
    }

    /// Declines an invitation. Declining twice is a no-op; declining an
    /// accepted invitation is refused.
    pub async fn decline_invitation(
        &self,
        ctx: &RequestContext,
        invitation_id: Uuid,
    ) -> Result<GardenInvitation, AppError> {
        let mut uow = self.store.begin().await?;
        let invitation = lock(uow.as_mut(), invitation_id).await?;
        ensure_can_resolve(uow.as_mut(), ctx, &invitation, InvitationAction::Decline).await?;

        match invitation.effective_status(ctx.request_time) {
            InvitationStatus::Pending => {}
            InvitationStatus::Declined => return Ok(invitation),
            status => {
                return Err(AppError::invalid_state(format!(
                    "Invitation is {status} and can no longer be declined"
                )));
            }
        }

        let invitation = uow
            .update_invitation_status(invitation_id, InvitationStatus::Declined, None)
            .await?
            .ok_or_else(|| AppError::not_found("Invitation not found"))?;
        uow.commit().await?;

        info!(
            user_id = %ctx.user_id,
            garden_id = %invitation.garden_id,
            invitation_id = %invitation_id,
            "Invitation declined"
        );

        Ok(invitation)
    }
}

async fn lock(uow: &mut dyn UnitOfWork, invitation_id: Uuid) -> Result<GardenInvitation, AppError> {
    uow.lock_invitation(invitation_id)
        .await?
        .ok_or_else(|| AppError::not_found("Invitation not found"))
}

/// Who may answer an invitation.
///
/// An ordinary invitation is answered by its addressee. An access request
/// is answered by someone holding `can_manage_members` on the garden; its
/// requester may also withdraw it by declining.
async fn ensure_can_resolve(
    uow: &mut dyn UnitOfWork,
    ctx: &RequestContext,
    invitation: &GardenInvitation,
    action: InvitationAction,
) -> Result<(), AppError> {
    if !invitation.is_access_request {
        if invitation.is_addressed_to(&ctx.email) {
            return Ok(());
        }
        warn!(
            user_id = %ctx.user_id,
            invitation_id = %invitation.id,
            "Invitation answered by someone other than its addressee"
        );
        return Err(AppError::forbidden("This invitation is addressed to someone else"));
    }

    if action == InvitationAction::Decline && invitation.invited_by_user_id == ctx.user_id {
        return Ok(());
    }
    AuthorizationGate::require(
        uow,
        ctx.user_id,
        invitation.garden_id,
        Capability::ManageMembers,
    )
    .await
    .map(|_| ())
}

/// Trim and lowercase an email, rejecting obviously malformed input.
pub(crate) fn normalize_email(raw: &str) -> Result<String, AppError> {
    let email = raw.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(AppError::validation(format!("Invalid email address: '{raw}'"))),
    }
}
