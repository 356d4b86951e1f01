//! Listing members, changing roles, and removing members.
//!
//! New memberships are never created here: they come from garden
//! creation (the owner) and from accepted invitations.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use gardenhub_auth::gate::AuthorizationGate;
use gardenhub_core::error::AppError;
use gardenhub_database::{Store, UnitOfWork};
use gardenhub_entity::membership::{
    Capability, GardenMembership, GardenPermissions, GardenRole, MembershipWithUser,
};

use crate::context::RequestContext;

/// Manages garden memberships.
#[derive(Debug, Clone)]
pub struct MembershipService {
    store: Arc<dyn Store>,
}

/// A membership with its user and the capabilities its role grants.
#[derive(Debug, Clone, Serialize)]
pub struct MemberView {
    #[serde(flatten)]
    pub member: MembershipWithUser,
    pub permissions: GardenPermissions,
}

impl From<MembershipWithUser> for MemberView {
    fn from(member: MembershipWithUser) -> Self {
        let permissions = member.membership.permissions();
        Self {
            member,
            permissions,
        }
    }
}

/// Load a membership the caller may manage.
///
/// Unknown ids are `NotFound`; callers without `can_manage_members` and
/// attempts to touch the owner membership are `Forbidden`.
async fn load_managed(
    uow: &mut dyn UnitOfWork,
    ctx: &RequestContext,
    membership_id: Uuid,
) -> Result<GardenMembership, AppError> {
    let membership = uow
        .find_membership_by_id(membership_id)
        .await?
        .ok_or_else(|| AppError::not_found("Membership not found"))?;

    AuthorizationGate::require(
        uow,
        ctx.user_id,
        membership.garden_id,
        Capability::ManageMembers,
    )
    .await?;

    if membership.is_owner() {
        warn!(
            user_id = %ctx.user_id,
            garden_id = %membership.garden_id,
            membership_id = %membership_id,
            "Attempt to modify the owner membership"
        );
        return Err(AppError::forbidden(
            "The owner membership cannot be changed or removed",
        ));
    }

    Ok(membership)
}

impl MembershipService {
    /// Creates a new membership service.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Returns the membership of `user_id` in a garden. No access check is
    /// made; this is the lookup the authorization gate itself builds on.
    pub async fn get_membership(
        &self,
        garden_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<GardenMembership>, AppError> {
        let mut uow = self.store.begin().await?;
        uow.find_membership(garden_id, user_id).await
    }

    /// Lists a garden's members: owner first, then admins, then the rest
    /// by join time.
    pub async fn list_members(
        &self,
        ctx: &RequestContext,
        garden_id: Uuid,
    ) -> Result<Vec<MemberView>, AppError> {
        let mut uow = self.store.begin().await?;
        AuthorizationGate::require_view(uow.as_mut(), ctx.user_id, garden_id).await?;
        let members = uow.list_memberships(garden_id).await?;
        Ok(members.into_iter().map(MemberView::from).collect())
    }

    /// Changes the role of a non-owner membership.
    pub async fn change_role(
        &self,
        ctx: &RequestContext,
        membership_id: Uuid,
        role: &str,
    ) -> Result<GardenMembership, AppError> {
        let role: GardenRole = role.parse()?;
        if !role.is_assignable() {
            return Err(AppError::validation(
                "Ownership cannot be transferred by a role change",
            ));
        }

        let mut uow = self.store.begin().await?;
        let current = load_managed(uow.as_mut(), ctx, membership_id).await?;

        let updated = uow
            .update_membership_role(membership_id, role)
            .await?
            .ok_or_else(|| AppError::not_found("Membership not found"))?;
        uow.commit().await?;

        info!(
            user_id = %ctx.user_id,
            garden_id = %updated.garden_id,
            membership_id = %membership_id,
            from = %current.role,
            to = %role,
            "Membership role changed"
        );

        Ok(updated)
    }

    /// Removes a non-owner member from a garden.
    pub async fn remove_member(
        &self,
        ctx: &RequestContext,
        membership_id: Uuid,
    ) -> Result<(), AppError> {
        let mut uow = self.store.begin().await?;
        let membership = load_managed(uow.as_mut(), ctx, membership_id).await?;

        uow.delete_membership(membership_id).await?;
        uow.commit().await?;

        info!(
            user_id = %ctx.user_id,
            garden_id = %membership.garden_id,
            membership_id = %membership_id,
            removed_user_id = %membership.user_id,
            "Member removed"
        );

        Ok(())
    }
}
