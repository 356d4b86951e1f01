//! Garden CRUD with ownership and capability checks.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use gardenhub_auth::gate::AuthorizationGate;
use gardenhub_core::error::AppError;
use gardenhub_database::Store;
use gardenhub_entity::garden::{CreateGarden, Garden, PublicGarden, UpdateGarden};
use gardenhub_entity::membership::{Capability, GardenPermissions, GardenRole};

use super::required_name;
use crate::context::RequestContext;

/// Manages gardens and the owner membership created alongside each one.
#[derive(Debug, Clone)]
pub struct GardenService {
    store: Arc<dyn Store>,
}

/// Request to create a new garden.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGardenRequest {
    pub name: String,
    pub description: Option<String>,
    pub notes: Option<String>,
}

/// A garden as seen by one caller, with what that caller may do on it.
#[derive(Debug, Clone, Serialize)]
pub struct GardenDetail {
    #[serde(flatten)]
    pub garden: Garden,
    /// The caller's role; the owner always reads as `owner`.
    pub role: GardenRole,
    pub permissions: GardenPermissions,
}

impl GardenService {
    /// Creates a new garden service.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Creates a garden owned by the caller together with their owner
    /// membership. Either both rows exist afterwards or neither does.
    pub async fn create_garden(
        &self,
        ctx: &RequestContext,
        req: CreateGardenRequest,
    ) -> Result<Garden, AppError> {
        let name = required_name(&req.name, "Garden")?;

        let mut uow = self.store.begin().await?;
        let garden = uow
            .insert_garden(&CreateGarden {
                owner_user_id: ctx.user_id,
                name,
                description: req.description,
                notes: req.notes,
            })
            .await?;
        uow.insert_membership(garden.id, ctx.user_id, GardenRole::Owner)
            .await?
            .ok_or_else(|| AppError::internal("Owner membership already present on new garden"))?;
        uow.commit().await?;

        info!(
            user_id = %ctx.user_id,
            garden_id = %garden.id,
            name = %garden.name,
            "Garden created"
        );

        Ok(garden)
    }

    /// Lists gardens the caller owns or belongs to.
    pub async fn list_gardens(&self, ctx: &RequestContext) -> Result<Vec<Garden>, AppError> {
        let mut uow = self.store.begin().await?;
        uow.list_gardens_for_user(ctx.user_id).await
    }

    /// Gets a garden the caller can see. Inaccessible gardens read as absent.
    pub async fn get_garden(
        &self,
        ctx: &RequestContext,
        garden_id: Uuid,
    ) -> Result<GardenDetail, AppError> {
        let mut uow = self.store.begin().await?;
        let access = AuthorizationGate::require_view(uow.as_mut(), ctx.user_id, garden_id).await?;

        let role = if access.is_owner() {
            GardenRole::Owner
        } else {
            access
                .membership
                .as_ref()
                .map(|m| m.role)
                .ok_or_else(|| AppError::not_found("Garden not found"))?
        };

        Ok(GardenDetail {
            garden: access.garden,
            role,
            permissions: role.permissions(),
        })
    }

    /// Public read path for shareable links. Performs no access check.
    pub async fn get_public_garden(&self, garden_id: Uuid) -> Result<PublicGarden, AppError> {
        let mut uow = self.store.begin().await?;
        uow.find_garden(garden_id)
            .await?
            .map(PublicGarden::from)
            .ok_or_else(|| AppError::not_found("Garden not found"))
    }

    /// Updates a garden; requires `can_edit_garden`.
    pub async fn update_garden(
        &self,
        ctx: &RequestContext,
        garden_id: Uuid,
        mut req: UpdateGarden,
    ) -> Result<Garden, AppError> {
        if let Some(name) = &req.name {
            req.name = Some(required_name(name, "Garden")?);
        }

        let mut uow = self.store.begin().await?;
        let access = AuthorizationGate::require(
            uow.as_mut(),
            ctx.user_id,
            garden_id,
            Capability::EditGarden,
        )
        .await?;

        if req.is_empty() {
            return Ok(access.garden);
        }

        let garden = uow
            .update_garden(garden_id, &req)
            .await?
            .ok_or_else(|| AppError::not_found("Garden not found"))?;
        uow.commit().await?;

        info!(user_id = %ctx.user_id, garden_id = %garden_id, "Garden updated");

        Ok(garden)
    }

    /// Deletes a garden with everything under it; owner only.
    pub async fn delete_garden(
        &self,
        ctx: &RequestContext,
        garden_id: Uuid,
    ) -> Result<(), AppError> {
        let mut uow = self.store.begin().await?;
        AuthorizationGate::require_owner(uow.as_mut(), ctx.user_id, garden_id).await?;

        if !uow.delete_garden(garden_id).await? {
            return Err(AppError::not_found("Garden not found"));
        }
        uow.commit().await?;

        info!(user_id = %ctx.user_id, garden_id = %garden_id, "Garden deleted");

        Ok(())
    }
}
