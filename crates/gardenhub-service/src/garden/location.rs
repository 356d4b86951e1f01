//! Garden location operations.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use gardenhub_auth::gate::AuthorizationGate;
use gardenhub_core::error::AppError;
use gardenhub_database::{Store, UnitOfWork};
use gardenhub_entity::garden::{
    CreateGardenLocation, GardenLocation, LocationDetails, UpdateGardenLocation,
};
use gardenhub_entity::membership::Capability;

use super::{hidden_as, required_name};
use crate::context::RequestContext;

/// Manages locations inside gardens. Writes need `can_edit_garden` on the
/// parent garden; reads need any access to it.
#[derive(Debug, Clone)]
pub struct LocationService {
    store: Arc<dyn Store>,
}

/// Request to create a location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateLocationRequest {
    pub name: String,
    #[serde(flatten)]
    pub details: LocationDetails,
}

async fn load_location(
    uow: &mut dyn UnitOfWork,
    location_id: Uuid,
) -> Result<GardenLocation, AppError> {
    uow.find_location(location_id)
        .await?
        .ok_or_else(|| AppError::not_found("Garden location not found"))
}

impl LocationService {
    /// Creates a new location service.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Creates a location; names are unique within a garden.
    pub async fn create_location(
        &self,
        ctx: &RequestContext,
        garden_id: Uuid,
        req: CreateLocationRequest,
    ) -> Result<GardenLocation, AppError> {
        let name = required_name(&req.name, "Location")?;

        let mut uow = self.store.begin().await?;
        AuthorizationGate::require(
            uow.as_mut(),
            ctx.user_id,
            garden_id,
            Capability::EditGarden,
        )
        .await?;

        let location = uow
            .insert_location(&CreateGardenLocation {
                garden_id,
                creator_user_id: ctx.user_id,
                name,
                details: req.details,
            })
            .await?;
        uow.commit().await?;

        info!(
            user_id = %ctx.user_id,
            garden_id = %garden_id,
            location_id = %location.id,
            "Garden location created"
        );

        Ok(location)
    }

    /// Lists the locations of a garden the caller can see.
    pub async fn list_locations(
        &self,
        ctx: &RequestContext,
        garden_id: Uuid,
    ) -> Result<Vec<GardenLocation>, AppError> {
        let mut uow = self.store.begin().await?;
        AuthorizationGate::require_view(uow.as_mut(), ctx.user_id, garden_id).await?;
        uow.list_locations(garden_id).await
    }

    /// Gets one location. Locations in hidden gardens read as absent.
    pub async fn get_location(
        &self,
        ctx: &RequestContext,
        location_id: Uuid,
    ) -> Result<GardenLocation, AppError> {
        let mut uow = self.store.begin().await?;
        let location = load_location(uow.as_mut(), location_id).await?;
        AuthorizationGate::require_view(uow.as_mut(), ctx.user_id, location.garden_id)
            .await
            .map_err(hidden_as("Garden location not found"))?;
        Ok(location)
    }

    /// Updates a location.
    pub async fn update_location(
        &self,
        ctx: &RequestContext,
        location_id: Uuid,
        mut req: UpdateGardenLocation,
    ) -> Result<GardenLocation, AppError> {
        if let Some(name) = &req.name {
            req.name = Some(required_name(name, "Location")?);
        }

        let mut uow = self.store.begin().await?;
        let location = load_location(uow.as_mut(), location_id).await?;
        AuthorizationGate::require(
            uow.as_mut(),
            ctx.user_id,
            location.garden_id,
            Capability::EditGarden,
        )
        .await?;

        let updated = uow
            .update_location(location_id, &req)
            .await?
            .ok_or_else(|| AppError::not_found("Garden location not found"))?;
        uow.commit().await?;

        info!(
            user_id = %ctx.user_id,
            garden_id = %updated.garden_id,
            location_id = %location_id,
            "Garden location updated"
        );

        Ok(updated)
    }

    /// Deletes a location and its plants.
    pub async fn delete_location(
        &self,
        ctx: &RequestContext,
        location_id: Uuid,
    ) -> Result<(), AppError> {
        let mut uow = self.store.begin().await?;
        let location = load_location(uow.as_mut(), location_id).await?;
        AuthorizationGate::require(
            uow.as_mut(),
            ctx.user_id,
            location.garden_id,
            Capability::EditGarden,
        )
        .await?;

        uow.delete_location(location_id).await?;
        uow.commit().await?;

        info!(
            user_id = %ctx.user_id,
            garden_id = %location.garden_id,
            location_id = %location_id,
            "Garden location deleted"
        );

        Ok(())
    }
}
