//! Plant operations, gated by the plant capabilities of the garden that
//! holds the plant's location.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use gardenhub_auth::gate::AuthorizationGate;
use gardenhub_core::error::AppError;
use gardenhub_database::{Store, UnitOfWork};
use gardenhub_entity::garden::{CreatePlant, GardenLocation, Plant, UpdatePlant};
use gardenhub_entity::membership::Capability;

use super::{hidden_as, required_name};
use crate::context::RequestContext;

#[derive(Debug, Clone)]
pub struct PlantService {
    store: Arc<dyn Store>,
}

/// Request to add a plant to a location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePlantRequest {
    pub name: String,
    pub variety: Option<String>,
    pub notes: Option<String>,
    pub planted_at: Option<NaiveDate>,
}

async fn load_location(
    uow: &mut dyn UnitOfWork,
    location_id: Uuid,
) -> Result<GardenLocation, AppError> {
    uow.find_location(location_id)
        .await?
        .ok_or_else(|| AppError::not_found("Garden location not found"))
}

/// Load a plant and the garden it lives in.
async fn load_plant(uow: &mut dyn UnitOfWork, plant_id: Uuid) -> Result<(Plant, Uuid), AppError> {
    let plant = uow
        .find_plant(plant_id)
        .await?
        .ok_or_else(|| AppError::not_found("Plant not found"))?;
    let location = load_location(uow, plant.garden_location_id).await?;
    Ok((plant, location.garden_id))
}

impl PlantService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Adds a plant; requires `can_add_plants`.
    pub async fn create_plant(
        &self,
        ctx: &RequestContext,
        location_id: Uuid,
        req: CreatePlantRequest,
    ) -> Result<Plant, AppError> {
        let name = required_name(&req.name, "Plant")?;

        let mut uow = self.store.begin().await?;
        let location = load_location(uow.as_mut(), location_id).await?;
        AuthorizationGate::require(
            uow.as_mut(),
            ctx.user_id,
            location.garden_id,
            Capability::AddPlants,
        )
        .await?;

        let plant = uow
            .insert_plant(&CreatePlant {
                garden_location_id: location_id,
                creator_user_id: ctx.user_id,
                name,
                variety: req.variety,
                notes: req.notes,
                planted_at: req.planted_at,
            })
            .await?;
        uow.commit().await?;

        info!(
            user_id = %ctx.user_id,
            location_id = %location_id,
            plant_id = %plant.id,
            "Plant created"
        );

        Ok(plant)
    }

    pub async fn list_plants(
        &self,
        ctx: &RequestContext,
        location_id: Uuid,
    ) -> Result<Vec<Plant>, AppError> {
        let mut uow = self.store.begin().await?;
        let location = load_location(uow.as_mut(), location_id).await?;
        AuthorizationGate::require_view(uow.as_mut(), ctx.user_id, location.garden_id)
            .await
            .map_err(hidden_as("Garden location not found"))?;
        uow.list_plants(location_id).await
    }

    pub async fn get_plant(&self, ctx: &RequestContext, plant_id: Uuid) -> Result<Plant, AppError> {
        let mut uow = self.store.begin().await?;
        let (plant, garden_id) = load_plant(uow.as_mut(), plant_id).await?;
        AuthorizationGate::require_view(uow.as_mut(), ctx.user_id, garden_id)
            .await
            .map_err(hidden_as("Plant not found"))?;
        Ok(plant)
    }

    /// Edits a plant; requires `can_edit_plants`.
    pub async fn update_plant(
        &self,
        ctx: &RequestContext,
        plant_id: Uuid,
        mut req: UpdatePlant,
    ) -> Result<Plant, AppError> {
        if let Some(name) = &req.name {
            req.name = Some(required_name(name, "Plant")?);
        }

        let mut uow = self.store.begin().await?;
        let (_, garden_id) = load_plant(uow.as_mut(), plant_id).await?;
        AuthorizationGate::require(
            uow.as_mut(),
            ctx.user_id,
            garden_id,
            Capability::EditPlants,
        )
        .await?;

        let plant = uow
            .update_plant(plant_id, &req)
            .await?
            .ok_or_else(|| AppError::not_found("Plant not found"))?;
        uow.commit().await?;

        info!(user_id = %ctx.user_id, plant_id = %plant_id, "Plant updated");

        Ok(plant)
    }

    /// Deletes a plant; requires `can_delete_plants`.
    pub async fn delete_plant(&self, ctx: &RequestContext, plant_id: Uuid) -> Result<(), AppError> {
        let mut uow = self.store.begin().await?;
        let (_, garden_id) = load_plant(uow.as_mut(), plant_id).await?;
        AuthorizationGate::require(
            uow.as_mut(),
            ctx.user_id,
            garden_id,
            Capability::DeletePlants,
        )
        .await?;

        uow.delete_plant(plant_id).await?;
        uow.commit().await?;

        info!(user_id = %ctx.user_id, plant_id = %plant_id, "Plant deleted");

        Ok(())
    }
}
