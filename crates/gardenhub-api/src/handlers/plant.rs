//! Plant handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use crate::dto::request::{CreatePlantRequest, UpdatePlantRequest};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidJson};
use crate::state::AppState;

/// POST /garden-locations/{id}/plants
pub async fn create_plant(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(location_id): Path<Uuid>,
    ValidJson(req): ValidJson<CreatePlantRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let plant = state
        .plant_service
        .create_plant(&auth, location_id, req.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "success": true, "id": plant.id, "data": plant })),
    ))
}

/// GET /garden-locations/{id}/plants
pub async fn list_plants(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(location_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let plants = state.plant_service.list_plants(&auth, location_id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": plants })))
}

/// GET /plants/{id}
pub async fn get_plant(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let plant = state.plant_service.get_plant(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": plant })))
}

/// PATCH /plants/{id}
pub async fn update_plant(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidJson(req): ValidJson<UpdatePlantRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let plant = state
        .plant_service
        .update_plant(&auth, id, req.into())
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": plant })))
}

/// DELETE /plants/{id}
pub async fn delete_plant(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.plant_service.delete_plant(&auth, id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Plant deleted" } }),
    ))
}
