//! Garden location handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use crate::dto::request::{CreateLocationRequest, UpdateLocationRequest};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidJson};
use crate::state::AppState;

/// POST /gardens/{id}/locations
pub async fn create_location(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(garden_id): Path<Uuid>,
    ValidJson(req): ValidJson<CreateLocationRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let location = state
        .location_service
        .create_location(&auth, garden_id, req.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "success": true, "id": location.id, "data": location })),
    ))
}

/// GET /gardens/{id}/locations
pub async fn list_locations(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(garden_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let locations = state
        .location_service
        .list_locations(&auth, garden_id)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": locations })))
}

/// GET /garden-locations/{id}
pub async fn get_location(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let location = state.location_service.get_location(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": location })))
}

/// PATCH /garden-locations/{id}
pub async fn update_location(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidJson(req): ValidJson<UpdateLocationRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let location = state
        .location_service
        .update_location(&auth, id, req.into())
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": location })))
}

/// DELETE /garden-locations/{id}
pub async fn delete_location(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.location_service.delete_location(&auth, id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Garden location deleted" } }),
    ))
}
