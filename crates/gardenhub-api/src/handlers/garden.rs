//! Garden CRUD handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use crate::dto::request::{CreateGardenRequest, UpdateGardenRequest};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidJson};
use crate::state::AppState;

/// POST /gardens
pub async fn create_garden(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<CreateGardenRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let garden = state
        .garden_service
        .create_garden(&auth, req.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "success": true, "id": garden.id, "data": garden })),
    ))
}

/// GET /gardens
pub async fn list_gardens(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let gardens = state.garden_service.list_gardens(&auth).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": gardens })))
}

/// GET /gardens/{id}
pub async fn get_garden(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let garden = state.garden_service.get_garden(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": garden })))
}

/// PATCH /gardens/{id}
pub async fn update_garden(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidJson(req): ValidJson<UpdateGardenRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let garden = state
        .garden_service
        .update_garden(&auth, id, req.into())
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": garden })))
}

/// DELETE /gardens/{id}
pub async fn delete_garden(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.garden_service.delete_garden(&auth, id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Garden deleted" } }),
    ))
}
