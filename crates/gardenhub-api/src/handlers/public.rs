//! Unauthenticated read path for shareable garden links.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /public/gardens/{id}
pub async fn get_public_garden(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let garden = state.garden_service.get_public_garden(id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": garden })))
}
