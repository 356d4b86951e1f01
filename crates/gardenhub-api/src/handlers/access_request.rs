//! Access request handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use gardenhub_service::invitation::AccessRequest;

use crate::dto::request::AccessRequestRequest;
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidJson};
use crate::state::AppState;

/// POST /garden-access-request
pub async fn request_access(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<AccessRequestRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let request = state
        .access_request_service
        .request_access(
            &auth,
            AccessRequest {
                garden_id: req.garden_id,
                message: req.message,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "success": true, "id": request.id, "data": request })),
    ))
}
