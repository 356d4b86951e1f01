//! Health check handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::warn;

use crate::dto::response::{ApiResponse, HealthResponse, ReadinessResponse};
use crate::state::AppState;

/// GET /health
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// GET /health/ready
pub async fn readiness(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<ReadinessResponse>>) {
    let (status, database) = match state.store.health_check().await {
        Ok(true) => (StatusCode::OK, "connected"),
        Ok(false) => (StatusCode::SERVICE_UNAVAILABLE, "degraded"),
        Err(e) => {
            warn!(error = %e, "Readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    };

    let ready = status.is_success();
    let body = ReadinessResponse {
        status: if ready { "ok" } else { "unavailable" }.to_string(),
        database: database.to_string(),
    };
    (
        status,
        Json(ApiResponse {
            success: ready,
            data: body,
        }),
    )
}
