use axum::{Json, Router, extract::State, routing::get};
use nutriscale_core::domain::health::{entities::StoreHealthStatus, ports::HealthCheckService};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::application::http::server::{
    api_entities::{
        api_error::{ApiError, ApiErrorResponse},
        response::Response,
    },
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LivenessResponse {
    pub status: String,
}

#[derive(OpenApi)]
#[openapi(paths(health_live, health_ready))]
pub struct HealthApiDoc;

#[utoipa::path(
    get,
    path = "/live",
    tag = "health",
    responses((status = 200, body = LivenessResponse)),
)]
pub async fn health_live() -> Json<LivenessResponse> {
    Json(LivenessResponse {
        status: "ok".to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    summary = "Readiness",
    description = "Reads the scale weight from the realtime store.",
    responses(
        (status = 200, body = StoreHealthStatus),
        (status = 503, body = ApiErrorResponse),
    ),
)]
pub async fn health_ready(
    State(state): State<AppState>,
) -> Result<Response<StoreHealthStatus>, ApiError> {
    let status = state.service.readiness().await.map_err(|e| {
        tracing::warn!(error = %e, "Readiness check failed");
        ApiError::from(e)
    })?;

    Ok(Response::OK(status))
}

pub fn health_routes(root_path: &str) -> Router<AppState> {
    Router::new()
        .route(&format!("{}/health/live", root_path), get(health_live))
        .route(&format!("{}/health/ready", root_path), get(health_ready))
}
