use axum::extract::State;
use nutriscale_core::domain::dashboard::{ports::DashboardService, view::DashboardView};

use crate::application::http::server::{
    api_entities::{
        api_error::{ApiError, ApiErrorResponse},
        response::Response,
    },
    app_state::AppState,
};

#[utoipa::path(
    get,
    path = "",
    tag = "dashboard",
    summary = "Current dashboard",
    description = "Reads the current nutrition record and scale weight once and renders both panels.",
    responses(
        (status = 200, body = DashboardView),
        (status = 500, body = ApiErrorResponse),
    ),
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
) -> Result<Response<DashboardView>, ApiError> {
    let view = state
        .service
        .dashboard_snapshot()
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(view))
}
