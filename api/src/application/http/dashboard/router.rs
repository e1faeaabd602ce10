use axum::{Router, routing::get};
use utoipa::OpenApi;

use super::handlers::{
    get_dashboard::{__path_get_dashboard, get_dashboard},
    stream_dashboard::{__path_stream_dashboard, stream_dashboard},
};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(get_dashboard, stream_dashboard))]
pub struct DashboardApiDoc;

pub fn dashboard_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/api/dashboard", state.args.server.root_path),
            get(get_dashboard),
        )
        .route(
            &format!("{}/api/dashboard/stream", state.args.server.root_path),
            get(stream_dashboard),
        )
}
