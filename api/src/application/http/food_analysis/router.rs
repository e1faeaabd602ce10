use axum::{Router, extract::DefaultBodyLimit, routing::post};
use utoipa::OpenApi;

use super::handlers::analyze_food::{__path_analyze_food, MAX_IMAGE_SIZE, analyze_food};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(analyze_food))]
pub struct FoodAnalysisApiDoc;

pub fn food_analysis_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/api/analyze-food", state.args.server.root_path),
            post(analyze_food),
        )
        .layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE))
}
