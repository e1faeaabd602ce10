use crate::application::http::{
    dashboard::router::DashboardApiDoc, food_analysis::router::FoodAnalysisApiDoc,
    health::HealthApiDoc, server::config::__path_get_config,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Nutriscale API",
        description = "Food photo analysis and live nutrition dashboard for a kitchen scale"
    ),
    paths(get_config),
    nest(
        (path = "/api", api = FoodAnalysisApiDoc),
        (path = "/api/dashboard", api = DashboardApiDoc),
        (path = "/health", api = HealthApiDoc),
    )
)]
pub struct ApiDoc;
