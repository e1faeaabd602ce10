use axum::{Json, extract::State};
use nutriscale_core::domain::{
    dashboard::view::{
        DAILY_CALORIES_KCAL, DAILY_CARBOHYDRATES_G, DAILY_FAT_G, DAILY_PROTEIN_G,
        GAUGE_MAX_WEIGHT_G,
    },
    food_analysis::value_objects::FRESHNESS_WINDOW_MS,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::app_state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DailyReferenceValues {
    pub calories_kcal: f64,
    pub carbohydrates_g: f64,
    pub protein_g: f64,
    pub fat_g: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ConfigResponse {
    pub model: String,
    pub relay_configured: bool,
    pub freshness_window_ms: i64,
    pub gauge_max_weight_g: f64,
    pub daily_reference_values: DailyReferenceValues,
}

#[utoipa::path(
    get,
    path = "/config",
    tag = "config",
    summary = "Public settings",
    responses(
        (status = 200, body = ConfigResponse)
    ),
)]
pub async fn get_config(State(state): State<AppState>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        model: state.service.model_name().to_string(),
        relay_configured: state.service.relay_configured(),
        freshness_window_ms: FRESHNESS_WINDOW_MS,
        gauge_max_weight_g: GAUGE_MAX_WEIGHT_G,
        daily_reference_values: DailyReferenceValues {
            calories_kcal: DAILY_CALORIES_KCAL,
            carbohydrates_g: DAILY_CARBOHYDRATES_G,
            protein_g: DAILY_PROTEIN_G,
            fat_g: DAILY_FAT_G,
        },
    })
}
