use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::StatusCode,
};
use axum_extra::{TypedHeader, headers::ContentType};
use bytes::Bytes;
use nutriscale_core::domain::{
    common::entities::app_errors::CoreError,
    food_analysis::{
        entities::FoodAnalysisResult,
        ports::FoodAnalysisService,
        value_objects::{AnalyzeFoodInput, ImagePayload},
    },
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{
        api_error::{ApiError, ApiErrorResponse},
        response::Response,
    },
    app_state::AppState,
};

pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB

pub const NO_IMAGE_MESSAGE: &str = "No image provided";
pub const PROCESSING_FAILED_MESSAGE: &str = "Failed to process image";

#[derive(Debug, Deserialize, ToSchema)]
#[allow(dead_code)]
pub struct AnalyzeFoodForm {
    #[schema(value_type = String, format = Binary)]
    image: Vec<u8>,
}

#[utoipa::path(
    post,
    path = "/analyze-food",
    tag = "food-analysis",
    summary = "Analyze food from image",
    description = "Sends the photo to the vision model, stores the nutrition facts it reports as the current record and relays the photo to the messaging bot. Accepts a multipart form with an `image` field or a raw `image/*` body.",
    request_body(content = AnalyzeFoodForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = FoodAnalysisResult, description = "Stored record, or the raw reply when it was not nutrition data"),
        (status = 400, body = ApiErrorResponse),
        (status = 413, body = ApiErrorResponse),
        (status = 500, body = ApiErrorResponse),
    ),
)]
pub async fn analyze_food(
    State(state): State<AppState>,
    content_type: Option<TypedHeader<ContentType>>,
    request: Request,
) -> Result<Response<FoodAnalysisResult>, ApiError> {
    let content_type = content_type
        .map(|TypedHeader(content_type)| content_type.to_string())
        .unwrap_or_default();
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    let image = if essence == "multipart/form-data" {
        let multipart = Multipart::from_request(request, &state)
            .await
            .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?;
        read_multipart_image(multipart).await?
    } else if essence.starts_with("image/") {
        let data = Bytes::from_request(request, &state)
            .await
            .map_err(|e| body_error(e.status(), e.body_text()))?;
        Some(ImagePayload::new(data, Some(essence), None))
    } else {
        None
    };

    let image = image.ok_or_else(|| ApiError::BadRequest(NO_IMAGE_MESSAGE.to_string()))?;

    let result = state
        .service
        .analyze_food(AnalyzeFoodInput { image })
        .await
        .map_err(|e| match e {
            CoreError::Invalid(_) | CoreError::RelayNotConfigured => ApiError::from(e),
            other => {
                tracing::error!(error = %other, "Image analysis failed");
                ApiError::InternalServerError(PROCESSING_FAILED_MESSAGE.to_string())
            }
        })?;

    Ok(Response::OK(result))
}

async fn read_multipart_image(mut multipart: Multipart) -> Result<Option<ImagePayload>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| body_error(e.status(), e.body_text()))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let mime_type = field.content_type().map(str::to_string);
        let file_name = field.file_name().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| body_error(e.status(), e.body_text()))?;

        return Ok(Some(ImagePayload::new(data, mime_type, file_name)));
    }

    Ok(None)
}

fn body_error(status: StatusCode, message: String) -> ApiError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(format!(
            "Image too large. Max size is {} bytes",
            MAX_IMAGE_SIZE
        ))
    } else {
        ApiError::BadRequest(format!("Failed to read image: {}", message))
    }
}
