use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food_analysis::{
        entities::FoodAnalysisResult,
        value_objects::{AnalyzeFoodInput, ImagePayload},
    },
};

/// LLM Client trait for calling multimodal AI models
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    /// Sends the prompt and the image in a single request and returns the
    /// reply text.
    fn generate_with_image(
        &self,
        prompt: String,
        image: ImagePayload,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    fn model_name(&self) -> &str;
}

/// Service trait for food analysis business logic
#[cfg_attr(test, mockall::automock)]
pub trait FoodAnalysisService: Send + Sync {
    fn analyze_food(
        &self,
        input: AnalyzeFoodInput,
    ) -> impl Future<Output = Result<FoodAnalysisResult, CoreError>> + Send;
}
