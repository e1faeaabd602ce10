use crate::domain::{
    common::{entities::app_errors::CoreError, now_millis, services::Service},
    food_analysis::{
        entities::FoodAnalysisResult,
        helpers::relay_caption,
        ports::{FoodAnalysisService, LLMClient},
        schema::{FOOD_ANALYSIS_PROMPT, parse_analysis_reply},
        value_objects::AnalyzeFoodInput,
    },
    realtime::{ports::RealtimeStore, value_objects::StorePath},
    relay::{ports::MessagingRelay, value_objects::PhotoMessage},
};

impl<LLM, RS, MR> FoodAnalysisService for Service<LLM, RS, MR>
where
    LLM: LLMClient,
    RS: RealtimeStore,
    MR: MessagingRelay,
{
    async fn analyze_food(&self, input: AnalyzeFoodInput) -> Result<FoodAnalysisResult, CoreError> {
        if input.image.is_empty() {
            return Err(CoreError::Invalid("No image provided".to_string()));
        }

        // 1. Call LLM
        let raw_response = self
            .llm_client
            .generate_with_image(FOOD_ANALYSIS_PROMPT.to_string(), input.image.clone())
            .await?;

        tracing::info!(
            model = %self.llm_client.model_name(),
            reply = %raw_response,
            "Food analysis reply received"
        );

        // 2. Parse and validate response
        let analyzed = match parse_analysis_reply(&raw_response) {
            Ok(analyzed) => analyzed,
            Err(e) => {
                tracing::warn!(error = %e, "Model reply is not nutrition data");
                return Ok(FoodAnalysisResult::unparsed(raw_response));
            }
        };

        // 3. Overwrite the current record
        let record = analyzed.recorded_at(now_millis());
        self.realtime_store
            .set(&StorePath::food(), serde_json::to_value(&record)?)
            .await?;

        tracing::info!(
            food = %record.food,
            timestamp = record.timestamp,
            "Nutrition record stored"
        );

        // 4. Relay photo, best effort once credentials exist
        let message = PhotoMessage {
            image: input.image,
            caption: relay_caption(&self.caption_label, &raw_response),
        };

        match self.messaging_relay.send_photo(message).await {
            Ok(()) => {}
            Err(CoreError::RelayNotConfigured) => {
                tracing::error!("Messaging relay is missing its bot token or chat ID");
                return Err(CoreError::RelayNotConfigured);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to relay analyzed photo");
            }
        }

        Ok(FoodAnalysisResult::Recorded(record))
    }
}
