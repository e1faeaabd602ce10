use crate::{
    domain::{
        common::{NutriscaleConfig, entities::app_errors::CoreError, services::Service},
        relay::ports::MessagingRelay,
    },
    infrastructure::{
        llm::gemini_client::GeminiLLMClient, messaging::telegram::TelegramRelay,
        realtime::firebase::FirebaseRealtimeStore,
    },
};

pub type NutriscaleService = Service<GeminiLLMClient, FirebaseRealtimeStore, TelegramRelay>;

pub async fn create_service(config: NutriscaleConfig) -> Result<NutriscaleService, CoreError> {
    let llm_client = GeminiLLMClient::from_config(&config.llm);
    let realtime_store = FirebaseRealtimeStore::new(&config.realtime)?;
    let messaging_relay = TelegramRelay::new(&config.messaging);

    if !messaging_relay.is_configured() {
        tracing::warn!("Telegram bot token or chat ID missing, image analysis will fail to relay");
    }

    Ok(
        Service::new(llm_client, realtime_store, messaging_relay)
            .with_caption_label(config.messaging.caption_label),
    )
}
