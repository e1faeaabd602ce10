use crate::domain::{
    food_analysis::ports::LLMClient,
    realtime::ports::RealtimeStore,
    relay::{ports::MessagingRelay, value_objects::DEFAULT_CAPTION_LABEL},
};

/// Application service wiring the inference client, the realtime store and
/// the messaging relay together. Domain service traits are implemented on it
/// in their own modules.
#[derive(Clone)]
pub struct Service<LLM, RS, MR>
where
    LLM: LLMClient,
    RS: RealtimeStore,
    MR: MessagingRelay,
{
    pub(crate) llm_client: LLM,
    pub(crate) realtime_store: RS,
    pub(crate) messaging_relay: MR,
    pub(crate) caption_label: String,
}

impl<LLM, RS, MR> Service<LLM, RS, MR>
where
    LLM: LLMClient,
    RS: RealtimeStore,
    MR: MessagingRelay,
{
    pub fn new(llm_client: LLM, realtime_store: RS, messaging_relay: MR) -> Self {
        Self {
            llm_client,
            realtime_store,
            messaging_relay,
            caption_label: DEFAULT_CAPTION_LABEL.to_string(),
        }
    }

    /// Label prefixed to relayed captions, naming the model that answered.
    pub fn with_caption_label(mut self, label: impl Into<String>) -> Self {
        self.caption_label = label.into();
        self
    }

    pub fn model_name(&self) -> &str {
        self.llm_client.model_name()
    }

    pub fn relay_configured(&self) -> bool {
        self.messaging_relay.is_configured()
    }
}
