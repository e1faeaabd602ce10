use chrono::Utc;

pub mod entities;
#[cfg(test)]
pub(crate) mod fakes;
pub mod services;

#[derive(Clone, Debug)]
pub struct NutriscaleConfig {
    pub llm: LLMConfig,
    pub realtime: RealtimeConfig,
    pub messaging: MessagingConfig,
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
}

#[derive(Clone, Debug)]
pub struct RealtimeConfig {
    pub database_url: String,
    /// Database secret or ID token, sent as the `auth` query parameter
    pub auth_token: Option<String>,
}

#[derive(Clone, Debug)]
pub struct MessagingConfig {
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
    pub api_base_url: String,
    pub caption_label: String,
}

impl MessagingConfig {
    pub fn is_configured(&self) -> bool {
        self.bot_token.as_deref().is_some_and(|t| !t.is_empty())
            && self.chat_id.as_deref().is_some_and(|c| !c.is_empty())
    }
}

/// Current wall-clock time as epoch milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
