use reqwest::{
    Client,
    multipart::{Form, Part},
};
use serde::Deserialize;
use tracing::instrument;

use crate::domain::{
    common::{MessagingConfig, entities::app_errors::CoreError},
    relay::{ports::MessagingRelay, value_objects::PhotoMessage},
};

pub const DEFAULT_TELEGRAM_API_BASE_URL: &str = "https://api.telegram.org";

/// Forwards analyzed photos to a Telegram chat through the Bot API.
#[derive(Debug, Clone)]
pub struct TelegramRelay {
    bot_token: Option<String>,
    chat_id: Option<String>,
    api_base_url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    description: Option<String>,
}

impl TelegramRelay {
    pub fn new(config: &MessagingConfig) -> Self {
        Self {
            bot_token: config.bot_token.clone().filter(|t| !t.is_empty()),
            chat_id: config.chat_id.clone().filter(|c| !c.is_empty()),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    fn credentials(&self) -> Result<(&str, &str), CoreError> {
        match (self.bot_token.as_deref(), self.chat_id.as_deref()) {
            (Some(token), Some(chat_id)) => Ok((token, chat_id)),
            _ => Err(CoreError::RelayNotConfigured),
        }
    }
}

impl MessagingRelay for TelegramRelay {
    fn is_configured(&self) -> bool {
        self.credentials().is_ok()
    }

    #[instrument(skip(self, message), fields(caption_len = message.caption.chars().count(), size = message.image.data.len()))]
    async fn send_photo(&self, message: PhotoMessage) -> Result<(), CoreError> {
        let (token, chat_id) = self.credentials()?;

        let file_name = message.image.file_name_or_default();
        let photo = Part::bytes(message.image.data.to_vec())
            .file_name(file_name)
            .mime_str(&message.image.mime_type)
            .map_err(|e| CoreError::RelayError(format!("Invalid image MIME type: {}", e)))?;

        let form = Form::new()
            .text("chat_id", chat_id.to_string())
            .text("caption", message.caption)
            .part("photo", photo);

        let url = format!("{}/bot{}/sendPhoto", self.api_base_url, token);

        // The URL embeds the bot token, keep it out of logs.
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                tracing::error!("Telegram request failed: {}", e);
                CoreError::RelayError(e.to_string())
            })?;

        let status = response.status();
        let body: TelegramResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Telegram response: {}", e.without_url());
            CoreError::RelayError(format!("Unexpected Telegram response ({})", status))
        })?;

        if !body.ok {
            let description = body
                .description
                .unwrap_or_else(|| format!("Telegram returned {}", status));
            tracing::error!("Telegram rejected photo: {}", description);
            return Err(CoreError::RelayError(description));
        }

        tracing::info!("Photo relayed to Telegram");
        Ok(())
    }
}
