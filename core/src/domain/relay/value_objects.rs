use crate::domain::food_analysis::value_objects::ImagePayload;

/// Telegram rejects photo captions longer than this.
pub const MAX_CAPTION_CHARS: usize = 1024;

pub const DEFAULT_CAPTION_LABEL: &str = "Gemini";

#[derive(Debug, Clone, PartialEq)]
pub struct PhotoMessage {
    pub image: ImagePayload,
    pub caption: String,
}
