use bytes::Bytes;

/// Records older than this are stale.
pub const FRESHNESS_WINDOW_MS: i64 = 30 * 60 * 1000;

pub const DEFAULT_IMAGE_MIME_TYPE: &str = "image/jpeg";

/// An uploaded image as received by the handler.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePayload {
    pub data: Bytes,
    pub mime_type: String,
    pub file_name: Option<String>,
}

impl ImagePayload {
    pub fn new(data: Bytes, mime_type: Option<String>, file_name: Option<String>) -> Self {
        let mime_type = mime_type
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGE_MIME_TYPE.to_string());

        Self {
            data,
            mime_type,
            file_name,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// File name to use when forwarding the image, derived from the MIME type
    /// when the upload had none.
    pub fn file_name_or_default(&self) -> String {
        if let Some(name) = self.file_name.as_deref()
            && !name.is_empty()
        {
            return name.to_string();
        }

        let extension = self
            .mime_type
            .strip_prefix("image/")
            .map(|subtype| if subtype == "jpeg" { "jpg" } else { subtype })
            .unwrap_or("bin");

        format!("food.{}", extension)
    }
}

#[derive(Debug, Clone)]
pub struct AnalyzeFoodInput {
    pub image: ImagePayload,
}
