use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Realtime store error: {0}")]
    StoreError(String),

    #[error("Invalid store path: {0}")]
    InvalidStorePath(String),

    #[error("Missing bot token or chat ID")]
    RelayNotConfigured,

    #[error("Messaging relay error: {0}")]
    RelayError(String),

    #[error("Internal server error")]
    InternalServerError,
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        tracing::error!("JSON serialization failed: {}", e);
        CoreError::InternalServerError
    }
}
