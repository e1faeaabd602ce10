use std::future::Future;

use crate::domain::{common::entities::app_errors::CoreError, relay::value_objects::PhotoMessage};

/// Port for forwarding analyzed photos to a messaging bot
#[cfg_attr(test, mockall::automock)]
pub trait MessagingRelay: Send + Sync {
    /// Whether both bot credentials are present.
    fn is_configured(&self) -> bool;

    /// Sends the photo with its caption.
    ///
    /// Returns [`CoreError::RelayNotConfigured`] before any network call when
    /// credentials are missing.
    fn send_photo(
        &self,
        message: PhotoMessage,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}
