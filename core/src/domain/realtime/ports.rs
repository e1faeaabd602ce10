use std::future::Future;

use serde_json::Value;

use crate::domain::{
    common::entities::app_errors::CoreError,
    realtime::{subscription::Subscription, value_objects::StorePath},
};

/// Port for the external key-path realtime database
#[cfg_attr(test, mockall::automock)]
pub trait RealtimeStore: Send + Sync {
    /// Reads the value at a path once. `None` when nothing is stored there.
    fn get(
        &self,
        path: &StorePath,
    ) -> impl Future<Output = Result<Option<Value>, CoreError>> + Send;

    /// Overwrites the value at a path.
    fn set(
        &self,
        path: &StorePath,
        value: Value,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Starts listening to a path. Must be called from within a tokio runtime.
    fn subscribe(&self, path: &StorePath) -> Result<Subscription, CoreError>;
}
