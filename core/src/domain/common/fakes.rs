//! Hand-written port implementations shared by the service tests.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use serde_json::Value;
use tokio::sync::mpsc;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food_analysis::{ports::LLMClient, value_objects::ImagePayload},
    realtime::{
        entities::SubscriptionEvent, ports::RealtimeStore, subscription::Subscription,
        value_objects::StorePath,
    },
    relay::{ports::MessagingRelay, value_objects::PhotoMessage},
};

#[derive(Clone, Default)]
pub struct FakeLLMClient {
    reply: Option<Result<String, CoreError>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl FakeLLMClient {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Some(Ok(text.to_string())),
            ..Default::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Some(Err(CoreError::ExternalServiceError(message.to_string()))),
            ..Default::default()
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl LLMClient for FakeLLMClient {
    async fn generate_with_image(
        &self,
        prompt: String,
        _image: ImagePayload,
    ) -> Result<String, CoreError> {
        self.prompts.lock().unwrap().push(prompt);
        self.reply
            .clone()
            .unwrap_or_else(|| Err(CoreError::ExternalServiceError("no reply".to_string())))
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}

#[derive(Clone, Default)]
pub struct FakeRealtimeStore {
    values: Arc<Mutex<HashMap<String, Value>>>,
    writes: Arc<Mutex<usize>>,
    write_error: Option<String>,
    read_error: Option<String>,
    subscribers: Arc<Mutex<HashMap<String, mpsc::Sender<SubscriptionEvent>>>>,
}

impl FakeRealtimeStore {
    pub fn failing_writes(message: &str) -> Self {
        Self {
            write_error: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn failing_reads(message: &str) -> Self {
        Self {
            read_error: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn with_value(self, path: &str, value: Value) -> Self {
        self.values.lock().unwrap().insert(path.to_string(), value);
        self
    }

    pub fn value_at(&self, path: &str) -> Option<Value> {
        self.values.lock().unwrap().get(path).cloned()
    }

    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap()
    }

    /// Sender feeding the subscription opened on `path`, if any.
    pub fn subscriber(&self, path: &str) -> Option<mpsc::Sender<SubscriptionEvent>> {
        self.subscribers.lock().unwrap().get(path).cloned()
    }
}

impl RealtimeStore for FakeRealtimeStore {
    async fn get(&self, path: &StorePath) -> Result<Option<Value>, CoreError> {
        if let Some(message) = &self.read_error {
            return Err(CoreError::StoreError(message.clone()));
        }
        Ok(self.value_at(path.as_str()))
    }

    async fn set(&self, path: &StorePath, value: Value) -> Result<(), CoreError> {
        if let Some(message) = &self.write_error {
            return Err(CoreError::StoreError(message.clone()));
        }
        *self.writes.lock().unwrap() += 1;
        self.values
            .lock()
            .unwrap()
            .insert(path.as_str().to_string(), value);
        Ok(())
    }

    fn subscribe(&self, path: &StorePath) -> Result<Subscription, CoreError> {
        let (sender, subscription) = Subscription::channel(path.clone());
        self.subscribers
            .lock()
            .unwrap()
            .insert(path.as_str().to_string(), sender);
        Ok(subscription)
    }
}

#[derive(Clone, Default)]
pub struct FakeRelay {
    configured: bool,
    error: Option<String>,
    sent: Arc<Mutex<Vec<PhotoMessage>>>,
}

impl FakeRelay {
    pub fn configured() -> Self {
        Self {
            configured: true,
            ..Default::default()
        }
    }

    pub fn unconfigured() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self {
            configured: true,
            error: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<PhotoMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl MessagingRelay for FakeRelay {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn send_photo(&self, message: PhotoMessage) -> Result<(), CoreError> {
        if !self.configured {
            return Err(CoreError::RelayNotConfigured);
        }
        if let Some(error) = &self.error {
            return Err(CoreError::RelayError(error.clone()));
        }
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}
