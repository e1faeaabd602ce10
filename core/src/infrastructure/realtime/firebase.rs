use futures::StreamExt;
use reqwest::{Client, RequestBuilder, header::ACCEPT};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::instrument;
use url::Url;

use crate::{
    domain::{
        common::{RealtimeConfig, entities::app_errors::CoreError},
        realtime::{
            entities::SubscriptionEvent,
            ports::RealtimeStore,
            subscription::{SUBSCRIPTION_BUFFER, Subscription},
            value_objects::StorePath,
        },
    },
    infrastructure::realtime::{
        event_stream::{SseFrame, SseFrameBuffer},
        tree::CachedTree,
    },
};

/// Firebase Realtime Database over its REST and streaming API.
#[derive(Debug, Clone)]
pub struct FirebaseRealtimeStore {
    database_url: Url,
    auth_token: Option<String>,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct StreamPayload {
    path: String,
    data: Value,
}

#[derive(Debug, PartialEq)]
enum FrameOutcome {
    Changed,
    Ignored,
    Ended(String),
}

impl FirebaseRealtimeStore {
    pub fn new(config: &RealtimeConfig) -> Result<Self, CoreError> {
        let mut database_url = Url::parse(&config.database_url).map_err(|e| {
            CoreError::Invalid(format!(
                "Invalid database URL {}: {}",
                config.database_url, e
            ))
        })?;

        if !database_url.path().ends_with('/') {
            let path = format!("{}/", database_url.path());
            database_url.set_path(&path);
        }

        Ok(Self {
            database_url,
            auth_token: config.auth_token.clone().filter(|t| !t.is_empty()),
            client: Client::new(),
        })
    }

    fn path_url(&self, path: &StorePath) -> Result<Url, CoreError> {
        self.database_url
            .join(&format!("{}.json", path.as_str()))
            .map_err(|e| CoreError::InvalidStorePath(format!("{}: {}", path, e)))
    }

    fn with_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => request.query(&[("auth", token)]),
            None => request,
        }
    }
}

impl RealtimeStore for FirebaseRealtimeStore {
    #[instrument(skip(self), fields(path = %path))]
    async fn get(&self, path: &StorePath) -> Result<Option<Value>, CoreError> {
        let url = self.path_url(path)?;

        let response = self
            .with_auth(self.client.get(url))
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                tracing::error!("Realtime store read failed: {}", e);
                CoreError::StoreError(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Realtime store read error: {} - {}", status, error_text);
            return Err(CoreError::StoreError(format!(
                "read {} returned {}",
                path, status
            )));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| CoreError::StoreError(format!("invalid JSON at {}: {}", path, e)))?;

        Ok((!value.is_null()).then_some(value))
    }

    #[instrument(skip(self, value), fields(path = %path))]
    async fn set(&self, path: &StorePath, value: Value) -> Result<(), CoreError> {
        let url = self.path_url(path)?;

        let response = self
            .with_auth(self.client.put(url))
            .json(&value)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                tracing::error!("Realtime store write failed: {}", e);
                CoreError::StoreError(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Realtime store write error: {} - {}", status, error_text);
            return Err(CoreError::StoreError(format!(
                "write {} returned {}",
                path, status
            )));
        }

        tracing::debug!("Value written");
        Ok(())
    }

    fn subscribe(&self, path: &StorePath) -> Result<Subscription, CoreError> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|_| CoreError::StoreError("subscribe needs a tokio runtime".to_string()))?;

        let request = self
            .with_auth(self.client.get(self.path_url(path)?))
            .header(ACCEPT, "text/event-stream");

        let (sender, receiver) = mpsc::channel(SUBSCRIPTION_BUFFER);
        let worker = runtime.spawn(stream_path(path.clone(), request, sender));

        tracing::debug!(path = %path, "Subscription started");
        Ok(Subscription::new(path.clone(), receiver, worker))
    }
}

#[instrument(skip(request, sender), fields(path = %path))]
async fn stream_path(
    path: StorePath,
    request: RequestBuilder,
    sender: mpsc::Sender<SubscriptionEvent>,
) {
    let message = match forward_events(request, &sender).await {
        Ok(()) => return,
        Err(message) => message,
    };

    tracing::warn!(error = %message, "Subscription ended");
    let _ = sender.send(SubscriptionEvent::Error(message)).await;
}

/// Pumps the event stream into `sender`. `Ok` means the receiver went away;
/// `Err` carries the reason the stream ended.
async fn forward_events(
    request: RequestBuilder,
    sender: &mpsc::Sender<SubscriptionEvent>,
) -> Result<(), String> {
    let response = request
        .send()
        .await
        .map_err(|e| e.without_url().to_string())?;

    if !response.status().is_success() {
        return Err(format!("stream request returned {}", response.status()));
    }

    let mut body = response.bytes_stream();
    let mut frames = SseFrameBuffer::new();
    let mut tree = CachedTree::default();

    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|e| e.without_url().to_string())?;
        for frame in frames.feed(&chunk) {
            if !deliver(&mut tree, &frame, sender).await? {
                return Ok(());
            }
        }
    }

    if let Some(frame) = frames.flush()
        && !deliver(&mut tree, &frame, sender).await?
    {
        return Ok(());
    }

    Err("Subscription stream closed".to_string())
}

/// Applies one frame and pushes the new value. Returns `false` once the
/// receiver is gone.
async fn deliver(
    tree: &mut CachedTree,
    frame: &SseFrame,
    sender: &mpsc::Sender<SubscriptionEvent>,
) -> Result<bool, String> {
    match apply_frame(tree, frame) {
        FrameOutcome::Changed => Ok(sender
            .send(SubscriptionEvent::Value(tree.value().cloned()))
            .await
            .is_ok()),
        FrameOutcome::Ignored => Ok(!sender.is_closed()),
        FrameOutcome::Ended(message) => Err(message),
    }
}

fn apply_frame(tree: &mut CachedTree, frame: &SseFrame) -> FrameOutcome {
    match frame.event.as_str() {
        "put" | "patch" => {
            let payload: StreamPayload = match serde_json::from_str(&frame.data) {
                Ok(payload) => payload,
                Err(e) => {
                    tracing::warn!(error = %e, event = %frame.event, "Skipping malformed event");
                    return FrameOutcome::Ignored;
                }
            };

            if frame.event == "put" {
                tree.put(&payload.path, payload.data);
                return FrameOutcome::Changed;
            }

            match payload.data {
                Value::Object(children) => {
                    tree.patch(&payload.path, children);
                    FrameOutcome::Changed
                }
                other => {
                    tracing::warn!(data = %other, "Skipping patch without object data");
                    FrameOutcome::Ignored
                }
            }
        }
        "keep-alive" => FrameOutcome::Ignored,
        "cancel" => FrameOutcome::Ended("Permission denied".to_string()),
        "auth_revoked" => FrameOutcome::Ended("Auth token revoked".to_string()),
        other => {
            tracing::debug!(event = %other, "Ignoring unknown event");
            FrameOutcome::Ignored
        }
    }
}
