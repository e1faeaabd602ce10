use tokio::{sync::mpsc, task::JoinHandle};

use crate::domain::realtime::{entities::SubscriptionEvent, value_objects::StorePath};

/// Buffered push notifications per subscription before the worker waits.
pub const SUBSCRIPTION_BUFFER: usize = 16;

/// Live listener on one store path.
///
/// Events are produced by a background worker and consumed with
/// [`Subscription::next`]. Dropping the subscription or calling
/// [`Subscription::unsubscribe`] stops the worker.
#[derive(Debug)]
pub struct Subscription {
    path: StorePath,
    receiver: mpsc::Receiver<SubscriptionEvent>,
    worker: Option<JoinHandle<()>>,
}

impl Subscription {
    pub fn new(
        path: StorePath,
        receiver: mpsc::Receiver<SubscriptionEvent>,
        worker: JoinHandle<()>,
    ) -> Self {
        Self {
            path,
            receiver,
            worker: Some(worker),
        }
    }

    /// Subscription fed by a channel whose sender is owned by the caller.
    #[cfg(test)]
    pub fn from_channel(path: StorePath, receiver: mpsc::Receiver<SubscriptionEvent>) -> Self {
        Self {
            path,
            receiver,
            worker: None,
        }
    }

    /// A sender/subscription pair for feeding events by hand.
    #[cfg(test)]
    pub fn channel(path: StorePath) -> (mpsc::Sender<SubscriptionEvent>, Self) {
        let (sender, receiver) = mpsc::channel(SUBSCRIPTION_BUFFER);
        (sender, Self::from_channel(path, receiver))
    }

    /// Next event, or `None` once the subscription has ended.
    pub async fn next(&mut self) -> Option<SubscriptionEvent> {
        self.receiver.recv().await
    }

    pub fn unsubscribe(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.receiver.close();
        if let Some(worker) = self.worker.take() {
            worker.abort();
            tracing::debug!(path = %self.path, "Subscription stopped");
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.stop();
    }
}
