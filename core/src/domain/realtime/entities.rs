use serde_json::Value;

/// One push notification delivered by a subscription.
#[derive(Debug, Clone, PartialEq)]
pub enum SubscriptionEvent {
    /// Full current value at the subscribed path; `None` when the path is empty.
    Value(Option<Value>),
    /// The subscription failed; no further events follow.
    Error(String),
}
