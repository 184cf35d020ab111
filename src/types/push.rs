use serde::Deserialize;

/// The credential a push platform hands back after a successful
/// subscription. The subscriber identifier is derived from the endpoint;
/// the keys only matter to whoever encrypts pushes and may be absent.
#[derive(Debug, Clone, Deserialize)]
pub struct PushSubscription {
    pub endpoint: String,
    #[serde(default, alias = "expirationTime")]
    pub expiration_time: Option<i64>,
    #[serde(default)]
    pub keys: Option<SubscriptionKeys>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionKeys {
    pub p256dh: String,
    pub auth: String,
}

/// Options for requesting a push subscription. Delivery without explicit
/// user consent is refused, so `user_visible_only` must be set.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubscribeOptions {
    pub user_visible_only: bool,
}

/// A message forwarded from the service worker to the client. The worker
/// relays whatever the push carried; only the channel name is interesting
/// here, and even that is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkerMessage {
    #[serde(default, alias = "Channel")]
    pub channel: Option<String>,
}
