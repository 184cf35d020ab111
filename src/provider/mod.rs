pub use self::http::HTTP;

mod http;

use chrono::{DateTime, Utc};

use crate::{
    error::Error,
    model::{Message, Subscription},
};

/// Transport seam to the channel service. Everything the client does on
/// the wire goes through this, so tests can substitute a fake.
#[allow(async_fn_in_trait)]
pub trait ChannelApi {
    /// Messages posted to `channel` after `from`, oldest first.
    async fn read_messages(
        &self,
        channel: &str,
        from: DateTime<Utc>,
    ) -> Result<Vec<Message>, Error>;

    /// Current subscription records for the descriptor. Non-empty means
    /// the subscriber is already registered on the channel.
    async fn subscribing(
        &self,
        subscription: &Subscription,
    ) -> Result<Vec<Subscription>, Error>;

    async fn subscribe(
        &self,
        subscription: &Subscription,
    ) -> Result<Subscription, Error>;

    async fn unsubscribe(
        &self,
        subscription: &Subscription,
    ) -> Result<(), Error>;

    /// Posts a raw payload to the channel. The service stores the bytes
    /// verbatim and rejects empty payloads.
    async fn publish(&self, channel: &str, payload: &[u8])
        -> Result<(), Error>;
}
