use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One channel message as the service returns it. The payload is the
/// base64 text the service produces when encoding the stored bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "CreatedAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "Payload")]
    pub payload: String,
}

/// Subscription descriptor for a `{channel, subscriber}` pair. Built once
/// per successful push registration and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    // Status responses echo stored records that may omit the channel.
    #[serde(rename = "Channel", default)]
    pub channel: String,
    #[serde(rename = "IID")]
    pub iid: String,
}

/// Client-side mirror of the server-side subscription membership.
///
/// Resolves out of `Unknown` exactly once, from the initial status check,
/// and afterwards only flips on an acknowledged toggle call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubscribeState {
    #[default]
    Unknown,
    Subscribed,
    Unsubscribed,
}

impl SubscribeState {
    pub fn is_known(&self) -> bool {
        !matches!(self, SubscribeState::Unknown)
    }
}

impl fmt::Display for SubscribeState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SubscribeState::Unknown => write!(f, "unknown"),
            SubscribeState::Subscribed => write!(f, "True"),
            SubscribeState::Unsubscribed => write!(f, "False"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_wire_field_names() {
        let sub = Subscription {
            channel: String::from("test"),
            iid: String::from("XYZ123"),
        };
        let json = serde_json::to_string(&sub).unwrap();
        assert_eq!(json, r#"{"Channel":"test","IID":"XYZ123"}"#);
    }

    #[test]
    fn test_message_deserializes_service_shape() {
        // The service serializes stored bytes as base64 text and ignores
        // fields the client has no use for.
        let json = r#"{
            "ChannelKey": "agtzfmdhZS1wdXNo",
            "CreatedAt": "2026-08-07T10:00:00.000Z",
            "Payload": "aGVsbG8="
        }"#;
        let message: Message = serde_json::from_str(json).unwrap();
        assert_eq!(message.payload, "aGVsbG8=");
        let expected: DateTime<Utc> =
            "2026-08-07T10:00:00Z".parse().unwrap();
        assert_eq!(message.created_at, expected);
    }

    #[test]
    fn test_subscribe_state_display() {
        assert_eq!(SubscribeState::Unknown.to_string(), "unknown");
        assert_eq!(SubscribeState::Subscribed.to_string(), "True");
        assert_eq!(SubscribeState::Unsubscribed.to_string(), "False");
    }
}
