use chrono::{DateTime, Utc};

use crate::{error::Error, helpers, model::Message, provider::ChannelApi};

/// One decoded entry of the rendered message list.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageView {
    pub created_at: DateTime<Utc>,
    pub text: String,
}

/// Holds the rendered message list and refreshes it from the service.
/// Every refresh replaces the whole list with whatever the read request
/// returned, in the order received.
#[derive(Debug, Default)]
pub struct MessageController {
    lookback_minutes: i64,
    entries: Vec<MessageView>,
}

impl MessageController {
    pub fn new(lookback_minutes: i64) -> MessageController {
        MessageController {
            lookback_minutes,
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[MessageView] {
        &self.entries
    }

    pub fn from_bound(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        helpers::refresh_window(now, self.lookback_minutes)
    }

    /// The message refresh operation: read everything on the channel
    /// since `now − lookback` and replace the list. A failed read leaves
    /// the previous list untouched.
    pub async fn refresh<A: ChannelApi>(
        &mut self,
        api: &A,
        channel: &str,
        now: DateTime<Utc>,
    ) -> Result<usize, Error> {
        let from = self.from_bound(now);
        let messages = api.read_messages(channel, from).await?;
        self.entries = Self::decode(&messages)?;
        Ok(self.entries.len())
    }

    fn decode(messages: &[Message]) -> Result<Vec<MessageView>, Error> {
        messages
            .iter()
            .map(|message| {
                Ok(MessageView {
                    created_at: message.created_at,
                    text: helpers::decode_payload(&message.payload)?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Message;
    use crate::provider::testing::FakeApi;
    use chrono::TimeZone;

    fn message(minute: u32, payload: &str) -> Message {
        Message {
            created_at: Utc
                .with_ymd_and_hms(2026, 8, 7, 9, minute, 0)
                .unwrap(),
            payload: payload.to_owned(),
        }
    }

    #[tokio::test]
    async fn test_refresh_decodes_in_received_order() {
        let api = FakeApi {
            // "first", "second"
            messages: vec![message(55, "Zmlyc3Q="), message(56, "c2Vjb25k")],
            ..FakeApi::default()
        };
        let mut controller = MessageController::new(10);

        let count = controller
            .refresh(&api, "test", Utc::now())
            .await
            .unwrap();
        assert_eq!(count, 2);
        let texts: Vec<&str> = controller
            .entries()
            .iter()
            .map(|e| e.text.as_str())
            .collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_refresh_replaces_whole_list() {
        let now = Utc.with_ymd_and_hms(2026, 8, 7, 10, 0, 0).unwrap();
        let mut controller = MessageController::new(10);

        let api = FakeApi {
            messages: vec![message(55, "Zmlyc3Q=")],
            ..FakeApi::default()
        };
        controller.refresh(&api, "test", now).await.unwrap();
        assert_eq!(controller.entries().len(), 1);

        // The next response no longer contains the first message.
        let api = FakeApi {
            messages: vec![message(56, "c2Vjb25k")],
            ..FakeApi::default()
        };
        controller.refresh(&api, "test", now).await.unwrap();
        let texts: Vec<&str> = controller
            .entries()
            .iter()
            .map(|e| e.text.as_str())
            .collect();
        assert_eq!(texts, vec!["second"]);
    }

    #[tokio::test]
    async fn test_bad_payload_fails_refresh_and_keeps_list() {
        let now = Utc.with_ymd_and_hms(2026, 8, 7, 10, 0, 0).unwrap();
        let mut controller = MessageController::new(10);

        let api = FakeApi {
            messages: vec![message(55, "Zmlyc3Q=")],
            ..FakeApi::default()
        };
        controller.refresh(&api, "test", now).await.unwrap();

        let api = FakeApi {
            messages: vec![message(56, "*** not base64 ***")],
            ..FakeApi::default()
        };
        assert!(controller.refresh(&api, "test", now).await.is_err());
        assert_eq!(controller.entries()[0].text, "first");
    }

    #[test]
    fn test_from_bound_is_lookback_before_now() {
        let controller = MessageController::new(10);
        let now = Utc.with_ymd_and_hms(2026, 8, 7, 10, 0, 0).unwrap();
        let from = controller.from_bound(now);
        assert_eq!(
            from,
            Utc.with_ymd_and_hms(2026, 8, 7, 9, 50, 0).unwrap()
        );
    }
}
