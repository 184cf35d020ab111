use std::fmt;

use chrono::SecondsFormat;

use crate::{controller::messages::MessageView, model::SubscribeState};

/// View description produced by [`render`]. Plain data, so tests can
/// assert on it without a terminal and `main` only has to print it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub subscriber: Option<String>,
    pub subscribing: String,
    pub entries: Vec<(String, String)>,
}

/// Maps the message list and subscription state to a view. Pure, one
/// entry per message in the order given.
pub fn render(
    entries: &[MessageView],
    state: SubscribeState,
    subscriber: Option<&str>,
) -> Document {
    Document {
        subscriber: subscriber.map(str::to_owned),
        subscribing: state.to_string(),
        entries: entries
            .iter()
            .map(|entry| {
                (
                    entry
                        .created_at
                        .to_rfc3339_opts(SecondsFormat::Secs, true),
                    entry.text.clone(),
                )
            })
            .collect(),
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "subscriber: {}",
            self.subscriber.as_deref().unwrap_or("-")
        )?;
        writeln!(f, "subscribing: {}", self.subscribing)?;
        if self.entries.is_empty() {
            return writeln!(f, "no messages in window");
        }
        for (created_at, text) in &self.entries {
            writeln!(f, "{}  {}", created_at, text)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn view(minute: u32, text: &str) -> MessageView {
        MessageView {
            created_at: Utc
                .with_ymd_and_hms(2026, 8, 7, 9, minute, 0)
                .unwrap(),
            text: text.to_owned(),
        }
    }

    #[test]
    fn test_one_entry_per_message_in_order() {
        let doc = render(
            &[view(55, "first"), view(56, "second")],
            SubscribeState::Subscribed,
            Some("XYZ123"),
        );
        assert_eq!(doc.entries.len(), 2);
        assert_eq!(doc.entries[0].1, "first");
        assert_eq!(doc.entries[1].1, "second");
        assert_eq!(doc.entries[0].0, "2026-08-07T09:55:00Z");
    }

    #[test]
    fn test_subscribing_display() {
        let doc =
            render(&[], SubscribeState::Unsubscribed, Some("XYZ123"));
        assert_eq!(doc.subscribing, "False");

        let doc = render(&[], SubscribeState::Subscribed, Some("XYZ123"));
        assert_eq!(doc.subscribing, "True");

        let doc = render(&[], SubscribeState::Unknown, None);
        assert_eq!(doc.subscribing, "unknown");
        assert!(doc.subscriber.is_none());
    }

    #[test]
    fn test_display_output() {
        let doc = render(
            &[view(55, "hello")],
            SubscribeState::Subscribed,
            Some("XYZ123"),
        );
        let text = doc.to_string();
        assert!(text.contains("subscriber: XYZ123"));
        assert!(text.contains("subscribing: True"));
        assert!(text.contains("2026-08-07T09:55:00Z  hello"));
    }
}
