use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{DateTime, Duration, SecondsFormat, Utc};

use crate::error::Error;

/// Derives the subscriber identifier from a push subscription endpoint:
/// the final path segment of the URL. An endpoint ending in `/` yields
/// the empty string.
pub fn iid_from_endpoint(endpoint: &str) -> String {
    endpoint
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_owned()
}

/// Decodes a message payload from the base64 text the service returns
/// into displayable text.
pub fn decode_payload(payload: &str) -> Result<String, Error> {
    let bytes = BASE64.decode(payload)?;
    let text = String::from_utf8(bytes)?;
    Ok(text)
}

/// Lower bound of the message refresh window at a given instant.
pub fn refresh_window(
    now: DateTime<Utc>,
    lookback_minutes: i64,
) -> DateTime<Utc> {
    now - Duration::minutes(lookback_minutes)
}

/// Formats a timestamp the way the read endpoint expects its `from`
/// query parameter, millisecond precision with a `Z` suffix.
pub fn format_from(from: DateTime<Utc>) -> String {
    from.to_rfc3339_opts(SecondsFormat::Millis, true)
}
