//! One received message as delivered on the push channel.

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;

/// Wire record: `{ "id", "sender", "recipient", "subject", "receivedAt" }`.
/// Extra fields (bodies, headers, spam score) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    /// Server-assigned id; a JSON string or integer on the wire.
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub recipient: String,
    #[serde(default)]
    pub subject: String,
    /// Serialized timestamp, normally RFC 3339. A payload with both `receivedAt` and `received_at` is a duplicate field and fails to decode.
    #[serde(default, alias = "received_at")]
    pub received_at: String,
}

impl FeedItem {
    pub fn new(
        id: impl Into<String>,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        subject: impl Into<String>,
        received_at: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            sender: sender.into(),
            recipient: recipient.into(),
            subject: subject.into(),
            received_at: received_at.into(),
        }
    }

    /// `received_at` in local time, or verbatim when it is not RFC 3339.
    pub fn received_display(&self) -> String {
        format_timestamp(&self.received_at, &Local)
    }
}

/// Render an RFC 3339 timestamp as `YYYY-MM-DD HH:MM:SS` in `tz`; unparseable input is returned as-is.
pub fn format_timestamp<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(t) => t.with_timezone(tz).format("%Y-%m-%d %H:%M:%S").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Local part of an address (before the first `@`); the whole string when there is none.
pub fn truncate_address(address: &str) -> &str {
    match address.find('@') {
        Some(at) => &address[..at],
        None => address,
    }
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    let id = match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Signed(n) => n.to_string(),
        RawId::Unsigned(n) => n.to_string(),
    };
    if id.trim().is_empty() {
        return Err(serde::de::Error::custom("empty id"));
    }
    Ok(id)
}
