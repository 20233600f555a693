//! Push channel wire format: either the keep-alive sentinel or a JSON feed item.

use crate::error::FeedError;
use crate::feed::FeedItem;

/// Literal text frame the server sends as a liveness signal. Carries no data.
pub const HEARTBEAT: &str = "heartbeat";

/// A decoded text frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Heartbeat,
    Item(FeedItem),
}

/// Decode one text frame. The sentinel is matched exactly, before any JSON parsing.
pub fn decode_frame(raw: &str) -> Result<Frame, FeedError> {
    if raw == HEARTBEAT {
        return Ok(Frame::Heartbeat);
    }
    let item: FeedItem = serde_json::from_str(raw)?;
    Ok(Frame::Item(item))
}
