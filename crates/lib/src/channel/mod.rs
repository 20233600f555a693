//! Push channel: WebSocket text frames carrying feed items and keep-alive heartbeats.

mod client;
mod protocol;

pub use client::{run_feed_client, ReconnectPolicy};
pub use protocol::{decode_frame, Frame, HEARTBEAT};
