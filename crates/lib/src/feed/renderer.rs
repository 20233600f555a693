//! Live list driven by push channel events.
//!
//! The renderer owns the bounded feed and a view. Channel events are handed to it one at a
//! time (`&mut self`), so there is no interleaving and no locking. Nothing here returns an
//! error to the caller: malformed frames and transport failures are logged and dropped.

use super::bounded::BoundedFeed;
use super::view::{FeedRow, FeedView, RenderOptions};
use super::FeedItem;
use crate::channel::{decode_frame, Frame};
use crate::config::FeedConfig;
use crate::error::FeedError;
use std::num::NonZeroUsize;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Disconnected,
    Connected,
}

/// What `on_channel_message` did with a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageOutcome {
    Heartbeat,
    /// Item inserted; `evicted` is the id pushed out of the list, if any.
    Accepted { evicted: Option<String> },
    /// Valid item for another recipient.
    Filtered,
    /// Frame could not be decoded.
    Rejected,
}

#[derive(Debug, Clone)]
pub struct RendererOptions {
    pub capacity: NonZeroUsize,
    /// Keep only items for this recipient (ASCII case-insensitive).
    pub recipient: Option<String>,
    pub render: RenderOptions,
}

impl RendererOptions {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            recipient: None,
            render: RenderOptions::default(),
        }
    }

    pub fn from_config(feed: &FeedConfig) -> Result<Self, FeedError> {
        let capacity = NonZeroUsize::new(feed.capacity)
            .ok_or_else(|| FeedError::Config("feed.capacity must be positive".to_string()))?;
        let recipient = feed
            .recipient
            .as_ref()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        Ok(Self {
            capacity,
            recipient,
            render: RenderOptions {
                truncate_addresses: feed.truncate_addresses,
            },
        })
    }
}

pub struct LiveBoundedFeedRenderer<V: FeedView> {
    feed: BoundedFeed,
    view: V,
    state: ChannelState,
    recipient: Option<String>,
    render_options: RenderOptions,
    last_heartbeat: Option<Instant>,
}

impl<V: FeedView> LiveBoundedFeedRenderer<V> {
    pub fn new(options: RendererOptions, view: V) -> Self {
        Self {
            feed: BoundedFeed::new(options.capacity),
            view,
            state: ChannelState::Disconnected,
            recipient: options.recipient,
            render_options: options.render,
            last_heartbeat: None,
        }
    }

    pub fn feed(&self) -> &BoundedFeed {
        &self.feed
    }

    pub fn state(&self) -> ChannelState {
        self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn last_heartbeat(&self) -> Option<Instant> {
        self.last_heartbeat
    }

    pub fn on_channel_open(&mut self) {
        log::info!("push channel connection established");
        self.state = ChannelState::Connected;
    }

    pub fn on_channel_message(&mut self, raw: &str) -> MessageOutcome {
        match decode_frame(raw) {
            Ok(Frame::Heartbeat) => {
                log::debug!("heartbeat received");
                self.last_heartbeat = Some(Instant::now());
                MessageOutcome::Heartbeat
            }
            Ok(Frame::Item(item)) => {
                if !self.wants(&item) {
                    log::debug!("item {} for {} filtered out", item.id, item.recipient);
                    return MessageOutcome::Filtered;
                }
                let evicted = self.accept_item(item);
                MessageOutcome::Accepted { evicted }
            }
            Err(e) => {
                log::warn!("discarding push channel frame: {}", e);
                MessageOutcome::Rejected
            }
        }
    }

    /// Insert newest-first, evict the single oldest on overflow, then redraw. Returns the evicted id.
    pub fn accept_item(&mut self, item: FeedItem) -> Option<String> {
        log::debug!("accepting item {}", item.id);
        let evicted = self.feed.accept(item).map(|old| old.id);
        self.render();
        evicted
    }

    pub fn on_channel_error(&mut self, err: &FeedError) {
        log::error!("push channel error: {}", err);
    }

    pub fn on_channel_closed(&mut self) {
        if self.state == ChannelState::Connected {
            log::info!("push channel closed");
        }
        self.state = ChannelState::Disconnected;
    }

    /// Current rows, newest first.
    pub fn rows(&self) -> Vec<FeedRow> {
        self.feed
            .iter()
            .map(|item| FeedRow::from_item(item, self.render_options))
            .collect()
    }

    /// Full redraw of the view from the current feed.
    pub fn render(&mut self) {
        let rows = self.rows();
        self.view.draw(&rows);
    }

    fn wants(&self, item: &FeedItem) -> bool {
        match &self.recipient {
            Some(r) => item.recipient.trim().eq_ignore_ascii_case(r),
            None => true,
        }
    }
}
