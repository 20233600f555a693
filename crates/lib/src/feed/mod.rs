//! Live inbox feed: items, the bounded newest-first list, the renderer, and views.

mod bounded;
mod item;
mod renderer;
mod view;

pub use bounded::BoundedFeed;
pub use item::{format_timestamp, truncate_address, FeedItem};
pub use renderer::{ChannelState, LiveBoundedFeedRenderer, MessageOutcome, RendererOptions};
pub use view::{detail_link, FeedRow, FeedView, RecordingView, RenderOptions, TerminalView};
