//! WebSocket push channel client: connects, feeds frames to the renderer, reconnects with backoff.

use crate::config::ReconnectConfig;
use crate::error::FeedError;
use crate::feed::{ChannelState, FeedView, LiveBoundedFeedRenderer};
use futures_util::StreamExt;
use std::time::Duration;
use tokio_tungstenite::tungstenite::Message;

/// Exponential backoff: `2^min(attempt, 3)` seconds, capped at `max_delay`.
#[derive(Debug, Clone)]
pub struct ReconnectPolicy {
    pub enabled: bool,
    pub max_delay: Duration,
    /// Consecutive failed connection attempts before giving up. None retries forever.
    pub max_attempts: Option<u32>,
}

impl ReconnectPolicy {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            max_delay: Duration::from_secs(10),
            max_attempts: None,
        }
    }

    /// A zero delay cap is rejected while reconnect is enabled.
    pub fn from_config(config: &ReconnectConfig) -> Result<Self, FeedError> {
        if config.enabled && config.max_delay_secs == 0 {
            return Err(FeedError::Config(
                "reconnect.maxDelaySecs must be positive".to_string(),
            ));
        }
        Ok(Self {
            enabled: config.enabled,
            max_delay: Duration::from_secs(config.max_delay_secs),
            max_attempts: config.max_attempts,
        })
    }

    pub fn delay_for(&self, attempt: u32) -> Duration {
        Duration::from_secs(2_u64.pow(attempt.min(3))).min(self.max_delay)
    }
}

/// Run the push channel until it ends (reconnect disabled), attempts are exhausted, or forever.
/// The feed is kept across reconnects. With reconnect disabled, a transport failure is returned.
pub async fn run_feed_client<V: FeedView>(
    url: &str,
    policy: &ReconnectPolicy,
    renderer: &mut LiveBoundedFeedRenderer<V>,
) -> Result<(), FeedError> {
    let mut failures: u32 = 0;
    loop {
        let result = run_session(url, renderer).await;
        let opened = renderer.state() == ChannelState::Connected;
        if let Err(ref e) = result {
            renderer.on_channel_error(e);
        }
        renderer.on_channel_closed();

        if !policy.enabled {
            return result;
        }

        if opened {
            failures = 0;
        } else {
            failures += 1;
            if policy.max_attempts.is_some_and(|max| failures >= max) {
                return Err(FeedError::Exhausted(failures));
            }
        }
        let delay = policy.delay_for(failures);
        log::info!(
            "reconnecting to {} in {}s (attempt {})",
            url,
            delay.as_secs(),
            failures + 1
        );
        tokio::time::sleep(delay).await;
    }
}

/// One connection: open, dispatch text frames until close or error.
async fn run_session<V: FeedView>(
    url: &str,
    renderer: &mut LiveBoundedFeedRenderer<V>,
) -> Result<(), FeedError> {
    log::debug!("connecting to {}", url);
    let (mut ws, _) = tokio_tungstenite::connect_async(url).await?;
    renderer.on_channel_open();

    while let Some(msg) = ws.next().await {
        match msg? {
            Message::Text(text) => {
                renderer.on_channel_message(&text);
            }
            Message::Close(frame) => {
                log::debug!("push channel close frame: {:?}", frame);
                break;
            }
            _ => {}
        }
    }
    Ok(())
}
