//! Error type shared by the feed, the push channel client, and option building.

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("malformed feed payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("push channel transport error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),
    #[error("invalid feed configuration: {0}")]
    Config(String),
    #[error("push channel gave up after {0} failed connection attempts")]
    Exhausted(u32),
}

impl FeedError {
    /// Transport failures are already reported through the renderer's channel error handler.
    pub fn is_transport(&self) -> bool {
        matches!(self, FeedError::Transport(_))
    }
}
