//! Configuration types and loading.
//!
//! Config is loaded from a JSON file (e.g. `~/.testinbox/config.json`) and environment.
//! Command-line flags are applied on top by the CLI.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level application config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Push channel endpoint and list settings.
    #[serde(default)]
    pub feed: FeedConfig,

    /// What to do when the push channel drops.
    #[serde(default)]
    pub reconnect: ReconnectConfig,
}

/// Push channel URL, list capacity, and rendering options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedConfig {
    /// WebSocket URL of the push channel (default "ws://127.0.0.1:8080/ws"). Overridden by TESTINBOX_FEED_URL env.
    #[serde(default = "default_feed_url")]
    pub url: String,

    /// Maximum number of rows kept in the live list (default 25). Must be positive.
    #[serde(default = "default_feed_capacity")]
    pub capacity: usize,

    /// Only show messages addressed to this recipient (case-insensitive). Unset shows everything.
    #[serde(default)]
    pub recipient: Option<String>,

    /// Show only the local part (before `@`) of sender and recipient addresses.
    #[serde(default)]
    pub truncate_addresses: bool,

    /// Clear the terminal before each redraw. Ignored when stdout is not a terminal.
    #[serde(default = "default_clear_screen")]
    pub clear_screen: bool,
}

/// Reconnect with exponential backoff after the push channel closes or fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconnectConfig {
    /// When false, the client stops after the first connection ends (default true).
    #[serde(default = "default_reconnect_enabled")]
    pub enabled: bool,

    /// Upper bound for the backoff delay in seconds (default 10).
    #[serde(default = "default_max_delay_secs")]
    pub max_delay_secs: u64,

    /// Give up after this many consecutive failed connection attempts. Unset retries forever.
    #[serde(default)]
    pub max_attempts: Option<u32>,
}

fn default_feed_url() -> String {
    "ws://127.0.0.1:8080/ws".to_string()
}

fn default_feed_capacity() -> usize {
    25
}

fn default_clear_screen() -> bool {
    true
}

fn default_reconnect_enabled() -> bool {
    true
}

fn default_max_delay_secs() -> u64 {
    10
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
            capacity: default_feed_capacity(),
            recipient: None,
            truncate_addresses: false,
            clear_screen: default_clear_screen(),
        }
    }
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            enabled: default_reconnect_enabled(),
            max_delay_secs: default_max_delay_secs(),
            max_attempts: None,
        }
    }
}

/// Resolve the push channel URL: env TESTINBOX_FEED_URL overrides config.
pub fn resolve_feed_url(config: &Config) -> String {
    std::env::var("TESTINBOX_FEED_URL")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| config.feed.url.trim().to_string())
}

/// Resolve config path from env or default.
pub fn default_config_path() -> PathBuf {
    std::env::var("TESTINBOX_CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .map(|h| h.join(".testinbox").join("config.json"))
                .unwrap_or_else(|| PathBuf::from("config.json"))
        })
}

/// Load config from the given path, or the default path (or TESTINBOX_CONFIG_PATH). Missing file => default config.
/// Returns the config and the path that was used.
pub fn load_config(path: Option<PathBuf>) -> Result<(Config, PathBuf)> {
    let path = path.unwrap_or_else(default_config_path);
    let config = if !path.exists() {
        log::debug!("config file not found, using defaults: {}", path.display());
        Config::default()
    } else {
        let s = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        serde_json::from_str(&s)
            .with_context(|| format!("parsing config from {}", path.display()))?
    };
    Ok((config, path))
}
