//! testinbox core library: the live bounded inbox feed, its push channel client,
//! configuration, and views used by the CLI.

pub mod channel;
pub mod config;
pub mod error;
pub mod feed;
pub mod init;

pub use error::FeedError;
