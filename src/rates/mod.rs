//! Rate source.
//!
//! Responsibilities:
//! • Maintain a connection to the server-push rate feed.
//! • Keep the latest bid / ask in a `watch` channel (last update wins).
//! • Reconnect with a fixed backoff.

pub mod feed;

pub use feed::{connect_and_stream, parse_rate_message, spawn_rate_watcher};
