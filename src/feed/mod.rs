//! Live log feed: wire records and the WebSocket client that delivers them.
//!
//! The feed is best-effort telemetry. Frames arrive in order over a single
//! socket, are decoded into [`LogRecord`]s, and malformed frames are dropped.
//! There is no reconnection; a closed socket leaves the session displaying
//! what it already has.

pub mod client;
pub mod record;

pub use client::{FeedClient, FeedClientConfig, FeedConnectionState};
pub use record::{decode_frame, parse_timestamp, value_text, LogRecord, RecordType};
