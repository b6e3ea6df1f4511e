//! Messages delivered to the application event loop.

use crate::feed::FeedConnectionState;

/// Message types for async communication with the event loop.
///
/// Feed messages carry the generation of the session that produced them.
/// After a rebuild the generation changes and anything still in flight from
/// the old connection is discarded.
#[derive(Debug, Clone, PartialEq)]
pub enum AppMessage {
    /// A raw frame arrived on the feed
    Frame { generation: u64, text: String },
    /// The feed connection state changed
    FeedState {
        generation: u64,
        state: FeedConnectionState,
    },
    /// The configuration file changed on disk
    ConfigChanged,
}
