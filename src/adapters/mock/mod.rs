//! Mock implementations for testing.
//!
//! - [`MockFeed`] - feed connection with frame injection
//! - [`MockConnector`] - connector that hands out mock feeds in order

pub mod feed;

pub use feed::{MockConnector, MockFeed, MockFeedHandle};
