//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`TungsteniteConnector`] - opens [`FeedClient`](crate::feed::FeedClient)
//!   connections with tokio-tungstenite
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockFeed`] - frame injection without a socket
//! - [`mock::MockConnector`] - hands out pre-built mock feeds

pub mod mock;
pub mod tungstenite_feed;

pub use mock::{MockConnector, MockFeed, MockFeedHandle};
pub use tungstenite_feed::TungsteniteConnector;
