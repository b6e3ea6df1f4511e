//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`FeedConnection`] - a live source of raw log frames
//! - [`FeedConnector`] - opens a [`FeedConnection`] for an endpoint

pub mod feed;

pub use feed::{FeedConnection, FeedConnector};
