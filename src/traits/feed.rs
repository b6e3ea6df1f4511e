//! Feed connection trait abstraction.
//!
//! Provides a trait-based seam between the session event loop and the
//! transport that delivers frames, so the loop can be driven by a mock in
//! tests.

use async_trait::async_trait;
use tokio::sync::watch;

use crate::error::FeedError;
use crate::feed::FeedConnectionState;

/// A connected source of raw text frames.
///
/// Frames are yielded strictly in arrival order. Implementations own their
/// socket and close it on [`FeedConnection::shutdown`] or drop.
#[async_trait]
pub trait FeedConnection: Send {
    /// Receive the next raw frame.
    ///
    /// Returns `None` once the connection has ended and no more frames
    /// will arrive.
    async fn recv(&mut self) -> Option<String>;

    /// Get a receiver for connection state changes.
    fn state(&self) -> watch::Receiver<FeedConnectionState>;

    /// Close the connection.
    fn shutdown(&self);
}

/// Opens feed connections for an endpoint URL.
///
/// The application holds one connector for its lifetime and asks it for a
/// new connection on every session rebuild.
#[async_trait]
pub trait FeedConnector: Send + Sync {
    async fn connect(&self, endpoint: &str) -> Result<Box<dyn FeedConnection>, FeedError>;
}
