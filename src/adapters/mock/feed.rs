//! Mock feed connection for testing.
//!
//! Provides a feed that allows frame injection and state control without
//! opening a socket.
//!
//! # Example
//!
//! ```ignore
//! use structlog_view::adapters::mock::MockFeed;
//! use structlog_view::traits::FeedConnection;
//!
//! let (mut feed, handle) = MockFeed::new();
//! handle.push_frame(r#"{"type":"user","uuid":"a1"}"#);
//! assert_eq!(feed.recv().await.as_deref(), Some(r#"{"type":"user","uuid":"a1"}"#));
//! ```

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{mpsc, watch};

use crate::error::FeedError;
use crate::feed::FeedConnectionState;
use crate::traits::{FeedConnection, FeedConnector};

/// Mock feed connection.
pub struct MockFeed {
    frame_rx: mpsc::UnboundedReceiver<String>,
    state_rx: watch::Receiver<FeedConnectionState>,
    shut_down: Arc<AtomicBool>,
}

/// Test-side handle for a [`MockFeed`].
#[derive(Clone)]
pub struct MockFeedHandle {
    frame_tx: mpsc::UnboundedSender<String>,
    state_tx: Arc<watch::Sender<FeedConnectionState>>,
    shut_down: Arc<AtomicBool>,
}

impl MockFeed {
    /// Create a connected mock feed and its control handle.
    pub fn new() -> (Self, MockFeedHandle) {
        let (frame_tx, frame_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(FeedConnectionState::Connected);
        let shut_down = Arc::new(AtomicBool::new(false));

        let feed = Self {
            frame_rx,
            state_rx,
            shut_down: shut_down.clone(),
        };
        let handle = MockFeedHandle {
            frame_tx,
            state_tx: Arc::new(state_tx),
            shut_down,
        };
        (feed, handle)
    }
}

impl MockFeedHandle {
    /// Inject a raw frame. Frames are delivered in injection order.
    pub fn push_frame(&self, frame: impl Into<String>) {
        // Ignore send errors (feed already dropped)
        let _ = self.frame_tx.send(frame.into());
    }

    pub fn push_frames<I, S>(&self, frames: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for frame in frames {
            self.push_frame(frame);
        }
    }

    pub fn set_state(&self, state: FeedConnectionState) {
        let _ = self.state_tx.send(state);
    }

    /// Whether the consumer called [`FeedConnection::shutdown`] or dropped the feed.
    pub fn was_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::SeqCst)
    }
}

impl Drop for MockFeed {
    fn drop(&mut self) {
        self.shut_down.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl FeedConnection for MockFeed {
    async fn recv(&mut self) -> Option<String> {
        if self.shut_down.load(Ordering::SeqCst) {
            return None;
        }
        self.frame_rx.recv().await
    }

    fn state(&self) -> watch::Receiver<FeedConnectionState> {
        self.state_rx.clone()
    }

    fn shutdown(&self) {
        self.shut_down.store(true, Ordering::SeqCst);
    }
}

/// Connector that hands out queued mock feeds, one per `connect` call.
///
/// When the queue is empty, `connect` fails with a connection error.
#[derive(Clone, Default)]
pub struct MockConnector {
    queued: Arc<Mutex<VecDeque<MockFeed>>>,
    endpoints: Arc<Mutex<Vec<String>>>,
}

impl MockConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a fresh mock feed and return its control handle.
    pub fn queue_feed(&self) -> MockFeedHandle {
        let (feed, handle) = MockFeed::new();
        if let Ok(mut queued) = self.queued.lock() {
            queued.push_back(feed);
        }
        handle
    }

    /// Endpoints passed to `connect`, in call order.
    pub fn endpoints(&self) -> Vec<String> {
        self.endpoints
            .lock()
            .map(|endpoints| endpoints.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl FeedConnector for MockConnector {
    async fn connect(&self, endpoint: &str) -> Result<Box<dyn FeedConnection>, FeedError> {
        if let Ok(mut endpoints) = self.endpoints.lock() {
            endpoints.push(endpoint.to_string());
        }
        let next = self.queued.lock().ok().and_then(|mut queued| queued.pop_front());
        match next {
            Some(feed) => Ok(Box::new(feed)),
            None => Err(FeedError::connection(format!("no mock feed queued for {}", endpoint))),
        }
    }
}
