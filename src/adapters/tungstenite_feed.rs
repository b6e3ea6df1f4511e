//! Tungstenite-based feed adapter.
//!
//! Implements [`FeedConnection`] for [`FeedClient`] and provides the
//! production [`FeedConnector`].

use async_trait::async_trait;
use tokio::sync::watch;

use crate::error::FeedError;
use crate::feed::{FeedClient, FeedClientConfig, FeedConnectionState};
use crate::traits::{FeedConnection, FeedConnector};

#[async_trait]
impl FeedConnection for FeedClient {
    async fn recv(&mut self) -> Option<String> {
        FeedClient::recv(self).await
    }

    fn state(&self) -> watch::Receiver<FeedConnectionState> {
        self.state_receiver()
    }

    fn shutdown(&self) {
        FeedClient::shutdown(self);
    }
}

/// Connector that opens real WebSocket connections.
#[derive(Debug, Clone, Copy, Default)]
pub struct TungsteniteConnector;

#[async_trait]
impl FeedConnector for TungsteniteConnector {
    async fn connect(&self, endpoint: &str) -> Result<Box<dyn FeedConnection>, FeedError> {
        let client = FeedClient::connect(FeedClientConfig::new(endpoint)).await?;
        Ok(Box::new(client))
    }
}
