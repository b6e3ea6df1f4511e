use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, warn};

use crate::error::FeedError;

/// Feed connection state
#[derive(Debug, Clone, PartialEq)]
pub enum FeedConnectionState {
    Connecting,
    Connected,
    /// The socket is gone. `reason` is set when it closed because of an error.
    Disconnected { reason: Option<String> },
}

impl FeedConnectionState {
    pub fn label(&self) -> String {
        match self {
            FeedConnectionState::Connecting => "connecting".to_string(),
            FeedConnectionState::Connected => "connected".to_string(),
            FeedConnectionState::Disconnected { reason: None } => "disconnected".to_string(),
            FeedConnectionState::Disconnected {
                reason: Some(reason),
            } => format!("disconnected ({})", reason),
        }
    }
}

/// Configuration for the feed client
#[derive(Debug, Clone)]
pub struct FeedClientConfig {
    /// Full WebSocket URL, e.g. `ws://127.0.0.1:8765`
    pub url: String,
    /// Capacity of the frame channel between the socket task and the consumer
    pub channel_capacity: usize,
}

impl FeedClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

impl Default for FeedClientConfig {
    fn default() -> Self {
        Self {
            url: "ws://127.0.0.1:8765".to_string(),
            channel_capacity: 256,
        }
    }
}

/// WebSocket client that delivers raw text frames in arrival order.
pub struct FeedClient {
    frame_rx: mpsc::Receiver<String>,
    state_rx: watch::Receiver<FeedConnectionState>,
    shutdown_tx: watch::Sender<bool>,
}

impl FeedClient {
    /// Connect to the feed.
    ///
    /// Returns a `FeedError::Connection` if the initial handshake fails. On
    /// success a background task reads the socket until it closes or the
    /// client is shut down.
    pub async fn connect(config: FeedClientConfig) -> Result<Self, FeedError> {
        let (ws_stream, _response) = connect_async(config.url.as_str()).await?;
        info!("Connected to log feed at {}", config.url);

        let (frame_tx, frame_rx) = mpsc::channel::<String>(config.channel_capacity.max(1));
        let (state_tx, state_rx) = watch::channel(FeedConnectionState::Connected);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        tokio::spawn(run_reader_loop(ws_stream, frame_tx, state_tx, shutdown_rx));

        Ok(Self {
            frame_rx,
            state_rx,
            shutdown_tx,
        })
    }

    /// Receive the next frame. Returns `None` once the socket task has ended.
    pub async fn recv(&mut self) -> Option<String> {
        self.frame_rx.recv().await
    }

    pub fn connection_state(&self) -> FeedConnectionState {
        self.state_rx.borrow().clone()
    }

    pub fn state_receiver(&self) -> watch::Receiver<FeedConnectionState> {
        self.state_rx.clone()
    }

    /// Close the socket. Safe to call more than once.
    pub fn shutdown(&self) {
        if !*self.shutdown_tx.borrow() {
            debug!("Shutting down feed client");
            let _ = self.shutdown_tx.send(true);
        }
    }
}

impl Drop for FeedClient {
    fn drop(&mut self) {
        self.shutdown();
    }
}

type FeedStream =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

async fn run_reader_loop(
    ws_stream: FeedStream,
    frame_tx: mpsc::Sender<String>,
    state_tx: watch::Sender<FeedConnectionState>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let (mut ws_sink, mut ws_stream) = ws_stream.split();
    let mut reason = None;

    loop {
        tokio::select! {
            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    debug!("Shutdown signal received, closing feed socket");
                    let _ = ws_sink.close().await;
                    break;
                }
            }
            msg = ws_stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        if frame_tx.send(text).await.is_err() {
                            debug!("Frame consumer dropped, closing feed socket");
                            let _ = ws_sink.close().await;
                            break;
                        }
                    }
                    Some(Ok(Message::Binary(bytes))) => {
                        // Invalid UTF-8 still reaches the decoder, which drops and counts it
                        let text = match String::from_utf8(bytes) {
                            Ok(text) => text,
                            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
                        };
                        if frame_tx.send(text).await.is_err() {
                            let _ = ws_sink.close().await;
                            break;
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let _ = ws_sink.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(frame))) => {
                        info!("Feed closed by server: {:?}", frame);
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!("Feed socket error: {}", e);
                        reason = Some(e.to_string());
                        break;
                    }
                    None => {
                        info!("Feed stream ended");
                        break;
                    }
                }
            }
        }
    }

    let _ = state_tx.send(FeedConnectionState::Disconnected { reason });
}
