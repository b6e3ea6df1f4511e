//! Feed integration for the App.
//!
//! Connects the feed for one session generation and forwards its frames
//! and state changes into the application channel, in arrival order.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::feed::FeedConnectionState;
use crate::traits::FeedConnector;

use super::AppMessage;

/// Spawn a task that connects to `endpoint` and forwards everything it
/// receives, tagged with `generation`.
///
/// The task ends when the connection closes or the app stops listening.
/// Aborting the returned handle drops the connection, which closes the socket.
pub fn spawn_feed_task(
    connector: Arc<dyn FeedConnector>,
    endpoint: String,
    generation: u64,
    message_tx: mpsc::UnboundedSender<AppMessage>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let send_state = |state: FeedConnectionState| {
            message_tx
                .send(AppMessage::FeedState { generation, state })
                .is_ok()
        };

        if !send_state(FeedConnectionState::Connecting) {
            return;
        }
        info!("Connecting to feed {} (generation {})", endpoint, generation);

        let mut connection = match connector.connect(&endpoint).await {
            Ok(connection) => connection,
            Err(e) => {
                warn!("Failed to connect to feed {}: {}", endpoint, e);
                send_state(FeedConnectionState::Disconnected {
                    reason: Some(e.to_string()),
                });
                return;
            }
        };

        let mut state_rx = connection.state();
        let mut state_open = true;
        let initial = state_rx.borrow_and_update().clone();
        if !send_state(initial) {
            connection.shutdown();
            return;
        }

        loop {
            tokio::select! {
                frame = connection.recv() => match frame {
                    Some(text) => {
                        if message_tx.send(AppMessage::Frame { generation, text }).is_err() {
                            debug!("App channel closed, stopping feed task");
                            break;
                        }
                    }
                    None => {
                        info!("Feed {} ended", endpoint);
                        break;
                    }
                },
                changed = state_rx.changed(), if state_open => {
                    if changed.is_err() {
                        state_open = false;
                        continue;
                    }
                    let state = state_rx.borrow_and_update().clone();
                    if !send_state(state) {
                        break;
                    }
                }
            }
        }

        connection.shutdown();
        let final_state = match state_rx.borrow().clone() {
            FeedConnectionState::Disconnected { reason } => {
                FeedConnectionState::Disconnected { reason }
            }
            _ => FeedConnectionState::Disconnected { reason: None },
        };
        send_state(final_state);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockConnector;
    use std::time::Duration;

    async fn next(rx: &mut mpsc::UnboundedReceiver<AppMessage>) -> AppMessage {
        tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("timed out waiting for message")
            .expect("channel closed")
    }

    #[tokio::test]
    async fn test_forwards_frames_in_order() {
        let connector = MockConnector::new();
        let handle = connector.queue_feed();
        handle.push_frames(["a", "b"]);
        drop(handle);

        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_feed_task(Arc::new(connector), "ws://mock".to_string(), 7, tx);

        assert_eq!(
            next(&mut rx).await,
            AppMessage::FeedState {
                generation: 7,
                state: FeedConnectionState::Connecting
            }
        );
        assert_eq!(
            next(&mut rx).await,
            AppMessage::FeedState {
                generation: 7,
                state: FeedConnectionState::Connected
            }
        );
        assert_eq!(
            next(&mut rx).await,
            AppMessage::Frame {
                generation: 7,
                text: "a".to_string()
            }
        );
        assert_eq!(
            next(&mut rx).await,
            AppMessage::Frame {
                generation: 7,
                text: "b".to_string()
            }
        );
        assert_eq!(
            next(&mut rx).await,
            AppMessage::FeedState {
                generation: 7,
                state: FeedConnectionState::Disconnected { reason: None }
            }
        );
    }

    #[tokio::test]
    async fn test_connect_failure_reports_disconnected() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_feed_task(Arc::new(MockConnector::new()), "ws://none".to_string(), 1, tx);

        assert!(matches!(
            next(&mut rx).await,
            AppMessage::FeedState {
                state: FeedConnectionState::Connecting,
                ..
            }
        ));
        match next(&mut rx).await {
            AppMessage::FeedState {
                generation: 1,
                state: FeedConnectionState::Disconnected { reason: Some(reason) },
            } => assert!(reason.contains("ws://none")),
            other => panic!("unexpected message {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_abort_shuts_feed_down() {
        let connector = MockConnector::new();
        let handle = connector.queue_feed();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let task = spawn_feed_task(Arc::new(connector), "ws://mock".to_string(), 2, tx);

        // Connecting, Connected
        next(&mut rx).await;
        next(&mut rx).await;

        task.abort();
        let _ = task.await;
        assert!(handle.was_shut_down());
    }
}
