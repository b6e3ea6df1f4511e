//! Application state and session lifecycle.
//!
//! `App` owns the current [`Session`] and the feed task wired to it. Every
//! configuration change, mode switch, or reveal tears the pipeline down and
//! builds a fresh one; frames from the previous connection are discarded by
//! generation.

mod feed;
mod handlers;
mod messages;

pub use feed::spawn_feed_task;
pub use messages::AppMessage;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::config::{ConfigSource, DisplayMode, ViewerConfig};
use crate::feed::FeedConnectionState;
use crate::pipeline::{FrameOutcome, Session, SessionPhase};
use crate::traits::FeedConnector;

/// Main application state
pub struct App {
    /// Where configuration is loaded from on reload
    pub source: ConfigSource,
    /// The active display session
    pub session: Session,
    /// Connection state of the current session's feed
    pub connection: FeedConnectionState,
    /// Incremented on every rebuild
    pub generation: u64,
    /// Number of cards scrolled past at the top of the list
    pub scroll: usize,
    /// Last configuration reload failure, shown in the status bar
    pub config_error: Option<String>,
    pub should_quit: bool,
    /// Set when state changed and the screen must be redrawn
    pub needs_redraw: bool,
    /// Sender for the application channel
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    /// Receiver, taken by the event loop
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    connector: Arc<dyn FeedConnector>,
    feed_task: Option<JoinHandle<()>>,
}

impl App {
    pub fn new(source: ConfigSource, config: ViewerConfig, connector: Arc<dyn FeedConnector>) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        Self {
            source,
            session: Session::new(config),
            connection: FeedConnectionState::Connecting,
            generation: 0,
            scroll: 0,
            config_error: None,
            should_quit: false,
            needs_redraw: true,
            message_tx,
            message_rx: Some(message_rx),
            connector,
            feed_task: None,
        }
    }

    /// Open the current session and connect its feed.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(&mut self) {
        if !self.session.open() {
            return;
        }
        self.connection = FeedConnectionState::Connecting;
        self.feed_task = Some(spawn_feed_task(
            self.connector.clone(),
            self.session.endpoint().to_string(),
            self.generation,
            self.message_tx.clone(),
        ));
        self.mark_dirty();
    }

    /// Tear down the pipeline and start again with `config`.
    pub fn rebuild(&mut self, config: ViewerConfig) {
        if self.session.phase() == SessionPhase::Terminated {
            return;
        }
        self.stop_feed();
        self.generation += 1;
        self.scroll = 0;
        self.session.reconfigure(config);
        self.start();
    }

    /// Re-reveal the panel: a full rebuild against the current settings.
    pub fn reveal(&mut self) {
        info!("Panel revealed, rebuilding session");
        let config = self.session.config().clone();
        self.rebuild(config);
    }

    /// Switch to the next display mode.
    ///
    /// The choice is kept as an override so later reloads of the config
    /// file do not revert it.
    pub fn cycle_mode(&mut self) {
        let mode = self.session.mode().next();
        self.set_mode(mode);
    }

    pub fn set_mode(&mut self, mode: DisplayMode) {
        self.source.overrides.mode = Some(mode.as_setting().to_string());
        let config = ViewerConfig {
            mode,
            ..self.session.config().clone()
        };
        self.rebuild(config);
    }

    /// Reload configuration and rebuild when the effective settings changed.
    pub fn reload_config(&mut self) {
        match self.source.load() {
            Ok(config) => {
                self.config_error = None;
                if &config != self.session.config() {
                    info!("Configuration changed, rebuilding session");
                    self.rebuild(config);
                }
            }
            Err(e) => {
                warn!("Ignoring invalid configuration: {}", e);
                self.config_error = Some(e.to_string());
            }
        }
        self.mark_dirty();
    }

    /// Apply one message from the event loop.
    pub fn handle_message(&mut self, msg: AppMessage, now: DateTime<Utc>) {
        match msg {
            AppMessage::Frame { generation, text } => {
                if generation != self.generation {
                    return;
                }
                if self.session.handle_frame(&text, now) == FrameOutcome::Rendered
                    && self.scroll > 0
                {
                    // Keep the viewport on the same cards while new ones arrive on top
                    self.scroll += 1;
                }
                self.mark_dirty();
            }
            AppMessage::FeedState { generation, state } => {
                if generation != self.generation {
                    return;
                }
                if let FeedConnectionState::Disconnected { reason: Some(reason) } = &state {
                    warn!("Feed disconnected: {}", reason);
                }
                self.connection = state;
                self.mark_dirty();
            }
            AppMessage::ConfigChanged => self.reload_config(),
        }
    }

    /// Periodic update: scrolls the metric window.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        self.session.tick(now);
        if self.session.mode() == DisplayMode::Cpu {
            self.mark_dirty();
        }
    }

    /// Close the panel: terminate the session and drop the socket.
    pub fn quit(&mut self) {
        self.stop_feed();
        self.session.close();
        self.should_quit = true;
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn card_count(&self) -> usize {
        self.session
            .renderer()
            .cards()
            .map(|cards| cards.len())
            .unwrap_or(0)
    }

    pub fn scroll_down(&mut self) {
        if self.scroll + 1 < self.card_count() {
            self.scroll += 1;
            self.mark_dirty();
        }
    }

    pub fn scroll_up(&mut self) {
        if self.scroll > 0 {
            self.scroll -= 1;
            self.mark_dirty();
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
        self.mark_dirty();
    }

    fn stop_feed(&mut self) {
        if let Some(task) = self.feed_task.take() {
            task.abort();
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.stop_feed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockConnector;
    use crate::config::ConfigOverrides;
    use std::path::PathBuf;

    fn test_app(connector: MockConnector) -> App {
        let source = ConfigSource::new(
            PathBuf::from("/nonexistent/structlog/config.json"),
            ConfigOverrides::default(),
        );
        App::new(source, ViewerConfig::default(), Arc::new(connector))
    }

    fn frame(generation: u64, text: &str) -> AppMessage {
        AppMessage::Frame {
            generation,
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_start_opens_session_and_connects() {
        let connector = MockConnector::new();
        connector.queue_feed();
        let mut app = test_app(connector.clone());
        app.start();

        assert_eq!(app.session.phase(), SessionPhase::Connected);
        tokio::task::yield_now().await;
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert_eq!(connector.endpoints(), vec!["ws://127.0.0.1:8765"]);
    }

    #[tokio::test]
    async fn test_stale_generation_frames_ignored() {
        let mut app = test_app(MockConnector::new());
        app.start();
        app.cycle_mode();
        assert_eq!(app.generation, 1);
        assert_eq!(app.session.mode(), DisplayMode::Access);

        app.handle_message(frame(0, r#"{"type":"access","uuid":"old"}"#), Utc::now());
        assert_eq!(app.card_count(), 0);

        app.handle_message(frame(1, r#"{"type":"access","uuid":"new"}"#), Utc::now());
        assert_eq!(app.card_count(), 1);
    }

    #[tokio::test]
    async fn test_reveal_resets_seen_set() {
        let mut app = test_app(MockConnector::new());
        app.start();
        let record = r#"{"type":"user","uuid":"a1"}"#;

        app.handle_message(frame(0, record), Utc::now());
        app.handle_message(frame(0, record), Utc::now());
        assert_eq!(app.card_count(), 1);

        app.reveal();
        app.handle_message(frame(app.generation, record), Utc::now());
        assert_eq!(app.card_count(), 1);
        assert_eq!(app.session.stats().rendered, 1);
    }

    #[tokio::test]
    async fn test_mode_override_survives_reload() {
        let mut app = test_app(MockConnector::new());
        app.start();
        app.set_mode(DisplayMode::Cpu);
        let generation = app.generation;

        // Config file is absent, so reload yields defaults plus the override
        app.reload_config();
        assert_eq!(app.session.mode(), DisplayMode::Cpu);
        assert_eq!(app.generation, generation);
    }

    #[tokio::test]
    async fn test_feed_state_updates_connection() {
        let mut app = test_app(MockConnector::new());
        app.start();
        app.handle_message(
            AppMessage::FeedState {
                generation: 0,
                state: FeedConnectionState::Connected,
            },
            Utc::now(),
        );
        assert_eq!(app.connection, FeedConnectionState::Connected);

        app.handle_message(
            AppMessage::FeedState {
                generation: 5,
                state: FeedConnectionState::Disconnected { reason: None },
            },
            Utc::now(),
        );
        assert_eq!(app.connection, FeedConnectionState::Connected);
    }

    #[tokio::test]
    async fn test_quit_terminates_session() {
        let connector = MockConnector::new();
        let handle = connector.queue_feed();
        let mut app = test_app(connector);
        app.start();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        app.quit();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert!(app.should_quit);
        assert_eq!(app.session.phase(), SessionPhase::Terminated);
        assert!(handle.was_shut_down());

        app.reveal();
        assert_eq!(app.session.phase(), SessionPhase::Terminated);
    }

    #[tokio::test]
    async fn test_scroll_tracks_new_cards() {
        let mut app = test_app(MockConnector::new());
        app.start();
        for uuid in ["a", "b", "c"] {
            app.handle_message(
                frame(0, &format!(r#"{{"type":"user","uuid":"{}"}}"#, uuid)),
                Utc::now(),
            );
        }
        app.scroll_down();
        assert_eq!(app.scroll, 1);

        app.handle_message(frame(0, r#"{"type":"user","uuid":"d"}"#), Utc::now());
        assert_eq!(app.scroll, 2);

        app.scroll_to_top();
        assert_eq!(app.scroll, 0);
        app.scroll_up();
        assert_eq!(app.scroll, 0);
    }
}
