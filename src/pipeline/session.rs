//! Session state and the frame-handling state machine.
//!
//! ```text
//! Uninitialized --open--> Connected --frame--> Connected
//!       ^                     |
//!       +----reconfigure------+
//!                             +--close--> Terminated
//! ```
//!
//! Frames are processed synchronously in arrival order. No frame can fail
//! the session: every error is counted and dropped.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::config::{DisplayMode, ViewerConfig};
use crate::error::FeedError;
use crate::feed::decode_frame;

use super::dedup::Deduplicator;
use super::router::{ActiveRenderer, ViewRouter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Uninitialized,
    Connected,
    Terminated,
}

/// What happened to one frame.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// Decoded, admitted and handed to the renderer.
    Rendered,
    /// Its uuid was already rendered in this session.
    Duplicate,
    /// Its type does not match the display mode.
    Filtered,
    /// The frame could not be decoded.
    Dropped(FeedError),
    /// The session was not connected.
    Ignored,
}

/// Per-session frame counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub rendered: u64,
    pub duplicates: u64,
    pub filtered: u64,
    pub dropped: u64,
}

/// One display session: configuration plus all transient pipeline state.
#[derive(Debug, Clone)]
pub struct Session {
    config: ViewerConfig,
    phase: SessionPhase,
    router: ViewRouter,
    dedup: Deduplicator,
    stats: SessionStats,
}

impl Session {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            router: ViewRouter::new(&config),
            config,
            phase: SessionPhase::Uninitialized,
            dedup: Deduplicator::new(),
            stats: SessionStats::default(),
        }
    }

    /// Mark the pipeline wired to a socket. Only valid from `Uninitialized`.
    pub fn open(&mut self) -> bool {
        if self.phase != SessionPhase::Uninitialized {
            return false;
        }
        self.phase = SessionPhase::Connected;
        info!(
            "Session opened: mode={} endpoint={}",
            self.config.mode, self.config.endpoint
        );
        true
    }

    /// Decode, route, deduplicate and render one raw frame.
    pub fn handle_frame(&mut self, text: &str, now: DateTime<Utc>) -> FrameOutcome {
        if self.phase != SessionPhase::Connected {
            return FrameOutcome::Ignored;
        }

        let record = match decode_frame(text) {
            Ok(record) => record,
            Err(e) => {
                debug!("Dropping frame [{}]: {}", e.error_code(), e);
                self.stats.dropped += 1;
                return FrameOutcome::Dropped(e);
            }
        };

        if !self.router.accepts(&record) {
            self.stats.filtered += 1;
            return FrameOutcome::Filtered;
        }

        if !self.dedup.admit_record(record.uuid.as_deref()) {
            debug!("Suppressing duplicate record {:?}", record.uuid);
            self.stats.duplicates += 1;
            return FrameOutcome::Duplicate;
        }

        self.router.dispatch(&record, now);
        self.stats.rendered += 1;
        FrameOutcome::Rendered
    }

    /// Discard all state and return to `Uninitialized` with new settings.
    ///
    /// Has no effect on a terminated session.
    pub fn reconfigure(&mut self, config: ViewerConfig) -> bool {
        if self.phase == SessionPhase::Terminated {
            return false;
        }
        info!(
            "Rebuilding session: mode={} endpoint={}",
            config.mode, config.endpoint
        );
        *self = Session::new(config);
        true
    }

    /// Terminate the session and drop its state.
    pub fn close(&mut self) {
        if self.phase == SessionPhase::Terminated {
            return;
        }
        self.router = ViewRouter::new(&self.config);
        self.dedup = Deduplicator::new();
        self.phase = SessionPhase::Terminated;
        info!("Session terminated");
    }

    pub fn tick(&mut self, now: DateTime<Utc>) {
        if self.phase == SessionPhase::Connected {
            self.router.tick(now);
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn mode(&self) -> DisplayMode {
        self.router.mode()
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn renderer(&self) -> &ActiveRenderer {
        self.router.renderer()
    }

    /// Number of distinct identifiers admitted so far.
    pub fn seen_count(&self) -> usize {
        self.dedup.len()
    }
}
