use chrono::{DateTime, Utc};

use crate::config::{DisplayMode, ViewerConfig};
use crate::feed::LogRecord;
use crate::render::{render_access_card, render_user_card, CardFeed, MetricRenderer};

/// The one renderer a session draws with.
#[derive(Debug, Clone)]
pub enum ActiveRenderer {
    Metric(MetricRenderer),
    UserCards(CardFeed),
    AccessCards(CardFeed),
}

impl ActiveRenderer {
    fn for_config(config: &ViewerConfig) -> Self {
        match config.mode {
            DisplayMode::Cpu => ActiveRenderer::Metric(MetricRenderer::new(
                config.cpu_servers.iter().cloned(),
                config.metric_window,
            )),
            DisplayMode::Access => ActiveRenderer::AccessCards(CardFeed::new()),
            DisplayMode::User => ActiveRenderer::UserCards(CardFeed::new()),
        }
    }

    pub fn cards(&self) -> Option<&CardFeed> {
        match self {
            ActiveRenderer::UserCards(feed) | ActiveRenderer::AccessCards(feed) => Some(feed),
            ActiveRenderer::Metric(_) => None,
        }
    }

    pub fn metrics(&self) -> Option<&MetricRenderer> {
        match self {
            ActiveRenderer::Metric(metrics) => Some(metrics),
            _ => None,
        }
    }
}

/// Routes admitted records to the renderer selected by the display mode.
///
/// The mode is fixed for the router's lifetime; a mode change builds a new
/// router.
#[derive(Debug, Clone)]
pub struct ViewRouter {
    mode: DisplayMode,
    renderer: ActiveRenderer,
}

impl ViewRouter {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            mode: config.mode,
            renderer: ActiveRenderer::for_config(config),
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Whether the record's type matches the active mode.
    pub fn accepts(&self, record: &LogRecord) -> bool {
        record.kind == self.mode.record_type()
    }

    /// Hand an accepted record to the active renderer.
    pub fn dispatch(&mut self, record: &LogRecord, now: DateTime<Utc>) {
        match &mut self.renderer {
            ActiveRenderer::Metric(metrics) => {
                metrics.record(record, now);
            }
            ActiveRenderer::UserCards(feed) => feed.prepend(render_user_card(record, now)),
            ActiveRenderer::AccessCards(feed) => feed.prepend(render_access_card(record, now)),
        }
    }

    /// Advance time-based state (scrolls the metric window).
    pub fn tick(&mut self, now: DateTime<Utc>) {
        if let ActiveRenderer::Metric(metrics) = &mut self.renderer {
            metrics.prune(now);
        }
    }

    pub fn renderer(&self) -> &ActiveRenderer {
        &self.renderer
    }
}
