//! UI rendering for the log viewer.
//!
//! One title row, the active renderer's panel, and a status bar.

mod cards;
mod metrics;
mod status_bar;
mod theme;

pub use cards::{card_lines, truncate_to_width};
pub use metrics::readout;
pub use status_bar::status_line;
pub use theme::{level_color, series_color};

use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::pipeline::ActiveRenderer;

use cards::render_cards;
use metrics::render_metrics;
use status_bar::render_status_bar;
use theme::{COLOR_DIM, COLOR_HEADER};

/// Render the UI at the current time.
pub fn render(frame: &mut Frame, app: &App) {
    render_at(frame, app, Utc::now());
}

/// Render the UI as of `now`; the metric chart scrolls relative to it.
pub fn render_at(frame: &mut Frame, app: &App, now: DateTime<Utc>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let title = Line::from(vec![
        Span::styled(
            "Structlog View",
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  [{}]", app.session.mode()), Style::default().fg(COLOR_DIM)),
    ]);
    frame.render_widget(Paragraph::new(title), chunks[0]);

    match app.session.renderer() {
        ActiveRenderer::Metric(metrics) => render_metrics(frame, chunks[1], metrics, now),
        ActiveRenderer::UserCards(cards) | ActiveRenderer::AccessCards(cards) => {
            render_cards(frame, chunks[1], cards, app.scroll)
        }
    }

    render_status_bar(frame, chunks[2], app);
}
