//! Bottom status bar: mode, endpoint, connection and counters.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::feed::FeedConnectionState;

use super::theme::{COLOR_ACTIVE, COLOR_DIM, COLOR_ERROR, COLOR_PENDING};

fn connection_color(state: &FeedConnectionState) -> ratatui::style::Color {
    match state {
        FeedConnectionState::Connected => COLOR_ACTIVE,
        FeedConnectionState::Connecting => COLOR_PENDING,
        FeedConnectionState::Disconnected { .. } => COLOR_ERROR,
    }
}

pub fn status_line(app: &App) -> Line<'static> {
    let stats = app.session.stats();
    let dim = Style::default().fg(COLOR_DIM);

    let mut spans = vec![
        Span::styled(
            app.connection.label(),
            Style::default().fg(connection_color(&app.connection)),
        ),
        Span::styled(" | ", dim),
        Span::raw(app.session.endpoint().to_string()),
        Span::styled(" | ", dim),
        Span::raw(format!(
            "{} rendered, {} duplicate, {} filtered, {} dropped",
            stats.rendered, stats.duplicates, stats.filtered, stats.dropped
        )),
    ];

    if let Some(error) = &app.config_error {
        spans.push(Span::styled(" | ", dim));
        spans.push(Span::styled(
            format!("config: {}", error),
            Style::default().fg(COLOR_ERROR),
        ));
    }

    spans.push(Span::styled(" | q quit  m mode  r reload", dim));
    Line::from(spans)
}

pub fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    frame.render_widget(Paragraph::new(status_line(app)), area);
}
