//! Scrolling utilisation chart for the cpu feed.

use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::render::MetricRenderer;

use super::theme::{series_color, COLOR_BORDER, COLOR_DIM, COLOR_HEADER};

/// Readout text for one series, e.g. `Camano: 42%`.
pub fn readout(name: &str, latest: Option<&str>) -> String {
    match latest {
        Some(value) => format!("{}: {}%", name, value),
        None => format!("{}: --", name),
    }
}

/// Y range that always covers 0-100 and stretches to fit outliers.
fn y_bounds(points: &[Vec<(f64, f64)>]) -> [f64; 2] {
    points
        .iter()
        .flatten()
        .fold([0.0, 100.0], |[lo, hi], (_, v)| [lo.min(*v), hi.max(*v)])
}

pub fn render_metrics(frame: &mut Frame, area: Rect, metrics: &MetricRenderer, now: DateTime<Utc>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    let mut readouts = Vec::new();
    for (i, series) in metrics.series().iter().enumerate() {
        if i > 0 {
            readouts.push(Span::raw("   "));
        }
        readouts.push(Span::styled(
            readout(series.name(), series.latest_text()),
            Style::default()
                .fg(series_color(i))
                .add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(readouts)), chunks[0]);

    let points: Vec<Vec<(f64, f64)>> = metrics
        .series()
        .iter()
        .map(|series| series.chart_points(now))
        .collect();

    let datasets = metrics
        .series()
        .iter()
        .zip(&points)
        .enumerate()
        .map(|(i, (series, data))| {
            Dataset::default()
                .name(series.name().to_string())
                .marker(symbols::Marker::Braille)
                .style(Style::default().fg(series_color(i)))
                .graph_type(GraphType::Line)
                .data(data)
        })
        .collect::<Vec<_>>();

    let window = metrics.window().as_secs_f64();
    let [lo, hi] = y_bounds(&points);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(Span::styled(
            " CPU Utilisation ",
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        ));

    let x_labels = vec![
        Span::styled(format!("-{}s", window as u64), Style::default().fg(COLOR_DIM)),
        Span::styled("now", Style::default().fg(COLOR_DIM)),
    ];
    let y_labels = vec![
        Span::styled(format!("{}%", lo as i64), Style::default().fg(COLOR_DIM)),
        Span::styled(format!("{}%", hi as i64), Style::default().fg(COLOR_DIM)),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(Axis::default().bounds([-window, 0.0]).labels(x_labels))
        .y_axis(Axis::default().bounds([lo, hi]).labels(y_labels));

    frame.render_widget(chart, chunks[1]);
}
