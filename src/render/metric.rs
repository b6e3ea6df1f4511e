//! Rolling CPU utilisation series.
//!
//! Each tracked server has its own [`TimeSeries`] holding points stamped with
//! their arrival time. A series keeps only the points inside its visible
//! window; older points are evicted as new ones arrive, so memory stays
//! bounded no matter how long the session runs.

use std::collections::VecDeque;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::debug;

use crate::feed::{value_text, LogRecord};

/// Servers charted when the configuration names none.
pub const DEFAULT_SERVERS: [&str; 3] = ["Camano", "Rosario", "Monaco"];

/// Visible chart window: 600 columns at 20 ms each.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(12);

/// One server's utilisation samples, oldest first.
#[derive(Debug, Clone)]
pub struct TimeSeries {
    name: String,
    window_ms: i64,
    points: VecDeque<(DateTime<Utc>, f64)>,
    latest: Option<String>,
}

impl TimeSeries {
    pub fn new(name: impl Into<String>, window: Duration) -> Self {
        Self {
            name: name.into(),
            window_ms: window.as_millis().min(i64::MAX as u128) as i64,
            points: VecDeque::new(),
            latest: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a sample and evict everything older than the window.
    pub fn append(&mut self, at: DateTime<Utc>, value: f64) {
        self.points.push_back((at, value));
        self.prune(at);
    }

    /// Start of the window ending at `now`, or `None` when the window
    /// reaches past the earliest representable time.
    fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        chrono::Duration::try_milliseconds(self.window_ms)
            .and_then(|window| now.checked_sub_signed(window))
    }

    /// Drop points that fell out of the window ending at `now`.
    pub fn prune(&mut self, now: DateTime<Utc>) {
        let Some(cutoff) = self.cutoff(now) else {
            return;
        };
        while let Some((at, _)) = self.points.front() {
            if *at < cutoff {
                self.points.pop_front();
            } else {
                break;
            }
        }
    }

    /// Latest value exactly as the producer sent it.
    pub fn latest_text(&self) -> Option<&str> {
        self.latest.as_deref()
    }

    fn set_latest(&mut self, text: String) {
        self.latest = Some(text);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Retained points, oldest first.
    pub fn points(&self) -> impl Iterator<Item = &(DateTime<Utc>, f64)> {
        self.points.iter()
    }

    /// Chart coordinates: x is seconds relative to `now` (zero or negative),
    /// y is the raw value.
    pub fn chart_points(&self, now: DateTime<Utc>) -> Vec<(f64, f64)> {
        let cutoff = self.cutoff(now);
        self.points
            .iter()
            .filter(|(at, _)| cutoff.map_or(true, |cutoff| *at >= cutoff))
            .map(|(at, value)| {
                let offset_ms = at.signed_duration_since(now).num_milliseconds();
                (offset_ms as f64 / 1_000.0, *value)
            })
            .collect()
    }
}

/// Renderer for `cpu` records.
#[derive(Debug, Clone)]
pub struct MetricRenderer {
    window: Duration,
    series: Vec<TimeSeries>,
}

impl MetricRenderer {
    pub fn new<I, S>(servers: I, window: Duration) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let series = servers
            .into_iter()
            .map(|name| TimeSeries::new(name, window))
            .collect();
        Self { window, series }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn series(&self) -> &[TimeSeries] {
        &self.series
    }

    pub fn series_for(&self, name: &str) -> Option<&TimeSeries> {
        self.series.iter().find(|s| s.name == name)
    }

    /// Record one admitted `cpu` record, stamping points with `arrival`.
    ///
    /// Only tracked servers present in the record are touched. Values are
    /// charted unmodified; a non-numeric value updates the readout but adds
    /// no point. Returns the number of points appended.
    pub fn record(&mut self, record: &LogRecord, arrival: DateTime<Utc>) -> usize {
        let mut appended = 0;
        for (name, value) in record.servers() {
            let Some(series) = self.series.iter_mut().find(|s| s.name == name) else {
                debug!("Ignoring utilisation for untracked server {}", name);
                continue;
            };
            series.set_latest(value_text(value));
            if let Some(number) = numeric(value) {
                series.append(arrival, number);
                appended += 1;
            }
        }
        appended
    }

    /// Evict points that scrolled out of view.
    pub fn prune(&mut self, now: DateTime<Utc>) {
        for series in &mut self.series {
            series.prune(now);
        }
    }
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
