//! Templated event cards for the user and access feeds.
//!
//! Each card is a structured view-model filled from one record. Absent
//! fields render as empty strings; nothing is validated.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use crate::feed::LogRecord;

use super::level::classify_level;
use super::relative_time::from_now;

/// A single labelled row inside a card body.
#[derive(Debug, Clone, PartialEq)]
pub struct CardLine {
    pub label: Option<&'static str>,
    pub value: String,
}

impl CardLine {
    fn labelled(label: &'static str, value: String) -> Self {
        Self {
            label: Some(label),
            value,
        }
    }

    fn plain(value: String) -> Self {
        Self { label: None, value }
    }
}

/// View-model for one rendered record.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedCard {
    pub uuid: String,
    /// Display classification: `danger` for severe levels, otherwise the level.
    pub classification: String,
    pub header: String,
    /// Event time relative to the moment the card was rendered.
    pub when: String,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub body: Vec<CardLine>,
    pub footer: Option<String>,
}

impl RenderedCard {
    /// Number of text rows the card occupies, excluding borders.
    pub fn content_height(&self) -> usize {
        self.title.iter().count()
            + self.subtitle.iter().count()
            + self.body.len()
            + self.footer.iter().count()
    }
}

/// An absent timestamp counts as "now"; one that does not parse renders empty.
fn relative_when(record: &LogRecord, now: DateTime<Utc>) -> String {
    match record.fields.get("timestamp") {
        None => from_now(now, now),
        Some(_) => record
            .timestamp()
            .map(|at| from_now(at, now))
            .unwrap_or_default(),
    }
}

/// Fill the user-event card template.
pub fn render_user_card(record: &LogRecord, now: DateTime<Utc>) -> RenderedCard {
    let level = classify_level(&record.level());
    let logger = record.field_text("logger");

    RenderedCard {
        uuid: record.field_text("uuid"),
        header: format!("[{}] {}", level, logger),
        when: relative_when(record, now),
        title: Some(record.field_text("username")),
        subtitle: Some(format!(
            "{} - {}",
            record.field_text("job_title"),
            record.field_text("email")
        )),
        body: vec![
            CardLine::labelled("Avatar", record.field_text("avatar")),
            CardLine::labelled("UUID", record.field_text("uuid")),
            CardLine::labelled("Logger", logger),
            CardLine::labelled("Level", level.clone()),
            CardLine::labelled("Event", record.field_text("event")),
            CardLine::labelled("IP", record.field_text("ip")),
            CardLine::labelled("URL", record.field_text("url")),
        ],
        footer: None,
        classification: level,
    }
}

/// Fill the access-event card template.
pub fn render_access_card(record: &LogRecord, now: DateTime<Utc>) -> RenderedCard {
    RenderedCard {
        uuid: record.field_text("uuid"),
        classification: classify_level(&record.level()),
        header: record.field_text("event"),
        when: relative_when(record, now),
        title: None,
        subtitle: None,
        body: vec![CardLine::plain(format!(
            "{} - {}{}",
            record.field_text("status"),
            record.field_text("url"),
            record.field_text("path")
        ))],
        footer: Some(format!(
            "{} | {} | {} | {}",
            record.field_text("ip"),
            record.field_text("uuid"),
            record.field_text("logger"),
            record.field_text("timestamp")
        )),
    }
}

/// Newest-first list of rendered cards, unbounded for the session.
#[derive(Debug, Clone, Default)]
pub struct CardFeed {
    cards: VecDeque<RenderedCard>,
}

impl CardFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prepend(&mut self, card: RenderedCard) {
        self.cards.push_front(card);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &RenderedCard> {
        self.cards.iter()
    }

    pub fn newest(&self) -> Option<&RenderedCard> {
        self.cards.front()
    }
}
