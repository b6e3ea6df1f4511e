//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use ratatui::buffer::Buffer;
use serde_json::json;

use structlog_view::adapters::MockConnector;
use structlog_view::app::App;
use structlog_view::config::{ConfigOverrides, ConfigSource, DisplayMode, ViewerConfig};

/// Fixed clock for deterministic relative times.
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 5, 1, 12, 0, 0).unwrap()
}

pub fn config_for(mode: DisplayMode) -> ViewerConfig {
    ViewerConfig {
        mode,
        ..ViewerConfig::default()
    }
}

/// App whose config file does not exist and whose feeds come from `connector`.
pub fn test_app(mode: DisplayMode, connector: MockConnector) -> App {
    let source = ConfigSource::new(
        PathBuf::from("/nonexistent/structlog/config.json"),
        ConfigOverrides {
            mode: Some(mode.as_setting().to_string()),
            url: None,
        },
    );
    App::new(source, config_for(mode), Arc::new(connector))
}

pub fn user_frame(uuid: &str, level: &str) -> String {
    json!({
        "type": "user",
        "uuid": uuid,
        "level": level,
        "logger": "api.users",
        "event": "user_created",
        "timestamp": "2020-05-01T11:59:30Z",
        "username": "jdoe",
        "job_title": "Engineer",
        "email": "jdoe@example.com",
        "avatar": "https://example.com/a.png",
        "ip": "10.0.0.1",
        "url": "https://example.com/u/jdoe"
    })
    .to_string()
}

pub fn access_frame(uuid: &str, status: u16) -> String {
    json!({
        "type": "access",
        "uuid": uuid,
        "level": "info",
        "logger": "nginx",
        "event": "request",
        "timestamp": "2020-05-01T11:55:00Z",
        "status": status,
        "url": "https://example.com",
        "path": "/health",
        "ip": "10.0.0.2"
    })
    .to_string()
}

pub fn cpu_frame(uuid: &str, camano: f64, rosario: f64, monaco: f64) -> String {
    json!({
        "type": "cpu",
        "uuid": uuid,
        "servers": {
            "Camano": camano,
            "Rosario": rosario,
            "Monaco": monaco
        }
    })
    .to_string()
}

/// Flatten a buffer into newline-separated rows.
pub fn buffer_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut text = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}
