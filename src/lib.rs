//! structlog-view - a terminal viewer for live structlog feeds
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod feed;
pub mod logging;
pub mod pipeline;
pub mod render;
pub mod terminal;
pub mod traits;
pub mod ui;
