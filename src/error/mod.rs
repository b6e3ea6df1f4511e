//! Error types for structlog-view.
//!
//! Two families of errors exist:
//!
//! - **Feed errors** (`FeedError`): raised per frame or per connection. They
//!   are contained by the session and never interrupt the event loop.
//! - **Configuration errors** (`ConfigError`): raised while loading settings
//!   at startup or on reload.
//!
//! The application boundary (`main` and the run loop) uses `color_eyre::Result`.

mod config;
mod feed;

pub use config::ConfigError;
pub use feed::FeedError;
