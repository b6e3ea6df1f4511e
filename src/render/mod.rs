//! Renderers turning admitted records into display view-models.
//!
//! Renderers are pure with respect to the terminal: they produce
//! [`RenderedCard`]s and [`TimeSeries`] points that the `ui` module
//! draws, so they can be tested without a display surface.

pub mod card;
pub mod level;
pub mod metric;
pub mod relative_time;

pub use card::{render_access_card, render_user_card, CardFeed, CardLine, RenderedCard};
pub use level::{classify_level, DANGER};
pub use metric::{MetricRenderer, TimeSeries, DEFAULT_SERVERS, DEFAULT_WINDOW};
pub use relative_time::from_now;
