//! The per-session rendering pipeline.
//!
//! ```text
//! raw frame -> decode_frame -> ViewRouter::accepts -> Deduplicator::admit -> renderer
//! ```
//!
//! A [`Session`] owns one instance of each stage. Rebuilding a session
//! discards all of them.

pub mod dedup;
pub mod router;
pub mod session;

pub use dedup::Deduplicator;
pub use router::{ActiveRenderer, ViewRouter};
pub use session::{FrameOutcome, Session, SessionPhase, SessionStats};
