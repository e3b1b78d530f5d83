//! CineView playback session
//!
//! State machine behind the playback UI: tracks the selected stream,
//! player readiness, classified player errors, and the embedded-frame
//! fallback, and computes previous/next episode navigation across the
//! item's playback source groups.
//!
//! Player errors never crash the session; every classified error either
//! yields a displayable message or switches the render strategy.

pub mod error;
pub mod session;

pub use error::{ErrorDisposition, MediaErrorKind, PlayerError};
pub use session::{PlaybackSession, RenderStrategy, SessionPhase};
