//! Rendering collaborators for the trace engine.
//!
//! - SVG trace output
//! - Frame pacing for animated playback
//! - Colored terminal summary

pub mod pacing;
pub mod summary;
pub mod svg;

// Re-export main types
pub use pacing::{Cadence, Paced};
pub use summary::render_terminal_summary;
pub use svg::{SvgConfig, SvgTraceRenderer};
