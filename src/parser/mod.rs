//! Data file record parsing.
//!
//! This module handles:
//! - Extracting the amplitude column from a raw record
//! - Swappable parsing strategies (fixed offset or whitespace columns)

pub mod line;

// Re-export main types
pub use line::{FixedOffsetParser, LineParser, Sample, WhitespaceParser};
