//! Record parsing for two-column seismic data files.
//!
//! A record looks like:
//! ```text
//!    1.9999994e+02   4.4340977e-09
//! ```
//! Only the second column (amplitude) is consumed. The default parser reads it
//! from a fixed character offset rather than splitting on whitespace, so files
//! with irregular spacing are read exactly the way the column layout dictates.

use crate::utils::config::DEFAULT_VALUE_OFFSET;
use crate::utils::error::ParseError;

/// One decimated record from the input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Zero-based line index in the source
    pub index: usize,

    /// Amplitude as read from the file
    pub raw_value: f64,
}

/// Turns one raw text record into an amplitude value
pub trait LineParser {
    fn parse(&self, raw_line: &str) -> Result<f64, ParseError>;
}

/// Reads the value from a fixed character offset to end of line
///
/// **Public** - default parser used by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedOffsetParser {
    offset: usize,
}

impl Default for FixedOffsetParser {
    fn default() -> Self {
        Self::new(DEFAULT_VALUE_OFFSET)
    }
}

impl FixedOffsetParser {
    pub fn new(offset: usize) -> Self {
        Self { offset }
    }
}

impl LineParser for FixedOffsetParser {
    fn parse(&self, raw_line: &str) -> Result<f64, ParseError> {
        // Offset counts characters, not bytes
        let start = raw_line
            .char_indices()
            .nth(self.offset)
            .map(|(pos, _)| pos)
            .ok_or_else(|| ParseError::TooShort {
                len: raw_line.chars().count(),
                offset: self.offset,
            })?;

        parse_float(&raw_line[start..])
    }
}

/// Reads the second whitespace-separated column
///
/// **Public** - tolerant alternative for files with varying column widths
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WhitespaceParser;

impl LineParser for WhitespaceParser {
    fn parse(&self, raw_line: &str) -> Result<f64, ParseError> {
        let column = raw_line
            .split_whitespace()
            .nth(1)
            .ok_or(ParseError::MissingColumn)?;

        parse_float(column)
    }
}

/// Parse a float literal, ignoring surrounding whitespace
///
/// **Private** - shared by both parsers
fn parse_float(text: &str) -> Result<f64, ParseError> {
    let trimmed = text.trim();
    trimmed.parse::<f64>().map_err(|_| ParseError::NotANumber {
        value: trimmed.to_string(),
    })
}
