//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use crate::engine::EngineState;
use thiserror::Error;

/// Errors that can occur while parsing a single data record
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Malformed record: line is {len} characters, value column starts at {offset}")]
    TooShort { len: usize, offset: usize },

    #[error("Malformed record: {value:?} is not a number")]
    NotANumber { value: String },

    #[error("Malformed record: missing value column")]
    MissingColumn,

    #[error("Malformed record: invalid UTF-8 after byte {valid_up_to}")]
    InvalidUtf8 { valid_up_to: usize },
}

/// Errors that can occur while mapping a sample to plot coordinates
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapError {
    #[error("Invalid amplitude: {0} is not finite")]
    InvalidAmplitude(f64),
}

/// Errors that end an analysis run
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Data file error on line {line}: {source}")]
    DataFileError {
        line: usize,
        #[source]
        source: ParseError,
    },

    #[error("Invalid amplitude on line {line}: {value} is not finite")]
    InvalidAmplitude { line: usize, value: f64 },

    #[error("Failed to read line {line}: {source}")]
    ReadFailed {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("Engine already used (state: {0:?})")]
    EngineSpent(EngineState),
}

/// Errors that can occur while loading a config file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config TOML parse error: {0}")]
    ParseFailed(#[from] toml::de::Error),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
