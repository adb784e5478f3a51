//! Seismo Trace
//!
//! Streaming analysis and trace rendering for two-column seismic
//! amplitude files.
//!
//! This crate provides the core implementation for the
//! `seismo-trace` CLI tool: record parsing, stride decimation,
//! spike classification, running statistics, and the SVG/report
//! collaborators that consume them.
//!
//! ## Getting Started
//!
//! ```bash
//! seismo-trace analyze --file quake.ascii --stride 2 --svg trace.svg --summary
//! ```

pub mod commands;
pub mod engine;
pub mod output;
pub mod parser;
pub mod render;
pub mod utils;
