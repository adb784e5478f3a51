//! Streaming trace analysis engine.
//!
//! This module turns a line source into:
//! - Decimated, classified plot points (pushed to a [`TraceSink`])
//! - Running statistics over the raw amplitudes

pub mod classifier;
pub mod config;
pub mod mapper;
pub mod sink;
pub mod stats;
pub mod trace;

// Re-export main types and functions
pub use classifier::{classify, Severity};
pub use config::{AnalysisConfig, SeverityThresholds};
pub use mapper::map_to_point;
pub use sink::{NullSink, PlotPoint, TraceSink};
pub use stats::{RunningStats, StatsAccumulator};
pub use trace::{analyze, EngineState, RunSummary, SeverityCounts, TraceEngine};
