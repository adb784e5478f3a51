//! Rendering collaborator interface.
//!
//! The engine pushes every plotted point through a [`TraceSink`]. Statistics
//! are accumulated separately, so a run works the same with no renderer at all
//! (see [`NullSink`]).

use super::classifier::Severity;
use serde::{Deserialize, Serialize};

/// A processed sample in plot space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    /// Zero-based source line index
    pub index: usize,

    /// Amplitude as read from the file
    pub raw_value: f64,

    pub x: f64,
    pub y: f64,
    pub severity: Severity,
}

/// Receives draw commands from the engine
pub trait TraceSink {
    /// Clear the canvas and draw the zero line; called once before streaming
    fn begin(&mut self) {}

    /// Draw from the current pen position to `point`
    fn plot(&mut self, point: &PlotPoint);

    /// Frame boundary, used by pacing wrappers
    fn end_frame(&mut self) {}

    /// Input exhausted, no more points follow
    fn finish(&mut self) {}
}

impl<S: TraceSink + ?Sized> TraceSink for &mut S {
    fn begin(&mut self) {
        (**self).begin();
    }

    fn plot(&mut self, point: &PlotPoint) {
        (**self).plot(point);
    }

    fn end_frame(&mut self) {
        (**self).end_frame();
    }

    fn finish(&mut self) {
        (**self).finish();
    }
}

/// Collects points in memory
impl TraceSink for Vec<PlotPoint> {
    fn begin(&mut self) {
        self.clear();
    }

    fn plot(&mut self, point: &PlotPoint) {
        self.push(*point);
    }
}

/// Discards every point; for statistics-only runs
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn plot(&mut self, _point: &PlotPoint) {}
}
