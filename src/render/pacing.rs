//! Frame pacing for incremental drawing.
//!
//! The engine itself never waits. Pacing lives in a sink wrapper so the same
//! run can be replayed quickly or as a slow animation.

use crate::engine::{PlotPoint, TraceSink};
use log::trace;
use std::thread;
use std::time::Duration;

/// How many points form one frame and how long to hold each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    pub points_per_frame: usize,
    pub frame_delay: Duration,
}

impl Cadence {
    pub fn new(points_per_frame: usize, frame_delay: Duration) -> Self {
        Self {
            points_per_frame: points_per_frame.max(1),
            frame_delay,
        }
    }

    /// Same frame size, no waiting
    pub fn without_delay(self) -> Self {
        Self {
            frame_delay: Duration::ZERO,
            ..self
        }
    }
}

/// Sink wrapper that groups points into frames
pub struct Paced<S> {
    inner: S,
    cadence: Cadence,
    pending: usize,
    frames: usize,
}

impl<S: TraceSink> Paced<S> {
    pub fn new(inner: S, cadence: Cadence) -> Self {
        Self {
            inner,
            cadence,
            pending: 0,
            frames: 0,
        }
    }

    /// Frames completed so far
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    fn flush_frame(&mut self) {
        self.inner.end_frame();
        self.frames += 1;
        trace!("Frame {} flushed ({} points)", self.frames, self.pending);
        self.pending = 0;

        if !self.cadence.frame_delay.is_zero() {
            thread::sleep(self.cadence.frame_delay);
        }
    }
}

impl<S: TraceSink> TraceSink for Paced<S> {
    fn begin(&mut self) {
        self.pending = 0;
        self.frames = 0;
        self.inner.begin();
    }

    fn plot(&mut self, point: &PlotPoint) {
        self.inner.plot(point);
        self.pending += 1;

        if self.pending >= self.cadence.points_per_frame {
            self.flush_frame();
        }
    }

    fn end_frame(&mut self) {
        if self.pending > 0 {
            self.flush_frame();
        }
    }

    fn finish(&mut self) {
        // Partial last frame
        if self.pending > 0 {
            self.flush_frame();
        }
        self.inner.finish();
    }
}
