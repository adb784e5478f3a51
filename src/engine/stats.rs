//! Running statistics over processed samples.
//!
//! Nothing is retained besides count, min, max and sum, so memory stays
//! constant no matter how long the input file is.

use serde::{Deserialize, Serialize};

/// Snapshot of the running statistics
///
/// `min` and `max` are only meaningful when `count > 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunningStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub sum: f64,
}

impl RunningStats {
    /// Mean of the observed values, `None` when nothing was observed
    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Human-readable one-liner for logging
    pub fn summary(&self) -> String {
        match self.mean() {
            Some(mean) => format!(
                "Points: {} | Min: {:e} | Max: {:e} | Mean: {:e}",
                self.count, self.min, self.max, mean
            ),
            None => "Points: 0 | no samples".to_string(),
        }
    }
}

/// Incremental accumulator behind [`RunningStats`]
#[derive(Debug, Clone, Default)]
pub struct StatsAccumulator {
    stats: RunningStats,
}

impl StatsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one value into the statistics
    pub fn observe(&mut self, value: f64) {
        let stats = &mut self.stats;

        if stats.count == 0 {
            stats.min = value;
            stats.max = value;
        } else {
            stats.min = stats.min.min(value);
            stats.max = stats.max.max(value);
        }

        stats.count += 1;
        stats.sum += value;
    }

    pub fn snapshot(&self) -> RunningStats {
        self.stats
    }
}
