//! Analysis run configuration.

use crate::utils::config::{
    DEFAULT_CRITICAL_THRESHOLD, DEFAULT_ELEVATED_THRESHOLD, DEFAULT_HORIZONTAL_STEP,
    DEFAULT_STRIDE, DEFAULT_VERTICAL_SCALE,
};
use crate::utils::error::AnalysisError;
use serde::{Deserialize, Serialize};

/// Scaled-amplitude limits for the severity bands
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityThresholds {
    /// Above this magnitude a spike is elevated
    pub elevated: f64,

    /// Above this magnitude a spike is critical
    pub critical: f64,
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        Self {
            elevated: DEFAULT_ELEVATED_THRESHOLD,
            critical: DEFAULT_CRITICAL_THRESHOLD,
        }
    }
}

/// Immutable input to one analysis run
///
/// Thresholds are compared against the *scaled* amplitude, so changing
/// `vertical_scale` also moves where spikes start being flagged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Only every `stride`-th line is analyzed
    pub stride: usize,

    /// Horizontal distance per sample ordinal
    pub horizontal_step: f64,

    /// Multiplier from raw amplitude to plot height
    pub vertical_scale: f64,

    pub thresholds: SeverityThresholds,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            stride: DEFAULT_STRIDE,
            horizontal_step: DEFAULT_HORIZONTAL_STEP,
            vertical_scale: DEFAULT_VERTICAL_SCALE,
            thresholds: SeverityThresholds::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride;
        self
    }

    pub fn with_horizontal_step(mut self, step: f64) -> Self {
        self.horizontal_step = step;
        self
    }

    pub fn with_vertical_scale(mut self, scale: f64) -> Self {
        self.vertical_scale = scale;
        self
    }

    pub fn with_thresholds(mut self, elevated: f64, critical: f64) -> Self {
        self.thresholds = SeverityThresholds { elevated, critical };
        self
    }

    /// Check the config before a run starts
    ///
    /// **Public** - called by the engine, also usable by hosts for early validation
    ///
    /// # Errors
    /// * `AnalysisError::InvalidConfig` - stride is zero, a threshold is negative
    ///   or not finite, `elevated > critical`, or a scale factor is unusable
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.stride < 1 {
            return Err(invalid("stride must be at least 1"));
        }

        let SeverityThresholds { elevated, critical } = self.thresholds;

        if !elevated.is_finite() || !critical.is_finite() {
            return Err(invalid("thresholds must be finite"));
        }

        if elevated < 0.0 || critical < 0.0 {
            return Err(invalid("thresholds must be non-negative"));
        }

        if elevated > critical {
            return Err(AnalysisError::InvalidConfig(format!(
                "elevated threshold ({}) exceeds critical threshold ({})",
                elevated, critical
            )));
        }

        // x must stay non-decreasing across a run
        if !self.horizontal_step.is_finite() || self.horizontal_step < 0.0 {
            return Err(invalid("horizontal step must be finite and non-negative"));
        }

        if !self.vertical_scale.is_finite() {
            return Err(invalid("vertical scale must be finite"));
        }

        Ok(())
    }
}

fn invalid(msg: &str) -> AnalysisError {
    AnalysisError::InvalidConfig(msg.to_string())
}
