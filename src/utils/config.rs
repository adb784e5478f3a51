//! Configuration and constants for the CLI.

use crate::render::Cadence;
use crate::utils::error::ConfigError;
use clap::ValueEnum;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Current report schema version
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Character offset of the value column in a data record.
/// `   1.9999994e+02   4.4340977e-09` -> value starts at 17
pub const DEFAULT_VALUE_OFFSET: usize = 17;

pub const DEFAULT_STRIDE: usize = 1;

// Each processed sample moves the pen 1/10 of a unit per stride
pub const DEFAULT_HORIZONTAL_STEP: f64 = 0.1;

// Raw amplitudes sit around 1e-8; shift them into a drawable range
pub const DEFAULT_VERTICAL_SCALE: f64 = 100.0;

pub const DEFAULT_ELEVATED_THRESHOLD: f64 = 35.0;
pub const DEFAULT_CRITICAL_THRESHOLD: f64 = 60.0;

/// Expected extension for seismic data files
pub const DATA_FILE_EXTENSION: &str = "ascii";

/// Playback profile: trades animation smoothness for speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizationProfile {
    /// Large frames, quick graph
    #[default]
    Speed,
    /// Small frames, smooth drawing
    Animation,
}

impl OptimizationProfile {
    /// Frame cadence for this profile
    pub fn cadence(self) -> Cadence {
        match self {
            OptimizationProfile::Speed => Cadence::new(1000, Duration::from_millis(25)),
            OptimizationProfile::Animation => Cadence::new(50, Duration::from_millis(15)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OptimizationProfile::Speed => "speed",
            OptimizationProfile::Animation => "animation",
        }
    }
}

/// Contents of a `seismo-trace.toml` config file
///
/// Every field is optional; missing values fall back to the defaults above
/// and command line flags take precedence over anything set here.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FileConfig {
    #[serde(default)]
    pub analysis: AnalysisSection,

    #[serde(default)]
    pub playback: PlaybackSection,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AnalysisSection {
    pub stride: Option<usize>,
    pub horizontal_step: Option<f64>,
    pub vertical_scale: Option<f64>,
    pub value_offset: Option<usize>,

    #[serde(default)]
    pub thresholds: ThresholdSection,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ThresholdSection {
    pub elevated: Option<f64>,
    pub critical: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlaybackSection {
    pub profile: Option<OptimizationProfile>,
    pub points_per_frame: Option<usize>,
    pub frame_delay_ms: Option<u64>,
}

impl PlaybackSection {
    /// Cadence of the chosen profile with any explicit overrides applied
    pub fn cadence(&self, profile: OptimizationProfile) -> Cadence {
        let base = profile.cadence();
        Cadence::new(
            self.points_per_frame.unwrap_or(base.points_per_frame),
            self.frame_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(base.frame_delay),
        )
    }
}

/// Load a config file from TOML
///
/// # Errors
/// * `ConfigError::IoError` - If file cannot be read
/// * `ConfigError::ParseFailed` - If TOML is invalid
pub fn load_config(path: impl AsRef<Path>) -> Result<FileConfig, ConfigError> {
    let path = path.as_ref();
    debug!("Loading config from: {}", path.display());

    let contents = fs::read_to_string(path)?;
    let config: FileConfig = toml::from_str(&contents)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_cadence() {
        let speed = OptimizationProfile::Speed.cadence();
        assert_eq!(speed.points_per_frame, 1000);
        assert_eq!(speed.frame_delay, Duration::from_millis(25));

        let animation = OptimizationProfile::Animation.cadence();
        assert_eq!(animation.points_per_frame, 50);
        assert_eq!(animation.frame_delay, Duration::from_millis(15));
    }

    #[test]
    fn test_empty_toml_is_all_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert!(config.analysis.stride.is_none());
        assert!(config.analysis.thresholds.elevated.is_none());
        assert!(config.playback.profile.is_none());
    }

    #[test]
    fn test_playback_overrides() {
        let playback = PlaybackSection {
            profile: None,
            points_per_frame: Some(10),
            frame_delay_ms: None,
        };
        let cadence = playback.cadence(OptimizationProfile::Animation);
        assert_eq!(cadence.points_per_frame, 10);
        assert_eq!(cadence.frame_delay, Duration::from_millis(15));
    }
}
