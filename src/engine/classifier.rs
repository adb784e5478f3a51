//! Spike severity classification.

use super::config::AnalysisConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity band of a plotted spike
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Elevated,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Normal, Severity::Elevated, Severity::Critical];

    /// Color tag handed to renderers
    pub fn color(self) -> &'static str {
        match self {
            Severity::Normal => "green",
            Severity::Elevated => "orange",
            Severity::Critical => "red",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Normal => "Normal",
            Severity::Elevated => "Elevated",
            Severity::Critical => "Critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a scaled amplitude into a severity band
///
/// Comparisons are strict: a magnitude exactly on a threshold stays in the
/// lower band.
pub fn classify(scaled_y: f64, config: &AnalysisConfig) -> Severity {
    let magnitude = scaled_y.abs();

    if magnitude > config.thresholds.critical {
        Severity::Critical
    } else if magnitude > config.thresholds.elevated {
        Severity::Elevated
    } else {
        Severity::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AnalysisConfig {
        AnalysisConfig::new().with_thresholds(35.0, 60.0)
    }

    #[test]
    fn test_bands() {
        let config = config();
        assert_eq!(classify(0.0, &config), Severity::Normal);
        assert_eq!(classify(40.0, &config), Severity::Elevated);
        assert_eq!(classify(-40.0, &config), Severity::Elevated);
        assert_eq!(classify(61.0, &config), Severity::Critical);
        assert_eq!(classify(-1000.0, &config), Severity::Critical);
    }

    #[test]
    fn test_boundary_takes_lower_band() {
        let config = config();
        assert_eq!(classify(35.0, &config), Severity::Normal);
        assert_eq!(classify(-35.0, &config), Severity::Normal);
        assert_eq!(classify(60.0, &config), Severity::Elevated);
        assert_eq!(classify(-60.0, &config), Severity::Elevated);
    }

    #[test]
    fn test_deterministic() {
        let config = config();
        for y in [-70.0, -35.0, 0.0, 35.0000001, 59.9, 60.0, 60.1] {
            assert_eq!(classify(y, &config), classify(y, &config));
        }
    }

    #[test]
    fn test_color_tags() {
        assert_eq!(Severity::Normal.color(), "green");
        assert_eq!(Severity::Elevated.color(), "orange");
        assert_eq!(Severity::Critical.color(), "red");
    }
}
