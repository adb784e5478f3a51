//! Analysis report schema and text presentation.
//!
//! The report echoes the run settings back next to the final statistics.
//! The same struct is written as plain text or as JSON.

use crate::engine::{AnalysisConfig, RunSummary, RunningStats, Severity, SeverityCounts};
use crate::utils::config::{OptimizationProfile, REPORT_SCHEMA_VERSION};
use crate::utils::error::OutputError;
use chrono::Local;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Final report for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Timestamp when the run finished (RFC 3339, local time)
    pub generated_at: String,

    /// Data file that was analyzed
    pub source_file: String,

    pub profile: OptimizationProfile,
    pub config: AnalysisConfig,

    /// Absent when no samples were processed
    #[serde(default, skip_serializing_if = "RunningStats::is_empty")]
    pub stats: RunningStats,

    /// Absent when no samples were processed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,

    pub severity: SeverityCounts,
    pub lines_read: usize,
}

impl AnalysisReport {
    /// Build a report stamped with the current time
    pub fn new(
        source_file: impl Into<String>,
        profile: OptimizationProfile,
        config: &AnalysisConfig,
        summary: &RunSummary,
    ) -> Self {
        Self {
            version: REPORT_SCHEMA_VERSION.to_string(),
            generated_at: Local::now().to_rfc3339(),
            source_file: source_file.into(),
            profile,
            config: *config,
            stats: summary.stats,
            mean: summary.stats.mean(),
            severity: summary.severity,
            lines_read: summary.lines_read,
        }
    }

    /// Line-oriented key/value text, one statistic per line
    pub fn render_text(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Simulation finished on: {}", self.generated_at));
        lines.push("With Settings:".to_string());
        lines.push(format!("\tOptimization: {}", self.profile.name()));
        lines.push(format!("\tSample Size: {}", self.config.stride));
        lines.push(format!("\tFile: {}", self.source_file));
        lines.push(format!("\tHorizontal Step: {}", self.config.horizontal_step));
        lines.push(format!("\tVertical Scale: {}", self.config.vertical_scale));
        lines.push(format!(
            "\tThresholds: elevated {} / critical {}",
            self.config.thresholds.elevated, self.config.thresholds.critical
        ));
        lines.push(String::new());

        lines.push(format!("Lines read: {}", self.lines_read));
        lines.push(format!("Number of data points plotted: {}", self.stats.count));

        if self.stats.is_empty() {
            lines.push("Max data point: n/a".to_string());
            lines.push("Min data point: n/a".to_string());
        } else {
            lines.push(format!("Max data point: {:e}", self.stats.max));
            lines.push(format!("Min data point: {:e}", self.stats.min));
        }

        match self.mean {
            Some(mean) => lines.push(format!("Average data point: {:e}", mean)),
            None => lines.push("Average data point: n/a".to_string()),
        }

        for severity in Severity::ALL {
            lines.push(format!(
                "{} spikes: {}",
                severity.label(),
                self.severity.get(severity)
            ));
        }

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}

/// Write the text report to a file
///
/// **Public** - main entry point for text output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is empty, a directory, or cannot be created
pub fn write_report(
    report: &AnalysisReport,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing report to: {}", output_path.display());

    super::validate_path(output_path)?;
    super::create_parent_dirs(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    let text = report.render_text();
    writer
        .write_all(text.as_bytes())
        .map_err(OutputError::WriteFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    info!("Report written successfully ({} bytes)", text.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(stats: RunningStats) -> RunSummary {
        RunSummary {
            stats,
            lines_read: 3,
            points_emitted: stats.count,
            severity: SeverityCounts {
                normal: stats.count,
                elevated: 0,
                critical: 0,
            },
        }
    }

    #[test]
    fn test_render_text() {
        let stats = RunningStats {
            count: 2,
            min: 1.5,
            max: 2.5,
            sum: 4.0,
        };
        let report = AnalysisReport::new(
            "quake.ascii",
            OptimizationProfile::Animation,
            &AnalysisConfig::new().with_stride(3),
            &summary(stats),
        );

        let text = report.render_text();
        assert!(text.starts_with("Simulation finished on: "));
        assert!(text.contains("\tOptimization: animation\n"));
        assert!(text.contains("\tSample Size: 3\n"));
        assert!(text.contains("\tFile: quake.ascii\n"));
        assert!(text.contains("Number of data points plotted: 2\n"));
        assert!(text.contains("Max data point: 2.5e0\n"));
        assert!(text.contains("Min data point: 1.5e0\n"));
        assert!(text.contains("Average data point: 2e0\n"));
        assert!(text.contains("Normal spikes: 2\n"));
    }

    #[test]
    fn test_render_text_empty_run() {
        let report = AnalysisReport::new(
            "empty.ascii",
            OptimizationProfile::Speed,
            &AnalysisConfig::default(),
            &summary(RunningStats::default()),
        );

        assert_eq!(report.mean, None);
        let text = report.render_text();
        assert!(text.contains("Number of data points plotted: 0\n"));
        assert!(text.contains("Average data point: n/a\n"));
        assert!(text.contains("Max data point: n/a\n"));
    }
}
