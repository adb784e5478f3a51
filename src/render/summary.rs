//! Terminal summary of a finished run.

use crate::engine::{AnalysisConfig, RunSummary, Severity};
use colored::*;

const BAR_WIDTH: usize = 40;

/// Render a human-readable run summary for the terminal
pub fn render_terminal_summary(summary: &RunSummary, config: &AnalysisConfig) -> String {
    let mut out = String::new();

    out.push_str("\n📈 ");
    out.push_str(&"Seismic Trace Summary".bold().to_string());
    out.push_str("\n---------------------------------------------------\n");
    out.push_str(&format!(
        "Lines read:    {}\nPoints drawn:  {} (stride {})\n",
        summary.lines_read, summary.points_emitted, config.stride
    ));

    let stats = &summary.stats;
    match stats.mean() {
        Some(mean) => {
            out.push_str(&format!("Max:           {:e}\n", stats.max));
            out.push_str(&format!("Min:           {:e}\n", stats.min));
            out.push_str(&format!("Mean:          {:e}\n", mean));
        }
        None => out.push_str(&format!("{}\n", "No samples processed".dimmed())),
    }

    out.push_str("---------------------------------------------------\n");
    out.push_str(&render_severity_bars(summary));

    out
}

fn render_severity_bars(summary: &RunSummary) -> String {
    let mut out = String::new();
    let total = summary.severity.total().max(1);

    for severity in Severity::ALL {
        let count = summary.severity.get(severity);
        let percentage = count as f64 / total as f64 * 100.0;
        let bar = "█".repeat((percentage / 100.0 * BAR_WIDTH as f64).round() as usize);

        out.push_str(&format!(
            "  {:<9} {:<40} {:>6} ({:>5.1}%)\n",
            paint(severity, severity.label()),
            paint(severity, &bar),
            count,
            percentage
        ));
    }

    out
}

fn paint(severity: Severity, text: &str) -> ColoredString {
    match severity {
        Severity::Normal => text.green(),
        Severity::Elevated => text.yellow(),
        Severity::Critical => text.red().bold(),
    }
}
