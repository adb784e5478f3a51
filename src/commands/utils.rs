use crate::output::read_report_json;
use crate::utils::config::{OptimizationProfile, REPORT_SCHEMA_VERSION};
use anyhow::{Context, Result};
use clap::ValueEnum;
use std::path::Path;

/// Validate a JSON report file
pub fn validate_report_file(file_path: &Path) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report_json(file_path)
        .with_context(|| format!("Failed to read report {}", file_path.display()))?;

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Generated: {}", report.generated_at);
    println!("  Source: {}", report.source_file);
    println!("  Profile: {}", report.profile.name());
    println!("  Stride: {}", report.config.stride);
    println!("  Points: {}", report.stats.count);
    match report.mean {
        Some(mean) => println!("  Mean: {:e}", mean),
        None => println!("  Mean: n/a"),
    }

    Ok(())
}

/// Display the playback profiles and their cadence
pub fn display_profiles() {
    println!("Playback profiles:");
    for profile in OptimizationProfile::value_variants() {
        let cadence = profile.cadence();
        println!(
            "  {:<10} {:>5} points/frame, {:>3} ms/frame",
            profile.name(),
            cadence.points_per_frame,
            cadence.frame_delay.as_millis()
        );
    }
}

/// Display version information
pub fn display_version() {
    println!("Seismo Trace v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", REPORT_SCHEMA_VERSION);
    println!();
    println!("Streaming analysis and trace rendering for seismic amplitude files.");
}
