//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Resolves settings (flags, config file, defaults)
//! 2. Opens the data file
//! 3. Streams it through the trace engine
//! 4. Writes the SVG trace
//! 5. Writes the text/JSON reports and prints the summary

use super::models::{AnalyzeArgs, ParserKind};
use crate::engine::{AnalysisConfig, NullSink, RunSummary, TraceEngine, TraceSink};
use crate::output::{self, write_report, write_report_json, write_svg, AnalysisReport};
use crate::parser::{FixedOffsetParser, WhitespaceParser};
use crate::render::{render_terminal_summary, Cadence, Paced, SvgConfig, SvgTraceRenderer};
use crate::utils::config::{
    load_config, FileConfig, OptimizationProfile, DATA_FILE_EXTENSION, DEFAULT_VALUE_OFFSET,
};
use crate::utils::error::AnalysisError;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::time::Instant;

/// Settings for one run after merging flags, config file and defaults
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedSettings {
    pub config: AnalysisConfig,
    pub profile: OptimizationProfile,
    pub cadence: Cadence,
    pub value_offset: usize,
}

/// Merge CLI flags over the config file over the defaults
///
/// **Public** - exposed for hosts that build their own args
pub fn resolve_settings(args: &AnalyzeArgs, file: &FileConfig) -> ResolvedSettings {
    let defaults = AnalysisConfig::default();
    let analysis = &file.analysis;

    let config = AnalysisConfig {
        stride: args.stride.or(analysis.stride).unwrap_or(defaults.stride),
        horizontal_step: args
            .horizontal_step
            .or(analysis.horizontal_step)
            .unwrap_or(defaults.horizontal_step),
        vertical_scale: args
            .vertical_scale
            .or(analysis.vertical_scale)
            .unwrap_or(defaults.vertical_scale),
        ..defaults
    }
    .with_thresholds(
        args.elevated
            .or(analysis.thresholds.elevated)
            .unwrap_or(defaults.thresholds.elevated),
        args.critical
            .or(analysis.thresholds.critical)
            .unwrap_or(defaults.thresholds.critical),
    );

    let profile = args.profile.or(file.playback.profile).unwrap_or_default();
    let mut cadence = file.playback.cadence(profile);
    if args.no_delay {
        cadence = cadence.without_delay();
    }

    ResolvedSettings {
        config,
        profile,
        cadence,
        value_offset: args
            .value_offset
            .or(analysis.value_offset)
            .unwrap_or(DEFAULT_VALUE_OFFSET),
    }
}

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// Report files are best effort: a failed write is logged and the run still
/// counts as successful.
///
/// # Errors
/// * Config file read/parse failures
/// * Invalid analysis configuration
/// * Unreadable data file
/// * Malformed or non-finite records (fail fast)
/// * SVG write errors
pub fn execute_analyze(args: AnalyzeArgs) -> Result<AnalysisReport> {
    let start_time = Instant::now();

    info!("Starting analysis of: {}", args.data_file.display());

    // Step 1: Resolve settings
    info!("Step 1/5: Resolving settings...");
    let file_config = match &args.config_file {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None => FileConfig::default(),
    };
    let settings = resolve_settings(&args, &file_config);
    settings.config.validate()?;

    debug!("Resolved settings: {:?}", settings);

    // Step 2: Open data file
    info!("Step 2/5: Opening data file...");
    let data_file = File::open(&args.data_file)
        .with_context(|| format!("Failed to open data file {}", args.data_file.display()))?;
    let reader = BufReader::new(data_file);

    // Step 3: Stream through the engine
    info!("Step 3/5: Analyzing trace ({} profile)...", settings.profile.name());
    let (summary, svg) = if args.output_svg.is_some() {
        let mut svg_config = SvgConfig::new();
        if let Some(title) = &args.svg_title {
            svg_config = svg_config.with_title(title.clone());
        }

        let mut paced = Paced::new(SvgTraceRenderer::new(svg_config), settings.cadence);
        let summary = run_engine(
            args.parser,
            settings.value_offset,
            reader,
            &settings.config,
            &mut paced,
        )
        .with_context(|| format!("Analysis of {} failed", args.data_file.display()))?;
        debug!("Drew {} frames", paced.frames());

        (summary, Some(paced.into_inner().render()))
    } else {
        let summary = run_engine(
            args.parser,
            settings.value_offset,
            reader,
            &settings.config,
            &mut NullSink,
        )
        .with_context(|| format!("Analysis of {} failed", args.data_file.display()))?;
        (summary, None)
    };

    info!("Statistics: {}", summary.stats.summary());

    // Step 4: Write SVG trace (if requested)
    if let (Some(svg), Some(svg_path)) = (svg, &args.output_svg) {
        info!("Step 4/5: Writing trace SVG...");
        write_svg(&svg, svg_path).context("Failed to write trace SVG")?;
        info!("✓ Trace written to: {}", svg_path.display());
    } else {
        info!("Step 4/5: Skipping SVG trace (not requested)");
    }

    // Step 5: Reports
    info!("Step 5/5: Writing reports...");
    let report = AnalysisReport::new(
        args.data_file.display().to_string(),
        settings.profile,
        &settings.config,
        &summary,
    );

    if let Some(path) = &args.output_report {
        match write_report(&report, path) {
            Ok(()) => info!("✓ Report written to: {}", path.display()),
            Err(e) => warn!("Could not save report to {}: {}", path.display(), e),
        }
    }

    if let Some(path) = &args.output_json {
        match write_report_json(&report, path) {
            Ok(()) => info!("✓ JSON report written to: {}", path.display()),
            Err(e) => warn!("Could not save JSON report to {}: {}", path.display(), e),
        }
    }

    if args.print_summary {
        println!("{}", render_terminal_summary(&summary, &settings.config));
    }

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    Ok(report)
}

/// Run a fresh engine with the chosen parser
///
/// **Private** - internal helper for execute_analyze
fn run_engine<R, S>(
    parser: ParserKind,
    value_offset: usize,
    reader: R,
    config: &AnalysisConfig,
    sink: &mut S,
) -> Result<RunSummary, AnalysisError>
where
    R: BufRead,
    S: TraceSink,
{
    match parser {
        ParserKind::Fixed => TraceEngine::with_parser(FixedOffsetParser::new(value_offset))
            .run_analysis(reader, config, sink),
        ParserKind::Tokens => {
            TraceEngine::with_parser(WhitespaceParser).run_analysis(reader, config, sink)
        }
    }
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
///
/// # Returns
/// Ok if arguments are valid, Err with message if not
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.data_file.as_os_str().is_empty() {
        anyhow::bail!("Data file path cannot be empty");
    }

    if !args.data_file.is_file() {
        anyhow::bail!("Data file not found: {}", args.data_file.display());
    }

    if args.data_file.extension().map_or(true, |ext| ext != DATA_FILE_EXTENSION) {
        debug!(
            "Data file does not have .{} extension: {}",
            DATA_FILE_EXTENSION,
            args.data_file.display()
        );
    }

    if args.stride == Some(0) {
        anyhow::bail!("stride must be greater than 0");
    }

    if args.value_offset.is_some() && args.parser == ParserKind::Tokens {
        anyhow::bail!("--offset only applies to the fixed parser");
    }

    for path in [&args.output_svg, &args.output_report, &args.output_json]
        .into_iter()
        .flatten()
    {
        output::validate_path(path)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::config::{AnalysisSection, PlaybackSection, ThresholdSection};
    use std::io::Write;
    use std::path::PathBuf;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn data_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_validate_args_valid() {
        let file = data_file("   1.9999994e+02   4.4340977e-09\n");
        let args = AnalyzeArgs {
            data_file: file.path().to_path_buf(),
            ..Default::default()
        };

        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_args_empty_path() {
        let args = AnalyzeArgs::default();
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_missing_file() {
        let args = AnalyzeArgs {
            data_file: PathBuf::from("/definitely/not/here.ascii"),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_zero_stride() {
        let file = data_file("");
        let args = AnalyzeArgs {
            data_file: file.path().to_path_buf(),
            stride: Some(0),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_offset_with_tokens() {
        let file = data_file("");
        let args = AnalyzeArgs {
            data_file: file.path().to_path_buf(),
            parser: ParserKind::Tokens,
            value_offset: Some(4),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_output_is_directory() {
        let file = data_file("");
        let dir = tempfile::tempdir().unwrap();
        let args = AnalyzeArgs {
            data_file: file.path().to_path_buf(),
            output_svg: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_resolve_defaults() {
        let settings = resolve_settings(&AnalyzeArgs::default(), &FileConfig::default());
        assert_eq!(settings.config, AnalysisConfig::default());
        assert_eq!(settings.profile, OptimizationProfile::Speed);
        assert_eq!(settings.value_offset, DEFAULT_VALUE_OFFSET);
        assert_eq!(settings.cadence, OptimizationProfile::Speed.cadence());
    }

    #[test]
    fn test_resolve_flags_override_file() {
        let file = FileConfig {
            analysis: AnalysisSection {
                stride: Some(4),
                horizontal_step: Some(0.5),
                vertical_scale: None,
                value_offset: Some(20),
                thresholds: ThresholdSection {
                    elevated: Some(10.0),
                    critical: Some(20.0),
                },
            },
            playback: PlaybackSection {
                profile: Some(OptimizationProfile::Animation),
                points_per_frame: None,
                frame_delay_ms: Some(40),
            },
        };
        let args = AnalyzeArgs {
            stride: Some(2),
            critical: Some(30.0),
            no_delay: true,
            ..Default::default()
        };

        let settings = resolve_settings(&args, &file);
        assert_eq!(settings.config.stride, 2);
        assert_eq!(settings.config.horizontal_step, 0.5);
        assert_eq!(settings.config.vertical_scale, 100.0);
        assert_eq!(settings.config.thresholds.elevated, 10.0);
        assert_eq!(settings.config.thresholds.critical, 30.0);
        assert_eq!(settings.profile, OptimizationProfile::Animation);
        assert_eq!(settings.cadence.points_per_frame, 50);
        assert_eq!(settings.cadence.frame_delay, Duration::ZERO);
        assert_eq!(settings.value_offset, 20);
    }

    #[test]
    fn test_execute_analyze_writes_outputs() {
        let file = data_file(
            "   1.9999994e+02   4.4340977e-09\n   2.0000994e+02   2.3202048e-08\n",
        );
        let out_dir = tempfile::tempdir().unwrap();
        let args = AnalyzeArgs {
            data_file: file.path().to_path_buf(),
            output_svg: Some(out_dir.path().join("trace.svg")),
            output_report: Some(out_dir.path().join("report.txt")),
            output_json: Some(out_dir.path().join("report.json")),
            no_delay: true,
            ..Default::default()
        };

        let report = execute_analyze(args).unwrap();

        assert_eq!(report.stats.count, 2);
        assert_eq!(report.severity.normal, 2);
        assert!(out_dir.path().join("trace.svg").exists());
        assert!(out_dir.path().join("report.json").exists());

        let text = std::fs::read_to_string(out_dir.path().join("report.txt")).unwrap();
        assert!(text.contains("Number of data points plotted: 2"));
    }

    #[test]
    fn test_execute_analyze_malformed_record() {
        let file = data_file("   1.9999994e+02   4.4340977e-09\n   2.0000994e+02   abc\n");
        let args = AnalyzeArgs {
            data_file: file.path().to_path_buf(),
            ..Default::default()
        };

        let err = execute_analyze(args).unwrap_err();
        let analysis_err = err.downcast_ref::<AnalysisError>().unwrap();
        assert!(matches!(
            analysis_err,
            AnalysisError::DataFileError { line: 2, .. }
        ));
    }

    #[test]
    fn test_execute_analyze_report_failure_is_ignored() {
        let file = data_file("   1.9999994e+02   4.4340977e-09\n");
        let out_dir = tempfile::tempdir().unwrap();
        let args = AnalyzeArgs {
            data_file: file.path().to_path_buf(),
            // A directory cannot be written as a report
            output_report: Some(out_dir.path().to_path_buf()),
            ..Default::default()
        };

        let report = execute_analyze(args).unwrap();
        assert_eq!(report.stats.count, 1);
    }
}
