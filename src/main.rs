//! Seismo Trace CLI
//!
//! Analyzes two-column seismic amplitude files.
//! Produces SVG traces, statistics reports and terminal summaries.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use seismo_trace::commands::{
    display_profiles, display_version, execute_analyze, validate_args, validate_report_file,
    AnalyzeArgs, ParserKind,
};
use seismo_trace::utils::config::OptimizationProfile;

/// Seismo Trace - seismic trace analysis and rendering
#[derive(Parser, Debug)]
#[command(name = "seismo-trace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a data file
    Analyze {
        /// Seismic data file (two-column ascii)
        #[arg(short, long)]
        file: PathBuf,

        /// TOML config file
        #[arg(short, long, env = "SEISMO_TRACE_CONFIG")]
        config: Option<PathBuf>,

        /// Analyze every n-th line
        #[arg(short, long)]
        stride: Option<usize>,

        /// Playback profile
        #[arg(short, long, value_enum)]
        profile: Option<OptimizationProfile>,

        /// Horizontal distance per sample
        #[arg(long)]
        step: Option<f64>,

        /// Multiplier from raw amplitude to plot height
        #[arg(long)]
        scale: Option<f64>,

        /// Scaled magnitude above which a spike is elevated
        #[arg(long)]
        elevated: Option<f64>,

        /// Scaled magnitude above which a spike is critical
        #[arg(long)]
        critical: Option<f64>,

        /// Record parser
        #[arg(long, value_enum, default_value = "fixed")]
        parser: ParserKind,

        /// Character offset of the value column (fixed parser)
        #[arg(long)]
        offset: Option<usize>,

        /// Output path for the SVG trace (optional)
        #[arg(long)]
        svg: Option<PathBuf>,

        /// SVG title
        #[arg(long)]
        title: Option<String>,

        /// Output path for the text report (optional)
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Output path for the JSON report (optional)
        #[arg(long)]
        json: Option<PathBuf>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,

        /// Draw without frame delays
        #[arg(long)]
        no_delay: bool,
    },

    /// Validate a JSON report file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// List playback profiles
    Profiles,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Analyze {
            file,
            config,
            stride,
            profile,
            step,
            scale,
            elevated,
            critical,
            parser,
            offset,
            svg,
            title,
            report,
            json,
            summary,
            no_delay,
        } => {
            let args = AnalyzeArgs {
                data_file: file,
                config_file: config,
                stride,
                profile,
                horizontal_step: step,
                vertical_scale: scale,
                elevated,
                critical,
                parser,
                value_offset: offset,
                output_svg: svg,
                output_report: report,
                output_json: json,
                svg_title: title,
                print_summary: summary,
                no_delay,
            };

            // Validate args first
            validate_args(&args)?;

            execute_analyze(args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(&file)?;
        }

        Commands::Profiles => {
            display_profiles();
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
