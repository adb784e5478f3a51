use crate::utils::config::OptimizationProfile;
use clap::ValueEnum;
use std::path::PathBuf;

/// Which record parser to run the engine with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ParserKind {
    /// Value column at a fixed character offset
    #[default]
    Fixed,
    /// Second whitespace-separated column
    Tokens,
}

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
///
/// Optional analysis settings left as `None` fall back to the config file,
/// then to the built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeArgs {
    /// Seismic data file to analyze
    pub data_file: PathBuf,

    /// Optional TOML config file
    pub config_file: Option<PathBuf>,

    /// Analyze every n-th line
    pub stride: Option<usize>,

    /// Playback profile
    pub profile: Option<OptimizationProfile>,

    pub horizontal_step: Option<f64>,
    pub vertical_scale: Option<f64>,
    pub elevated: Option<f64>,
    pub critical: Option<f64>,

    pub parser: ParserKind,

    /// Character offset of the value column (fixed parser only)
    pub value_offset: Option<usize>,

    /// Output path for the SVG trace (optional)
    pub output_svg: Option<PathBuf>,

    /// Output path for the text report (optional)
    pub output_report: Option<PathBuf>,

    /// Output path for the JSON report (optional)
    pub output_json: Option<PathBuf>,

    /// SVG title
    pub svg_title: Option<String>,

    /// Print text summary to stdout
    pub print_summary: bool,

    /// Skip frame delays while drawing
    pub no_delay: bool,
}
