//! Streaming trace analysis.
//!
//! The engine walks the input one line at a time, keeps every `stride`-th
//! line, and for each kept line:
//! 1. Parses the amplitude
//! 2. Maps it to plot coordinates
//! 3. Classifies its severity
//! 4. Emits a [`PlotPoint`] to the sink
//! 5. Folds the raw value into the running statistics
//!
//! A single bad record aborts the whole run. Points already handed to the sink
//! stay valid.

use super::classifier::{classify, Severity};
use super::config::AnalysisConfig;
use super::mapper::map_to_point;
use super::sink::{PlotPoint, TraceSink};
use super::stats::{RunningStats, StatsAccumulator};
use crate::parser::{FixedOffsetParser, LineParser, Sample};
use crate::utils::error::{AnalysisError, MapError, ParseError};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::io::BufRead;

/// Lifecycle of a [`TraceEngine`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Running,
    Finished,
    Failed,
}

/// Number of plotted points per severity band
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub normal: usize,
    pub elevated: usize,
    pub critical: usize,
}

impl SeverityCounts {
    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Normal => self.normal += 1,
            Severity::Elevated => self.elevated += 1,
            Severity::Critical => self.critical += 1,
        }
    }

    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Normal => self.normal,
            Severity::Elevated => self.elevated,
            Severity::Critical => self.critical,
        }
    }

    pub fn total(&self) -> usize {
        self.normal + self.elevated + self.critical
    }
}

/// Result of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Final statistics over the raw values
    pub stats: RunningStats,

    /// Lines read from the source, including skipped ones
    pub lines_read: usize,

    /// Points handed to the sink
    pub points_emitted: usize,

    pub severity: SeverityCounts,
}

/// Single-use analysis engine
///
/// **Public** - main entry point for hosts
///
/// # Example
/// ```ignore
/// let file = BufReader::new(File::open("quake.ascii")?);
/// let mut engine = TraceEngine::new();
/// let summary = engine.run_analysis(file, &AnalysisConfig::default(), &mut NullSink)?;
/// println!("{}", summary.stats.summary());
/// ```
#[derive(Debug)]
pub struct TraceEngine<P = FixedOffsetParser> {
    parser: P,
    state: EngineState,
}

impl Default for TraceEngine<FixedOffsetParser> {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceEngine<FixedOffsetParser> {
    pub fn new() -> Self {
        Self::with_parser(FixedOffsetParser::default())
    }
}

impl<P: LineParser> TraceEngine<P> {
    pub fn with_parser(parser: P) -> Self {
        Self {
            parser,
            state: EngineState::Idle,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Run one analysis over `source`
    ///
    /// The source is consumed and dropped before this returns, on success and
    /// on failure alike.
    ///
    /// # Errors
    /// * `AnalysisError::EngineSpent` - engine already ran
    /// * `AnalysisError::InvalidConfig` - config rejected; engine stays `Idle`
    /// * `AnalysisError::DataFileError` - a kept line could not be parsed
    /// * `AnalysisError::InvalidAmplitude` - a kept line holds NaN or infinity,
    ///   or its scaled value overflows
    /// * `AnalysisError::ReadFailed` - the source returned an I/O error
    pub fn run_analysis<R, S>(
        &mut self,
        source: R,
        config: &AnalysisConfig,
        sink: &mut S,
    ) -> Result<RunSummary, AnalysisError>
    where
        R: BufRead,
        S: TraceSink + ?Sized,
    {
        if self.state != EngineState::Idle {
            return Err(AnalysisError::EngineSpent(self.state));
        }

        config.validate()?;

        info!(
            "Starting analysis (stride {}, scale {}, thresholds {}/{})",
            config.stride,
            config.vertical_scale,
            config.thresholds.elevated,
            config.thresholds.critical
        );
        self.state = EngineState::Running;

        match stream_samples(&self.parser, source, config, sink) {
            Ok(summary) => {
                self.state = EngineState::Finished;
                sink.finish();
                info!(
                    "Analysis finished: {} of {} lines plotted",
                    summary.points_emitted, summary.lines_read
                );
                Ok(summary)
            }
            Err(e) => {
                self.state = EngineState::Failed;
                warn!("Analysis failed: {}", e);
                Err(e)
            }
        }
    }
}

/// Run a fresh engine with the default parser
///
/// **Public** - convenience for one-shot analyses
pub fn analyze<R, S>(
    source: R,
    config: &AnalysisConfig,
    sink: &mut S,
) -> Result<RunSummary, AnalysisError>
where
    R: BufRead,
    S: TraceSink + ?Sized,
{
    TraceEngine::new().run_analysis(source, config, sink)
}

/// Main streaming loop
///
/// **Private** - state transitions are handled by the caller
fn stream_samples<P, R, S>(
    parser: &P,
    mut source: R,
    config: &AnalysisConfig,
    sink: &mut S,
) -> Result<RunSummary, AnalysisError>
where
    P: LineParser,
    R: BufRead,
    S: TraceSink + ?Sized,
{
    let mut stats = StatsAccumulator::new();
    let mut severity = SeverityCounts::default();
    let mut lines_read = 0;
    let mut points_emitted = 0;
    let mut buf = Vec::new();

    sink.begin();

    loop {
        let index = lines_read;
        let line_number = index + 1;

        buf.clear();
        let read = source
            .read_until(b'\n', &mut buf)
            .map_err(|source| AnalysisError::ReadFailed {
                line: line_number,
                source,
            })?;
        if read == 0 {
            break;
        }
        lines_read += 1;

        // Skipped lines are never decoded
        if index % config.stride != 0 {
            continue;
        }

        let raw_value = decode_line(&buf)
            .and_then(|line| parser.parse(line))
            .map_err(|source| AnalysisError::DataFileError {
                line: line_number,
                source,
            })?;

        let point = plot_sample(Sample { index, raw_value }, config).map_err(
            |MapError::InvalidAmplitude(value)| AnalysisError::InvalidAmplitude {
                line: line_number,
                value,
            },
        )?;

        sink.plot(&point);
        stats.observe(raw_value);
        severity.record(point.severity);
        points_emitted += 1;
    }

    let stats = stats.snapshot();
    debug!("{}", stats.summary());

    Ok(RunSummary {
        stats,
        lines_read,
        points_emitted,
        severity,
    })
}

/// Strip the line terminator and decode the record as UTF-8
///
/// **Private** - internal helper for stream_samples
fn decode_line(raw: &[u8]) -> Result<&str, ParseError> {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);

    std::str::from_utf8(raw).map_err(|e| ParseError::InvalidUtf8 {
        valid_up_to: e.valid_up_to(),
    })
}

/// Turn a kept sample into a classified plot point
///
/// **Private** - internal helper for stream_samples
fn plot_sample(sample: Sample, config: &AnalysisConfig) -> Result<PlotPoint, MapError> {
    // Pen starts at the origin; each kept sample moves one full stride right
    let ordinal = sample.index + config.stride;
    let (x, y) = map_to_point(ordinal, sample.raw_value, config)?;

    Ok(PlotPoint {
        index: sample.index,
        raw_value: sample.raw_value,
        x,
        y,
        severity: classify(y, config),
    })
}
