//! SVG trace rendering.
//!
//! Records the pen path as the engine streams points, then lays it out as a
//! standalone SVG:
//! - Zero line across the full trace width
//! - Trace segments colored by the severity of the point they lead to
//! - Legend with per-band point counts

use crate::engine::{PlotPoint, Severity, TraceSink};
use log::{debug, info};

const MARGIN_X: f64 = 20.0;
const TITLE_HEIGHT: f64 = 40.0;
const LEGEND_HEIGHT: f64 = 60.0;
const ZERO_LINE_COLOR: &str = "rgb(65, 105, 225)";

/// SVG canvas configuration
#[derive(Debug, Clone)]
pub struct SvgConfig {
    pub title: String,
    pub width: usize,
    pub height: usize,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            title: "Seismic Trace".to_string(),
            width: 800,
            height: 600,
        }
    }
}

impl SvgConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// One pen movement
#[derive(Debug, Clone, Copy, PartialEq)]
struct Segment {
    from: (f64, f64),
    to: (f64, f64),
    severity: Severity,
}

/// Sink that records the trace and renders it as SVG
#[derive(Debug, Clone)]
pub struct SvgTraceRenderer {
    config: SvgConfig,
    pen: (f64, f64),
    segments: Vec<Segment>,
}

impl Default for SvgTraceRenderer {
    fn default() -> Self {
        Self::new(SvgConfig::default())
    }
}

impl TraceSink for SvgTraceRenderer {
    fn begin(&mut self) {
        self.segments.clear();
        self.pen = (0.0, 0.0);
    }

    fn plot(&mut self, point: &PlotPoint) {
        let to = (point.x, point.y);
        self.segments.push(Segment {
            from: self.pen,
            to,
            severity: point.severity,
        });
        self.pen = to;
    }

    fn finish(&mut self) {
        debug!("SVG trace recorded {} segments", self.segments.len());
    }
}

impl SvgTraceRenderer {
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            pen: (0.0, 0.0),
            segments: Vec::new(),
        }
    }

    /// Number of segments drawn so far
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Lay out the recorded trace as an SVG document
    pub fn render(&self) -> String {
        let width = self.config.width as f64;
        let height = self.config.height as f64;
        let layout = Layout::fit(&self.segments, width, height);

        let mut svg = String::new();

        // Header
        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.config.width,
            h = self.config.height
        ));
        svg.push_str(&format!(
            r#"<rect x="0" y="0" width="{}" height="{}" fill="white"/>"#,
            self.config.width, self.config.height
        ));

        // Title
        svg.push_str(&format!(
            r#"<text x="{}" y="24" font-size="16" font-family="sans-serif" text-anchor="middle" font-weight="bold">{}</text>"#,
            self.config.width / 2,
            escape_xml(&self.config.title)
        ));

        // Zero line
        svg.push_str(&format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="1"/>"#,
            layout.to_px_x(0.0),
            layout.to_px_y(0.0),
            layout.to_px_x(layout.max_x),
            layout.to_px_y(0.0),
            ZERO_LINE_COLOR
        ));

        self.render_segments(&mut svg, &layout);
        self.render_legend(&mut svg);

        svg.push_str("</svg>");

        info!("Trace SVG rendered ({} bytes)", svg.len());
        svg
    }

    /// Emit runs of same-severity segments as one polyline each
    fn render_segments(&self, out: &mut String, layout: &Layout) {
        for run in self.segments.chunk_by(|a, b| a.severity == b.severity) {
            let severity = run[0].severity;
            let mut points = String::new();
            let (fx, fy) = run[0].from;
            points.push_str(&format!("{:.2},{:.2}", layout.to_px_x(fx), layout.to_px_y(fy)));

            for segment in run {
                let (tx, ty) = segment.to;
                points.push_str(&format!(" {:.2},{:.2}", layout.to_px_x(tx), layout.to_px_y(ty)));
            }

            out.push_str(&format!(
                r#"<polyline class="{}" points="{}" fill="none" stroke="{}" stroke-width="1"/>"#,
                severity.color(),
                points,
                severity_rgb(severity)
            ));
        }
    }

    fn render_legend(&self, out: &mut String) {
        let legend_y = self.config.height as f64 - LEGEND_HEIGHT / 2.0;

        out.push_str(&format!(
            r#"<text x="10" y="{:.0}" font-size="14" font-family="sans-serif" font-weight="bold">Legend:</text>"#,
            legend_y
        ));

        for (i, severity) in Severity::ALL.iter().enumerate() {
            let count = self
                .segments
                .iter()
                .filter(|s| s.severity == *severity)
                .count();
            let x = 80 + i * 160;

            out.push_str(&format!(
                r#"<rect x="{}" y="{:.0}" width="15" height="15" fill="{}" rx="2"/>"#,
                x,
                legend_y - 12.0,
                severity_rgb(*severity)
            ));
            out.push_str(&format!(
                r#"<text x="{}" y="{:.0}" font-size="12" font-family="sans-serif">{} ({})</text>"#,
                x + 20,
                legend_y,
                severity.label(),
                count
            ));
        }
    }
}

/// Mapping from plot space to pixels
#[derive(Debug, Clone, Copy)]
struct Layout {
    max_x: f64,
    scale_x: f64,
    scale_y: f64,
    mid_y: f64,
}

impl Layout {
    fn fit(segments: &[Segment], width: f64, height: f64) -> Self {
        let max_x = segments.iter().map(|s| s.to.0).fold(0.0, f64::max);
        let max_abs_y = segments
            .iter()
            .map(|s| s.from.1.abs().max(s.to.1.abs()))
            .fold(0.0, f64::max);

        let plot_width = (width - 2.0 * MARGIN_X).max(1.0);
        let plot_height = (height - TITLE_HEIGHT - LEGEND_HEIGHT).max(2.0);

        // Degenerate traces still get a usable scale
        let max_x = if max_x > 0.0 { max_x } else { 1.0 };
        let max_abs_y = if max_abs_y > 0.0 { max_abs_y } else { 1.0 };

        Self {
            max_x,
            scale_x: plot_width / max_x,
            scale_y: (plot_height / 2.0) / max_abs_y,
            mid_y: TITLE_HEIGHT + plot_height / 2.0,
        }
    }

    fn to_px_x(&self, x: f64) -> f64 {
        MARGIN_X + x * self.scale_x
    }

    // SVG y grows downward
    fn to_px_y(&self, y: f64) -> f64 {
        self.mid_y - y * self.scale_y
    }
}

fn severity_rgb(severity: Severity) -> &'static str {
    match severity {
        Severity::Normal => "rgb(34, 139, 34)",    // Forest Green
        Severity::Elevated => "rgb(255, 140, 0)",  // Dark Orange
        Severity::Critical => "rgb(220, 20, 60)",  // Crimson
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f64, y: f64, severity: Severity) -> PlotPoint {
        PlotPoint {
            index: 0,
            raw_value: y / 100.0,
            x,
            y,
            severity,
        }
    }

    #[test]
    fn test_empty_trace_renders_zero_line() {
        let mut renderer = SvgTraceRenderer::default();
        renderer.begin();
        let svg = renderer.render();

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(ZERO_LINE_COLOR));
        assert!(!svg.contains("<polyline"));
    }

    #[test]
    fn test_segments_follow_pen() {
        let mut renderer = SvgTraceRenderer::default();
        renderer.begin();
        renderer.plot(&point(1.0, 10.0, Severity::Normal));
        renderer.plot(&point(2.0, -40.0, Severity::Elevated));

        assert_eq!(renderer.segment_count(), 2);
        assert_eq!(renderer.segments[0].from, (0.0, 0.0));
        assert_eq!(renderer.segments[1].from, (1.0, 10.0));
        assert_eq!(renderer.segments[1].to, (2.0, -40.0));
    }

    #[test]
    fn test_same_severity_runs_share_a_polyline() {
        let mut renderer = SvgTraceRenderer::default();
        renderer.begin();
        renderer.plot(&point(1.0, 1.0, Severity::Normal));
        renderer.plot(&point(2.0, 2.0, Severity::Normal));
        renderer.plot(&point(3.0, 70.0, Severity::Critical));
        renderer.plot(&point(4.0, 3.0, Severity::Normal));

        let svg = renderer.render();
        assert_eq!(svg.matches("<polyline").count(), 3);
        assert!(svg.contains(r#"class="red""#));
        assert!(svg.contains("Critical (1)"));
        assert!(svg.contains("Normal (3)"));
    }

    #[test]
    fn test_begin_clears_canvas() {
        let mut renderer = SvgTraceRenderer::default();
        renderer.plot(&point(1.0, 1.0, Severity::Normal));
        renderer.begin();
        assert_eq!(renderer.segment_count(), 0);
    }

    #[test]
    fn test_title_is_escaped() {
        let renderer = SvgTraceRenderer::new(SvgConfig::new().with_title("a < b & c"));
        let svg = renderer.render();
        assert!(svg.contains("a &lt; b &amp; c"));
    }

    #[test]
    fn test_layout_flips_y() {
        let segments = [Segment {
            from: (0.0, 0.0),
            to: (10.0, 50.0),
            severity: Severity::Elevated,
        }];
        let layout = Layout::fit(&segments, 800.0, 600.0);

        assert!(layout.to_px_y(50.0) < layout.to_px_y(0.0));
        assert!(layout.to_px_y(-50.0) > layout.to_px_y(0.0));
        assert_eq!(layout.to_px_x(0.0), MARGIN_X);
        assert_eq!(layout.to_px_x(10.0), 800.0 - MARGIN_X);
    }
}
