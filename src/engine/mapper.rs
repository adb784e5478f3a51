//! Sample to plot coordinate mapping.

use super::config::AnalysisConfig;
use crate::utils::error::MapError;

/// Map a sample ordinal and raw amplitude to plot coordinates
///
/// `x = ordinal * horizontal_step`, `y = raw_value * vertical_scale`.
///
/// # Errors
/// * `MapError::InvalidAmplitude` - `raw_value` is NaN or infinite, or the
///   scaled value overflows
pub fn map_to_point(
    ordinal: usize,
    raw_value: f64,
    config: &AnalysisConfig,
) -> Result<(f64, f64), MapError> {
    if !raw_value.is_finite() {
        return Err(MapError::InvalidAmplitude(raw_value));
    }

    let x = ordinal as f64 * config.horizontal_step;
    let y = raw_value * config.vertical_scale;
    if !y.is_finite() {
        return Err(MapError::InvalidAmplitude(y));
    }

    Ok((x, y))
}
