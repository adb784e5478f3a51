//! Output writers for analysis reports and trace drawings.
//!
//! This module handles writing data to disk in various formats:
//! - Text reports (line-oriented key/value)
//! - JSON reports
//! - SVG traces

pub mod json;
pub mod report;
pub mod svg;

use crate::utils::error::OutputError;
use log::debug;
use std::path::Path;

// Re-export main functions
pub use json::{read_report_json, write_report_json};
pub use report::{write_report, AnalysisReport};
pub use svg::write_svg;

/// Validate that an output path is writable
///
/// **Public** - shared by every writer, also handy for early CLI checks
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Check if we're trying to overwrite a directory
    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Create missing parent directories
///
/// **Private** - internal helper for the writers
fn create_parent_dirs(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path_empty() {
        assert!(validate_path(Path::new("")).is_err());
    }

    #[test]
    fn test_validate_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(validate_path(temp_dir.path()).is_err());
    }

    #[test]
    fn test_validate_path_new_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(validate_path(&temp_dir.path().join("report.txt")).is_ok());
    }
}
