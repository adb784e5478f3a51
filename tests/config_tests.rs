use seismo_trace::commands::{resolve_settings, AnalyzeArgs};
use seismo_trace::utils::config::{load_config, OptimizationProfile};
use seismo_trace::utils::error::ConfigError;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_config() {
    let file = config_file(
        r#"
[analysis]
stride = 3
horizontal_step = 0.25
vertical_scale = 1e9
value_offset = 16

[analysis.thresholds]
elevated = 10.0
critical = 20.0

[playback]
profile = "animation"
frame_delay_ms = 5
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.analysis.stride, Some(3));
    assert_eq!(config.analysis.vertical_scale, Some(1e9));
    assert_eq!(config.analysis.thresholds.critical, Some(20.0));
    assert_eq!(config.playback.profile, Some(OptimizationProfile::Animation));

    let settings = resolve_settings(&AnalyzeArgs::default(), &config);
    assert_eq!(settings.config.stride, 3);
    assert_eq!(settings.config.horizontal_step, 0.25);
    assert_eq!(settings.value_offset, 16);
    assert_eq!(settings.cadence.points_per_frame, 50);
    assert_eq!(settings.cadence.frame_delay, Duration::from_millis(5));
    assert!(settings.config.validate().is_ok());
}

#[test]
fn test_load_partial_config() {
    let file = config_file("[analysis.thresholds]\ncritical = 80.0\n");

    let config = load_config(file.path()).unwrap();
    let settings = resolve_settings(&AnalyzeArgs::default(), &config);

    assert_eq!(settings.config.stride, 1);
    assert_eq!(settings.config.thresholds.elevated, 35.0);
    assert_eq!(settings.config.thresholds.critical, 80.0);
    assert_eq!(settings.profile, OptimizationProfile::Speed);
}

#[test]
fn test_invalid_toml() {
    let file = config_file("[analysis\nstride = ");
    let result = load_config(file.path());
    assert!(matches!(result, Err(ConfigError::ParseFailed(_))));
}

#[test]
fn test_unknown_profile() {
    let file = config_file("[playback]\nprofile = \"turbo\"\n");
    assert!(load_config(file.path()).is_err());
}

#[test]
fn test_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_config(dir.path().join("nope.toml"));
    assert!(matches!(result, Err(ConfigError::IoError(_))));
}
