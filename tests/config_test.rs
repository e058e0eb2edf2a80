// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-adc-analyzer project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

use anyhow::Result;
use rust_adc_analyzer::acquisition::SampleFormat;
use rust_adc_analyzer::config::{AnalysisConfig, Config};
use std::fs;
use std::path::PathBuf;
use std::sync::Once;
use tempfile::tempdir;

static INIT: Once = Once::new();

// Setup logger for tests
fn setup() {
    INIT.call_once(|| {
        env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .is_test(true)
            .init();
    });
}

#[test]
fn test_config_load_and_save() -> Result<()> {
    setup();
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("config.yaml");

    let mut config = Config::default();
    config.analysis = AnalysisConfig {
        signal_frequency: 1000.0,
        sampling_frequency: 48000.0,
        dft_length: 4096,
        harmonics: 5,
        parallel: false,
    };
    config.input.file = Some("capture.wav".to_string());
    config.input.format = SampleFormat::Wav;
    config.save_to_file(&config_path)?;

    let loaded = Config::from_file(&config_path)?;
    assert_eq!(loaded, config);
    Ok(())
}

#[test]
fn test_missing_file_creates_default() -> Result<()> {
    setup();
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("non_existent.yaml");

    let config = Config::from_file(&config_path)?;
    assert!(config_path.exists());
    assert_eq!(config, Config::default());

    // The written default loads back
    assert_eq!(Config::from_file(&config_path)?, Config::default());
    Ok(())
}

#[test]
fn test_minimal_file_uses_defaults() -> Result<()> {
    setup();
    let config = Config::from_yaml_str(
        r#"
analysis:
  signal_frequency: 402.34375
  sampling_frequency: 4000
"#,
    )?;
    assert_eq!(config.analysis.dft_length, 1024);
    assert_eq!(config.analysis.harmonics, 10);
    assert!(config.analysis.parallel);
    assert_eq!(config.analysis.base_frequency(), 3.90625);
    assert_eq!(config.input.format, SampleFormat::Auto);
    assert!(config.output.db_scale);
    Ok(())
}

#[test]
fn test_schema_error_creates_sample_file() -> Result<()> {
    setup();
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("config.yaml");

    // Negative sampling frequency and an unknown key
    fs::write(
        &config_path,
        r#"
analysis:
  signal_frequency: 100
  sampling_frequency: -4000
  window: hann
"#,
    )?;

    let result = Config::from_file(&config_path);
    assert!(result.is_err(), "Config loading should have failed");

    let sample_path = config_path.with_extension("sample.yaml");
    assert!(sample_path.exists(), "Sample config file was not created");
    assert_eq!(Config::from_file(&sample_path)?, Config::default());
    Ok(())
}

#[test]
fn test_type_mismatch_is_rejected() {
    setup();
    let result = Config::from_yaml_str(
        r#"
analysis:
  signal_frequency: "fast"
  sampling_frequency: 4000
  dft_length: 1.5
"#,
    );
    assert!(result.is_err());
}

#[test]
fn test_infinite_frequency_is_rejected() {
    setup();
    let result = Config::from_yaml_str(
        r#"
analysis:
  signal_frequency: .inf
  sampling_frequency: 4000
"#,
    );
    assert!(result.is_err());
}

#[test]
fn test_apply_args_overrides_only_given_values() {
    let mut config = Config::default();
    config.apply_args(
        Some(PathBuf::from("capture.wav")),
        Some(SampleFormat::Wav),
        None,
        Some(8000.0),
        Some(2048),
        None,
        None,
        Some(PathBuf::from("report.json")),
    );

    assert_eq!(config.input.file.as_deref(), Some("capture.wav"));
    assert_eq!(config.input.format, SampleFormat::Wav);
    assert_eq!(config.analysis.signal_frequency, 402.34375);
    assert_eq!(config.analysis.sampling_frequency, 8000.0);
    assert_eq!(config.analysis.dft_length, 2048);
    assert_eq!(config.analysis.harmonics, 10);
    assert_eq!(config.output.spectrum_file, None);
    assert_eq!(config.output.report_file.as_deref(), Some("report.json"));
}

#[test]
fn test_config_schema_output() -> Result<()> {
    rust_adc_analyzer::config::output_config_schema()?;
    Ok(())
}
