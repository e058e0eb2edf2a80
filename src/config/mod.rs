// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-adc-analyzer project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Configuration management for the ADC analyzer
//!
//! This module provides functionality for loading, validating, and applying
//! configuration settings. The configuration is backed by a YAML file and
//! validated against a JSON schema before it is deserialized.
//!
//! ## Configuration Structure
//!
//! - `analysis`: test tone, sampling frequency, DFT length, harmonic count
//! - `input`: capture file and its format
//! - `output`: spectrum and report files, dB scaling of the spectrum
//!
//! ## Usage
//!
//! ```no_run
//! use rust_adc_analyzer::config::Config;
//! use std::path::Path;
//!
//! // Load config from file, creates a default if not found
//! let mut config = Config::from_file(Path::new("adc.yaml")).unwrap();
//!
//! // Apply command line overrides if needed
//! config.apply_args(
//!     Some("capture.csv".into()), // Input file
//!     None,                       // Input format
//!     Some(402.34375),            // Signal frequency
//!     Some(4000.0),               // Sampling frequency
//!     Some(1024),                 // DFT length
//!     None,                       // Harmonics
//!     None,                       // Spectrum file
//!     None,                       // Report file
//! );
//!
//! println!("Bin spacing: {} Hz", config.analysis.base_frequency());
//! ```

pub mod analysis;
pub mod input;
pub mod output;
pub mod utils;

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::acquisition::SampleFormat;

// Re-export all types for public API
pub use analysis::AnalysisConfig;
pub use input::InputConfig;
pub use output::OutputConfig;
pub use utils::{output_config_schema, validate_specific_rules};

/// Root configuration structure of the ADC analyzer.
///
/// Each section uses default values when not explicitly specified in the
/// configuration file, so a minimal file only needs the test tone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Parameters of the characterization run.
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Capture file settings.
    #[serde(default)]
    pub input: InputConfig,

    /// Spectrum and report outputs.
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Helper method to create a sample config file when validation fails
    fn create_sample_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        let sample_path = path.with_extension("sample.yaml");
        debug!("Original path: {:?}, Sample path: {:?}", path, sample_path);

        // Create parent directories if they don't exist
        if let Some(parent) = sample_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                debug!("Creating parent directory: {:?}", parent);
                fs::create_dir_all(parent).with_context(|| {
                    format!(
                        "Failed to create parent directory for sample config at {:?}",
                        parent
                    )
                })?;
            }
        }

        Self::default()
            .save_to_file(&sample_path)
            .with_context(|| format!("Failed to save sample config to {:?}", sample_path))?;

        error!(
            "Sample configuration file created at {:?}\nPlease edit and rename it",
            sample_path
        );
        Ok(())
    }

    /// Load configuration from a file
    ///
    /// A missing file is created with the default configuration. A file that
    /// fails the schema, the deserialization or the additional rules makes a
    /// `<name>.sample.yaml` appear next to it and the load fails.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(
                "Configuration file not found at {:?}, creating default",
                path
            );
            let default_config = Self::default();
            default_config.save_to_file(path)?;
            return Ok(default_config);
        }

        debug!("Loading configuration from {:?}", path);
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file at {:?}", path))?;

        Self::from_yaml_str(&contents).map_err(|err| {
            if let Err(sample_err) = Self::create_sample_config(path) {
                error!("Failed to create sample config: {}", sample_err);
            }
            err.context(format!("Invalid configuration in {}", path.display()))
        })
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        // First step: convert YAML to a generic Value
        let yaml_value: serde_yml::Value =
            serde_yml::from_str(contents).context("Failed to parse YAML configuration")?;

        // Convert to JSON Value for validation
        let json_value = serde_json::to_value(&yaml_value)
            .context("Failed to convert YAML to JSON for validation")?;

        let schema: serde_json::Value = serde_json::from_str(utils::CONFIG_SCHEMA)
            .context("Failed to parse JSON schema")?;
        let validator = jsonschema::draft202012::options()
            .should_validate_formats(true)
            .build(&schema)
            .map_err(|e| anyhow::anyhow!("Invalid configuration schema: {}", e))?;

        debug!("Validating configuration against schema");
        if let Err(error) = validator.validate(&json_value) {
            error!("Configuration validation error before deserialization");
            anyhow::bail!("Configuration validation failed: {}", error);
        }

        debug!("Schema validation passed, deserializing into Config structure");
        let config: Config = serde_yml::from_str(contents).map_err(|err| {
            error!("Configuration deserialization error: {}", err);
            anyhow::anyhow!("Failed to deserialize configuration: {}", err)
        })?;

        if let Err(err) = validate_specific_rules(&config) {
            error!("Configuration specific validation error: {}", err);
            return Err(err);
        }

        Ok(config)
    }

    /// Save the configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml =
            serde_yml::to_string(self).context("Failed to serialize configuration to YAML")?;

        let mut file = File::create(path.as_ref())
            .with_context(|| format!("Failed to create config file at {:?}", path.as_ref()))?;

        file.write_all(yaml.as_bytes())
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Apply command line arguments to override configuration values.
    ///
    /// Only the arguments that are provided override the loaded values.
    ///
    /// # Parameters
    ///
    /// * `input_file` - Capture file to analyze
    /// * `input_format` - Capture format
    /// * `signal_frequency` - Test tone frequency in Hz
    /// * `sampling_frequency` - Sampling frequency in Hz
    /// * `dft_length` - Number of DFT points
    /// * `harmonics` - Number of harmonic orders
    /// * `spectrum_file` - CSV output of the spectrum
    /// * `report_file` - JSON output of the report
    #[allow(clippy::too_many_arguments)]
    pub fn apply_args(
        &mut self,
        input_file: Option<PathBuf>,
        input_format: Option<SampleFormat>,
        signal_frequency: Option<f64>,
        sampling_frequency: Option<f64>,
        dft_length: Option<u32>,
        harmonics: Option<u16>,
        spectrum_file: Option<PathBuf>,
        report_file: Option<PathBuf>,
    ) {
        if let Some(file) = input_file {
            debug!("Overriding input file from command line: {:?}", file);
            self.input.file = Some(file.to_string_lossy().to_string());
        }
        if let Some(format) = input_format {
            debug!("Overriding input format from command line: {:?}", format);
            self.input.format = format;
        }
        if let Some(freq) = signal_frequency {
            debug!("Overriding signal frequency from command line: {}", freq);
            self.analysis.signal_frequency = freq;
        }
        if let Some(freq) = sampling_frequency {
            debug!("Overriding sampling frequency from command line: {}", freq);
            self.analysis.sampling_frequency = freq;
        }
        if let Some(length) = dft_length {
            debug!("Overriding DFT length from command line: {}", length);
            self.analysis.dft_length = length;
        }
        if let Some(count) = harmonics {
            debug!("Overriding harmonic count from command line: {}", count);
            self.analysis.harmonics = count;
        }
        if let Some(file) = spectrum_file {
            debug!("Overriding spectrum file from command line: {:?}", file);
            self.output.spectrum_file = Some(file.to_string_lossy().to_string());
        }
        if let Some(file) = report_file {
            debug!("Overriding report file from command line: {:?}", file);
            self.output.report_file = Some(file.to_string_lossy().to_string());
        }
    }
}
