// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-adc-analyzer project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Configuration utilities
//!
//! This module provides utility functions for working with configuration
//! settings, including validation and schema management.

use anyhow::{Context, Result};
use log::debug;

use super::Config;
use crate::error::AnalysisError;

/// JSON schema embedded at build time
pub const CONFIG_SCHEMA: &str = include_str!("../../resources/config.schema.json");

/// Output the embedded JSON schema to the console.
///
/// This function is called when the `--show-config-schema` flag is provided
/// on the command line.
///
/// # Example
///
/// ```bash
/// ./rust_adc_analyzer --show-config-schema > config_schema.json
/// ```
pub fn output_config_schema() -> Result<()> {
    let schema: serde_json::Value =
        serde_json::from_str(CONFIG_SCHEMA).context("Failed to parse JSON schema")?;

    let formatted_schema =
        serde_json::to_string_pretty(&schema).context("Failed to format JSON schema")?;

    println!("{}", formatted_schema);

    Ok(())
}

/// Validates the configuration against rules that the JSON schema does not express.
///
/// Failures are [`AnalysisError::InvalidArgument`] wrapped in `anyhow`, so the
/// CLI exits with the same code as when the analyzer rejects the parameters.
///
/// # Validation Rules
///
/// - **Sampling frequency**: strictly positive and finite
/// - **Signal frequency**: non-negative and finite, and below Nyquist so the
///   signal bin lies inside the one-sided spectrum
/// - **DFT length**: at least 2 points, otherwise the spectrum is empty
/// - **dB floor**: strictly positive, log10 of the floor must exist
pub fn validate_specific_rules(config: &Config) -> Result<()> {
    debug!("Performing additional validation checks");
    let analysis = &config.analysis;

    if analysis.dft_length < 2 {
        return Err(AnalysisError::invalid_argument(format!(
            "Invalid DFT length: {} (at least 2 points are needed)",
            analysis.dft_length
        ))
        .into());
    }

    analysis.validate()?;

    if !config.output.db_floor.is_finite() || config.output.db_floor <= 0.0 {
        return Err(
            AnalysisError::invalid_argument(format!("Invalid dB floor: {}", config.output.db_floor))
                .into(),
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_specific_rules(&Config::default()).is_ok());
    }

    #[test]
    fn test_rejects_bad_analysis_parameters() {
        let mut config = Config::default();
        config.analysis.sampling_frequency = 0.0;
        assert!(validate_specific_rules(&config).is_err());

        let mut config = Config::default();
        config.analysis.dft_length = 1;
        assert!(validate_specific_rules(&config).is_err());

        let mut config = Config::default();
        config.analysis.signal_frequency = -1.0;
        assert!(validate_specific_rules(&config).is_err());

        let mut config = Config::default();
        config.output.db_floor = 0.0;
        assert!(validate_specific_rules(&config).is_err());
    }

    #[test]
    fn test_tone_above_nyquist_is_rejected() {
        let mut config = Config::default();
        config.analysis.signal_frequency = 3000.0;
        let err = validate_specific_rules(&config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AnalysisError>(),
            Some(AnalysisError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_rule_failures_share_the_invalid_argument_exit_code() {
        let mut config = Config::default();
        config.analysis.sampling_frequency = 0.0;
        let from_rules = validate_specific_rules(&config).unwrap_err();
        let from_rules = from_rules.downcast_ref::<AnalysisError>().unwrap();
        assert_eq!(from_rules.exit_code(), 2);

        let mut config = Config::default();
        config.output.db_floor = -1.0;
        let err = validate_specific_rules(&config).unwrap_err();
        assert_eq!(err.downcast_ref::<AnalysisError>().map(AnalysisError::exit_code), Some(2));
    }

    #[test]
    fn test_embedded_schema_is_json() {
        let schema: serde_json::Value = serde_json::from_str(CONFIG_SCHEMA).unwrap();
        assert!(schema.get("properties").is_some());
    }
}
