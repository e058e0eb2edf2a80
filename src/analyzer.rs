// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-adc-analyzer project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! ADC characterization run
//!
//! [`AdcAnalyzer`] chains the numeric core for one capture:
//!
//! 1. Transform the samples into the one-sided spectrum
//! 2. Locate the signal bin and the aliased harmonic bins from the frequency parameters
//! 3. Evaluate THD, SNHR, SFDR, SINAD and ENOB on the magnitude-squared spectrum
//!
//! The result is an [`AnalysisReport`] that the report module prints or saves.

use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::{debug, info};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::metrics::AdcMetrics;
use crate::spectral::{self, SpectralTransform};

/// Result of one characterization run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Parameters the run was made with
    pub parameters: AnalysisConfig,
    /// Bin spacing in Hz
    pub base_frequency: f64,
    /// Number of samples in the capture
    pub sample_count: usize,
    /// Signal bin set
    pub signal_indices: Vec<usize>,
    /// Visible bin of each harmonic order, order 1 first
    pub harmonic_indices: Vec<usize>,
    /// Frequencies of the aliased harmonic bins in Hz
    pub harmonic_frequencies: Vec<f64>,
    /// Computed metrics
    pub metrics: AdcMetrics,
    /// Wall-clock time spent in the transform, in milliseconds
    pub transform_duration_ms: f64,
    /// Timestamp of the analysis
    pub timestamp: DateTime<Utc>,
    /// One-sided spectrum, `⌊N/2⌋` bins
    #[serde(skip)]
    pub spectrum: Vec<Complex64>,
}

/// Runs the transform, the harmonic locator and the metric engine on captures
pub struct AdcAnalyzer {
    parameters: AnalysisConfig,
    engine: Box<dyn SpectralTransform>,
}

impl AdcAnalyzer {
    /// Create an analyzer, rejecting malformed parameters before any computation
    pub fn new(parameters: AnalysisConfig) -> Result<Self> {
        parameters
            .validate()
            .context("Invalid analysis parameters")?;

        let engine = spectral::create_spectral_transform(parameters.parallel);
        Ok(Self { parameters, engine })
    }

    pub fn parameters(&self) -> &AnalysisConfig {
        &self.parameters
    }

    /// Characterize one capture
    ///
    /// ### Errors
    ///
    /// Fails when a metric is undefined for this capture (for instance an
    /// all-zero noise floor), with the underlying [`crate::error::AnalysisError`] attached.
    pub fn analyze(&self, samples: &[f64]) -> Result<AnalysisReport> {
        let p = &self.parameters;
        let base_frequency = p.base_frequency();
        let dft_length = p.dft_length as usize;

        if samples.len() != dft_length {
            debug!(
                "Capture holds {} samples for a {}-point DFT",
                samples.len(),
                dft_length
            );
        }

        let started = Instant::now();
        let spectrum = self.engine.transform(samples, dft_length)?;
        let elapsed = started.elapsed();
        info!(
            "Calculated DFT in {:?} ({} engine, {} bins)",
            elapsed,
            self.engine.name(),
            spectrum.len()
        );

        let signal_index = spectral::signal_index(p.signal_frequency, base_frequency)?;
        let harmonic_indices = spectral::locate_harmonics(
            p.signal_frequency,
            base_frequency,
            p.sampling_frequency,
            p.harmonics as usize,
        )?;
        let harmonic_frequencies = spectral::bin_frequencies(&harmonic_indices, base_frequency);
        info!("Signal index: {}", signal_index);
        info!("Aliased harmonics indices {:?}", harmonic_indices);
        debug!("Aliased harmonics freqs {:.3?}", harmonic_frequencies);

        let signal_indices = vec![signal_index];
        let power = spectral::power_spectrum(&spectrum);
        let metrics = AdcMetrics::compute(&power, &signal_indices, &harmonic_indices)
            .context("Failed to compute ADC metrics")?;

        Ok(AnalysisReport {
            parameters: p.clone(),
            base_frequency,
            sample_count: samples.len(),
            signal_indices,
            harmonic_indices,
            harmonic_frequencies,
            metrics,
            transform_duration_ms: elapsed.as_secs_f64() * 1000.0,
            timestamp: Utc::now(),
            spectrum,
        })
    }
}
