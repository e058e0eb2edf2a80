// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-adc-analyzer project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Analysis parameters configuration
//!
//! This module defines the parameters of one ADC characterization run:
//! the test tone, the sampling rate, the DFT length and the number of
//! harmonics taken into account.

use serde::{Deserialize, Serialize};

use crate::error::{AdcResult, AnalysisError};
use crate::spectral;

/// Configuration of the ADC characterization run.
///
/// # Example
///
/// ```
/// use rust_adc_analyzer::config::AnalysisConfig;
///
/// let analysis = AnalysisConfig {
///     signal_frequency: 402.34375,
///     sampling_frequency: 4000.0,
///     dft_length: 1024,
///     harmonics: 10,
///     parallel: true,
/// };
/// assert_eq!(analysis.base_frequency(), 3.90625);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Frequency of the injected test tone in Hz
    pub signal_frequency: f64,

    /// Sampling frequency of the capture in Hz
    pub sampling_frequency: f64,

    /// Number of DFT points; the spectrum holds half of them
    #[serde(default = "default_dft_length")]
    pub dft_length: u32,

    /// Number of harmonic orders located, order 1 being the fundamental
    #[serde(default = "default_harmonics")]
    pub harmonics: u16,

    /// Evaluate the DFT bins on the thread pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_dft_length() -> u32 {
    1024
}

fn default_harmonics() -> u16 {
    10
}

fn default_parallel() -> bool {
    true
}

impl AnalysisConfig {
    /// Bin spacing in Hz
    pub fn base_frequency(&self) -> f64 {
        self.sampling_frequency / f64::from(self.dft_length)
    }

    /// Check the parameters before any transform work
    ///
    /// ### Errors
    ///
    /// Returns [`AnalysisError::InvalidArgument`] for a zero DFT length, a
    /// non-positive sampling frequency, a negative signal frequency, or a
    /// signal bin `⌊signal_frequency / base_frequency⌋` outside the
    /// `⌊dft_length / 2⌋` retained bins (a tone at or above Nyquist).
    pub fn validate(&self) -> AdcResult<()> {
        if self.dft_length == 0 {
            return Err(AnalysisError::invalid_argument("DFT length must be positive"));
        }
        let base_frequency = self.base_frequency();
        // Frequencies and bin spacing
        spectral::locate_harmonics(
            self.signal_frequency,
            base_frequency,
            self.sampling_frequency,
            0,
        )?;

        let signal_index = spectral::signal_index(self.signal_frequency, base_frequency)?;
        let retained = self.dft_length as usize / 2;
        if signal_index >= retained {
            return Err(AnalysisError::invalid_argument(format!(
                "signal frequency {} Hz falls in bin {}, outside the {} retained bins (Nyquist is {} Hz)",
                self.signal_frequency,
                signal_index,
                retained,
                self.sampling_frequency / 2.0
            )));
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            signal_frequency: 402.34375,
            sampling_frequency: 4000.0,
            dft_length: default_dft_length(),
            harmonics: default_harmonics(),
            parallel: default_parallel(),
        }
    }
}
