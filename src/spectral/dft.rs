// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-adc-analyzer project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Direct Discrete Fourier Transform for ADC characterization
//!
//! This module evaluates the one-sided spectrum of a real sample sequence with
//! the direct (non-fast) DFT summation:
//!
//! ```text
//! X[k] = Σ x[n] · e^(-j·2π·k·n/N)    for n = 0 .. N_s-1
//! ```
//!
//! Only the non-negative half of the spectrum is materialised, so the output
//! always holds `⌊N/2⌋` bins. `N` is the configured transform length; it drives
//! the bin count and the phase normalisation but the summation runs over every
//! supplied sample, whatever their number.
//!
//! Every bin depends only on the shared, read-only sample slice, so
//! [`ParallelDft`] evaluates one independent task per bin on the rayon thread
//! pool and gathers `(k, X[k])` pairs through a channel scoped to the call.
//! [`SequentialDft`] computes the same bins in order on the calling thread.
//!
//! # Example
//!
//! ```
//! use rust_adc_analyzer::spectral::dft::{transform, power_spectrum};
//!
//! // 4 cycles of a cosine over 16 samples
//! let samples: Vec<f64> = (0..16)
//!     .map(|n| (2.0 * std::f64::consts::PI * 4.0 * n as f64 / 16.0).cos())
//!     .collect();
//!
//! let spectrum = transform(&samples, 16).unwrap();
//! assert_eq!(spectrum.len(), 8);
//!
//! let power = power_spectrum(&spectrum);
//! assert!((power[4] - 64.0).abs() < 1e-9);
//! ```

use std::sync::mpsc;

use num_complex::Complex64;

use crate::error::{AdcResult, AnalysisError};

/// One evaluated bin: its index and its complex value
pub type BinValue = (usize, Complex64);

/// Trait for the engines able to evaluate the one-sided spectrum
///
/// All implementing types must be thread-safe (`Send + Sync`) so a single
/// engine can be shared between concurrent analysis runs.
pub trait SpectralTransform: Send + Sync {
    /// Compute the one-sided spectrum of `samples` for a transform of `length` points
    ///
    /// ### Errors
    ///
    /// Returns [`AnalysisError::InvalidArgument`] when `length` is zero.
    fn transform(&self, samples: &[f64], length: usize) -> AdcResult<Vec<Complex64>>;

    /// Short name of the engine, used in logs and benchmarks
    fn name(&self) -> &'static str;
}

/// DFT engine evaluating every bin as an independent task on the rayon pool
#[derive(Debug, Default, Clone, Copy)]
pub struct ParallelDft;

/// DFT engine evaluating the bins in order on the calling thread
#[derive(Debug, Default, Clone, Copy)]
pub struct SequentialDft;

impl ParallelDft {
    pub fn new() -> Self {
        Self
    }
}

impl SequentialDft {
    pub fn new() -> Self {
        Self
    }
}

impl SpectralTransform for ParallelDft {
    fn transform(&self, samples: &[f64], length: usize) -> AdcResult<Vec<Complex64>> {
        validate_length(length)?;

        let mut spectrum = vec![Complex64::new(0.0, 0.0); length / 2];
        let task_count = dispatched_bins(length);

        if task_count <= 1 {
            for k in 0..task_count {
                spectrum[k] = dft_bin(samples, k, length);
            }
            return Ok(spectrum);
        }

        // Result collection point, owned by this invocation only
        let (sender, receiver) = mpsc::channel::<BinValue>();

        rayon::scope(|scope| {
            for k in 0..task_count {
                let sender = sender.clone();
                scope.spawn(move |_| {
                    // The receiver outlives the scope, so the send cannot fail
                    let _ = sender.send((k, dft_bin(samples, k, length)));
                });
            }
        });
        drop(sender);

        // Every task has joined; each result carries its own index
        for (k, value) in receiver.iter() {
            spectrum[k] = value;
        }

        Ok(spectrum)
    }

    fn name(&self) -> &'static str {
        "parallel"
    }
}

impl SpectralTransform for SequentialDft {
    fn transform(&self, samples: &[f64], length: usize) -> AdcResult<Vec<Complex64>> {
        validate_length(length)?;

        let mut spectrum = vec![Complex64::new(0.0, 0.0); length / 2];
        for k in 0..dispatched_bins(length) {
            spectrum[k] = dft_bin(samples, k, length);
        }
        Ok(spectrum)
    }

    fn name(&self) -> &'static str {
        "sequential"
    }
}

/// Compute the one-sided spectrum of `samples` with the parallel engine
///
/// ### Parameters
///
/// * `samples` - The captured sample sequence (any length, possibly empty)
/// * `length` - The transform length `N`; the result holds `⌊N/2⌋` bins
///
/// ### Errors
///
/// Returns [`AnalysisError::InvalidArgument`] when `length` is zero. A length
/// of 1 is valid and yields an empty spectrum.
pub fn transform(samples: &[f64], length: usize) -> AdcResult<Vec<Complex64>> {
    ParallelDft::new().transform(samples, length)
}

/// Evaluate a single DFT bin over the whole sample sequence
///
/// `length` only normalises the phase; every sample of `samples` contributes.
pub fn dft_bin(samples: &[f64], k: usize, length: usize) -> Complex64 {
    let n_points = length as f64;
    samples
        .iter()
        .enumerate()
        .fold(Complex64::new(0.0, 0.0), |acc, (n, &x)| {
            let phase = -2.0 * std::f64::consts::PI * (k * n) as f64 / n_points;
            acc + Complex64::new(x, 0.0) * Complex64::from_polar(1.0, phase)
        })
}

/// Convert a complex spectrum into its magnitude-squared spectrum
pub fn power_spectrum(spectrum: &[Complex64]) -> Vec<f64> {
    spectrum
        .iter()
        .map(|value| {
            let magnitude = value.norm();
            magnitude * magnitude
        })
        .collect()
}

/// Number of bins handed out as tasks: indices `[0, ⌊N/2⌋ - 1)`
///
/// The top retained bin is never dispatched and stays at zero.
fn dispatched_bins(length: usize) -> usize {
    (length / 2).saturating_sub(1)
}

fn validate_length(length: usize) -> AdcResult<()> {
    if length == 0 {
        return Err(AnalysisError::invalid_argument(
            "transform length must be a positive number of points",
        ));
    }
    Ok(())
}
