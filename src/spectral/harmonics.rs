// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-adc-analyzer project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Aliased harmonic locator
//!
//! Harmonics of an undersampled tone rarely sit below Nyquist. Their energy
//! shows up mirrored inside the retained half-spectrum, and this module
//! computes where.
//!
//! For a signal bin `mSig` and a full transform length `N`, harmonic order `k`
//! has the raw index `m = (k · mSig) mod N`. Raw indices at or beyond `N/2`
//! fold back to `N - m`.
//!
//! ```
//! use rust_adc_analyzer::spectral::harmonics::locate_harmonics;
//!
//! let sampling = 4000.0;
//! let base = sampling / 1024.0;
//! let indices = locate_harmonics(402.34375, base, sampling, 10).unwrap();
//! assert_eq!(indices, vec![103, 206, 309, 412, 509, 406, 303, 200, 97, 6]);
//! ```

use crate::error::{AdcResult, AnalysisError};

/// Bin index of the signal tone: `⌊signal_freq / base_freq⌋`
///
/// ### Errors
///
/// Returns [`AnalysisError::InvalidArgument`] when `base_freq` is zero, negative
/// or not finite, or when `signal_freq` is negative or not finite.
pub fn signal_index(signal_freq: f64, base_freq: f64) -> AdcResult<usize> {
    validate_base_freq(base_freq)?;
    if !signal_freq.is_finite() || signal_freq < 0.0 {
        return Err(AnalysisError::invalid_argument(format!(
            "signal frequency must be a non-negative number, got {}",
            signal_freq
        )));
    }
    Ok((signal_freq / base_freq) as usize)
}

/// Locate the visible bin of the first `n_harmonics` harmonics
///
/// ### Parameters
///
/// * `signal_freq` - Frequency of the test tone in Hz
/// * `base_freq` - Bin spacing in Hz (`sampling_freq / N`)
/// * `sampling_freq` - Sampling frequency in Hz
/// * `n_harmonics` - Number of harmonic orders to locate, starting at order 1
///
/// ### Returns
///
/// One index per harmonic order, ordered by order. Order 1 is the signal bin
/// itself. Every index lies in `[0, ⌊N/2⌋)`; a harmonic folding exactly onto
/// Nyquist, which the one-sided spectrum does not hold, is reported at the top
/// retained bin `⌊N/2⌋ - 1`.
///
/// ### Errors
///
/// Returns [`AnalysisError::InvalidArgument`] for a zero or non-finite bin
/// spacing, a negative signal frequency, or a transform length
/// `⌊sampling_freq / base_freq⌋` below 2.
pub fn locate_harmonics(
    signal_freq: f64,
    base_freq: f64,
    sampling_freq: f64,
    n_harmonics: usize,
) -> AdcResult<Vec<usize>> {
    let m_sig = signal_index(signal_freq, base_freq)?;
    if !sampling_freq.is_finite() || sampling_freq <= 0.0 {
        return Err(AnalysisError::invalid_argument(format!(
            "sampling frequency must be positive, got {}",
            sampling_freq
        )));
    }

    let n = (sampling_freq / base_freq) as usize;
    if n < 2 {
        return Err(AnalysisError::invalid_argument(format!(
            "transform length {} leaves no retained bins (sampling {} Hz, bin spacing {} Hz)",
            n, sampling_freq, base_freq
        )));
    }
    let half = n / 2;

    let indices = (1..=n_harmonics)
        .map(|order| {
            // Reduce before multiplying so large orders cannot overflow
            let m = ((order % n) * (m_sig % n)) % n;
            let folded = if m < half { m } else { n - m };
            folded.min(half - 1)
        })
        .collect();

    Ok(indices)
}

/// Frequencies in Hz of the given bins, `index · base_freq`
pub fn bin_frequencies(indices: &[usize], base_freq: f64) -> Vec<f64> {
    indices.iter().map(|&i| i as f64 * base_freq).collect()
}

fn validate_base_freq(base_freq: f64) -> AdcResult<()> {
    if !base_freq.is_finite() || base_freq <= 0.0 {
        return Err(AnalysisError::invalid_argument(format!(
            "bin spacing must be a positive frequency, got {}",
            base_freq
        )));
    }
    Ok(())
}
