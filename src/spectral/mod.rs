// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-adc-analyzer project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).
//!
//! # Spectral Analysis Module
//!
//! This module turns a captured ADC sample sequence into its one-sided
//! frequency-domain representation and locates the bins that matter for
//! ADC characterization.
//!
//! ## Features
//!
//! - Direct DFT evaluation, one independent task per output bin
//! - Trait-based API so the parallel and sequential engines are interchangeable
//! - Magnitude-squared spectrum for the metric engine
//! - Aliased harmonic locator for undersampled test tones
//!
//! ## Architecture
//!
//! - `SpectralTransform` trait defines the interface of the DFT engines
//! - `ParallelDft` fans the bins out on the rayon pool, `SequentialDft` runs them in order
//! - Factory function `create_spectral_transform()` picks an engine
//! - `harmonics::locate_harmonics()` works on frequency parameters only and
//!   never looks at the spectrum
//!
//! ## Usage
//!
//! ```
//! use rust_adc_analyzer::spectral;
//!
//! let engine = spectral::create_spectral_transform(true);
//! let samples = vec![0.0f64; 1024];
//!
//! let spectrum = engine.transform(&samples, 1024).unwrap();
//! println!("Number of frequency bins: {}", spectrum.len());
//! ```

pub mod dft;
pub mod harmonics;

pub use dft::{dft_bin, power_spectrum, transform, ParallelDft, SequentialDft, SpectralTransform};
pub use harmonics::{bin_frequencies, locate_harmonics, signal_index};

/// Create a DFT engine
///
/// ### Parameters
///
/// * `parallel` - `true` for the rayon-backed engine, `false` to evaluate
///   the bins on the calling thread
///
/// ### Returns
///
/// A boxed trait object implementing the `SpectralTransform` trait
pub fn create_spectral_transform(parallel: bool) -> Box<dyn SpectralTransform> {
    if parallel {
        Box::new(ParallelDft::new())
    } else {
        Box::new(SequentialDft::new())
    }
}
