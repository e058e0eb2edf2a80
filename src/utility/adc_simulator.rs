// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-adc-analyzer project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! # Synthetic ADC Capture Generator
//!
//! This module produces deterministic ADC captures for testing the analysis
//! chain without hardware:
//!
//! - a test tone with configurable amplitude, offset and phase
//! - optional harmonic distortion (orders 2, 3, ...)
//! - additive Gaussian noise (XORShift generator + Box-Muller transform)
//! - an ideal mid-tread quantizer of a chosen resolution, clipping to the code range
//!
//! Captures are expressed in output codes (LSB units), like the raw values
//! an ADC hands out.
//!
//! ## Examples
//!
//! ```rust
//! use rust_adc_analyzer::utility::adc_simulator::{coherent_frequency, AdcSimulator, CaptureProfile};
//!
//! let sampling = 4000.0;
//! let profile = CaptureProfile {
//!     signal_frequency: coherent_frequency(sampling, 1024, 103),
//!     bits: Some(10),
//!     ..CaptureProfile::full_scale(sampling, 10)
//! };
//!
//! let mut simulator = AdcSimulator::new(12345);
//! let capture = simulator.capture(&profile, 1024);
//! assert_eq!(capture.len(), 1024);
//! assert!(capture.iter().all(|&code| code >= -512.0 && code <= 511.0));
//! ```

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Description of the analog input and of the converter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureProfile {
    /// Sampling frequency in Hz
    pub sampling_frequency: f64,
    /// Test tone frequency in Hz
    pub signal_frequency: f64,
    /// Tone amplitude in codes
    pub amplitude: f64,
    /// DC offset in codes
    #[serde(default)]
    pub offset: f64,
    /// Tone phase in radians
    #[serde(default)]
    pub phase: f64,
    /// Relative amplitudes of the harmonics, starting at order 2
    #[serde(default)]
    pub harmonics: Vec<f64>,
    /// RMS of the additive Gaussian noise in codes
    #[serde(default)]
    pub noise_rms: f64,
    /// Converter resolution; `None` leaves the capture unquantized
    #[serde(default)]
    pub bits: Option<u8>,
}

impl CaptureProfile {
    /// Clean tone spanning the whole code range of a `bits`-bit converter
    pub fn full_scale(sampling_frequency: f64, bits: u8) -> Self {
        Self {
            sampling_frequency,
            signal_frequency: sampling_frequency / 10.0,
            amplitude: full_scale_amplitude(bits),
            offset: 0.0,
            phase: 0.0,
            harmonics: Vec::new(),
            noise_rms: 0.0,
            bits: Some(bits),
        }
    }
}

/// Random number generator and capture synthesizer
///
/// The same seed always yields the same capture.
pub struct AdcSimulator {
    /// Internal state of the XORShift random number generator.
    rng_state: u32,
}

impl AdcSimulator {
    /// Creates a simulator with a given seed (a zero seed is replaced, XORShift would stall on it)
    pub fn new(seed: u32) -> Self {
        let rng_state = if seed == 0 { 0x9E37_79B9 } else { seed };
        Self { rng_state }
    }

    /// Generates a random floating-point number between -1.0 and 1.0.
    pub fn random_float(&mut self) -> f64 {
        self.rng_state ^= self.rng_state << 13;
        self.rng_state ^= self.rng_state >> 17;
        self.rng_state ^= self.rng_state << 5;

        (self.rng_state as f64 / u32::MAX as f64) * 2.0 - 1.0
    }

    /// Generates a value from a standard Gaussian distribution (Box-Muller transform)
    pub fn random_gaussian(&mut self) -> f64 {
        let u1 = (self.random_float() + 1.0) / 2.0;
        let u2 = (self.random_float() + 1.0) / 2.0;

        // Avoid ln(0)
        let u1 = u1.max(1e-12);

        (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
    }

    /// Synthesize `num_samples` output codes following `profile`
    pub fn capture(&mut self, profile: &CaptureProfile, num_samples: usize) -> Vec<f64> {
        let omega = 2.0 * PI * profile.signal_frequency / profile.sampling_frequency;

        (0..num_samples)
            .map(|n| {
                let angle = omega * n as f64 + profile.phase;
                let mut value = profile.offset + profile.amplitude * angle.sin();

                for (i, &relative) in profile.harmonics.iter().enumerate() {
                    let order = (i + 2) as f64;
                    value += relative * profile.amplitude * (order * angle).sin();
                }

                if profile.noise_rms > 0.0 {
                    value += profile.noise_rms * self.random_gaussian();
                }

                match profile.bits {
                    Some(bits) => quantize(value, bits),
                    None => value,
                }
            })
            .collect()
    }
}

/// Largest tone amplitude that stays inside the code range of a `bits`-bit converter
pub fn full_scale_amplitude(bits: u8) -> f64 {
    2f64.powi(i32::from(bits) - 1) - 0.5
}

/// Ideal mid-tread quantizer: round to the nearest code and clip to
/// `[-2^(bits-1), 2^(bits-1) - 1]`
pub fn quantize(value: f64, bits: u8) -> f64 {
    let top = 2f64.powi(i32::from(bits) - 1);
    value.round().clamp(-top, top - 1.0)
}

/// Frequency putting exactly `cycles` periods in a `length`-point record
///
/// Coherent sampling keeps all the tone energy in a single bin; an odd or
/// prime `cycles` count spreads the quantization error over the whole spectrum.
pub fn coherent_frequency(sampling_frequency: f64, length: usize, cycles: usize) -> f64 {
    sampling_frequency * cycles as f64 / length as f64
}
