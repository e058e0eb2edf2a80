// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-adc-analyzer project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! ADC dynamic performance metrics
//!
//! Every metric works on the magnitude-squared spectrum produced by
//! [`crate::spectral::power_spectrum`] and on two index sets: the signal bins
//! and the harmonic bins, the latter ordered by harmonic order.
//!
//! Conventions shared by all metrics:
//!
//! - Bin 0 (DC) never counts as harmonic, noise or spur power.
//! - THD and SNHR skip the first harmonic index when summing harmonic power,
//!   since order 1 is the fundamental itself. SFDR and SINAD exclude bins by
//!   signal membership only.
//! - A ratio with a zero or negative side, or one whose dB value leaves the
//!   f64 range, is reported as [`AnalysisError::DomainError`] instead of a
//!   NaN or an infinity.
//!
//! | Metric | Definition |
//! |--------|------------|
//! | THD    | `20·log10(sqrt(Σ harmonic / Σ signal))` dB |
//! | SNHR   | `20·log10(sqrt(Σ signal / Σ non-harmonic))` dB |
//! | SFDR   | `20·log10(sqrt(Σ signal / max spur))` dB |
//! | SINAD  | `20·log10(sqrt(Σ signal / Σ non-signal))` dB |
//! | ENOB   | `(SINAD - 1.76) / 6.02` bits |

use serde::{Deserialize, Serialize};

use crate::error::{AdcResult, AnalysisError};

/// The five metrics of one analysis run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdcMetrics {
    /// Total harmonic distortion in dB
    pub thd: f64,
    /// Signal to non-harmonic ratio in dB
    pub snhr: f64,
    /// Spurious free dynamic range in dB
    pub sfdr: f64,
    /// Signal to noise and distortion in dB
    pub sinad: f64,
    /// Effective number of bits
    pub enob: f64,
}

impl AdcMetrics {
    /// Compute all five metrics from a magnitude-squared spectrum
    ///
    /// ### Errors
    ///
    /// Fails with the first error raised by one of the metrics, in the order
    /// THD, SNHR, SFDR, SINAD.
    pub fn compute(power: &[f64], signal: &[usize], harmonics: &[usize]) -> AdcResult<Self> {
        let thd = thd(power, signal, harmonics)?;
        let snhr = snhr(power, signal, harmonics)?;
        let sfdr = sfdr(power, signal)?;
        let sinad = sinad(power, signal)?;
        Ok(Self {
            thd,
            snhr,
            sfdr,
            sinad,
            enob: enob(sinad),
        })
    }
}

/// THD (Total Harmonic Distortion): power of the harmonics of order 2 and
/// above relative to the signal power
pub fn thd(power: &[f64], signal: &[usize], harmonics: &[usize]) -> AdcResult<f64> {
    let signal_power = signal_power(power, signal, "THD")?;
    check_indices(power, harmonics, "harmonic")?;

    let harmonic_power: f64 = harmonics.iter().skip(1).map(|&i| power[i]).sum();
    ratio_db("THD", (harmonic_power, "harmonic power"), (signal_power, "signal power"))
}

/// SNHR (Signal to Non Harmonic Ratio): signal power relative to every bin
/// that is neither DC nor a harmonic
pub fn snhr(power: &[f64], signal: &[usize], harmonics: &[usize]) -> AdcResult<f64> {
    let signal_power = signal_power(power, signal, "SNHR")?;
    check_indices(power, harmonics, "harmonic")?;

    let non_harmonic_power: f64 = power
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx > 0 && !harmonics.contains(idx))
        .map(|(_, value)| value)
        .sum();
    ratio_db(
        "SNHR",
        (signal_power, "signal power"),
        (non_harmonic_power, "non-harmonic power"),
    )
}

/// SFDR (Spurious Free Dynamic Range): signal power relative to the largest
/// bin outside the signal set
pub fn sfdr(power: &[f64], signal: &[usize]) -> AdcResult<f64> {
    let signal_power = signal_power(power, signal, "SFDR")?;

    let max_spur = power
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx > 0 && !signal.contains(idx))
        .map(|(_, &value)| value)
        .fold(0.0f64, f64::max);
    ratio_db(
        "SFDR",
        (signal_power, "signal power"),
        (max_spur, "largest spur power"),
    )
}

/// SINAD (Signal to Noise And Distortion): signal power relative to the total
/// power of all other bins
pub fn sinad(power: &[f64], signal: &[usize]) -> AdcResult<f64> {
    let signal_power = signal_power(power, signal, "SINAD")?;

    let non_signal_power: f64 = power
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx > 0 && !signal.contains(idx))
        .map(|(_, value)| value)
        .sum();
    ratio_db(
        "SINAD",
        (signal_power, "signal power"),
        (non_signal_power, "noise and distortion power"),
    )
}

/// ENOB (Effective Number Of Bits) of an ideal ADC with the same SINAD
pub fn enob(sinad: f64) -> f64 {
    (sinad - 1.76) / 6.02
}

fn signal_power(power: &[f64], signal: &[usize], metric: &'static str) -> AdcResult<f64> {
    if signal.is_empty() {
        return Err(AnalysisError::invalid_argument(format!(
            "{} needs at least one signal index",
            metric
        )));
    }
    check_indices(power, signal, "signal")?;
    Ok(signal.iter().map(|&i| power[i]).sum())
}

fn check_indices(power: &[f64], indices: &[usize], kind: &str) -> AdcResult<()> {
    match indices.iter().find(|&&i| i >= power.len()) {
        Some(&i) => Err(AnalysisError::invalid_argument(format!(
            "{} index {} is outside the {}-bin spectrum",
            kind,
            i,
            power.len()
        ))),
        None => Ok(()),
    }
}

/// `20·log10(sqrt(numerator / denominator))`, each side given with its label
fn ratio_db(
    metric: &'static str,
    (numerator, numerator_label): (f64, &str),
    (denominator, denominator_label): (f64, &str),
) -> AdcResult<f64> {
    for (value, label) in [(numerator, numerator_label), (denominator, denominator_label)] {
        if value.is_nan() || value <= 0.0 || value.is_infinite() {
            return Err(AnalysisError::domain(metric, format!("{} is {}", label, value)));
        }
    }

    let value = 20.0 * (numerator / denominator).sqrt().log10();
    if !value.is_finite() {
        return Err(AnalysisError::domain(
            metric,
            format!(
                "{} {} over {} {} is out of the f64 range",
                numerator_label, numerator, denominator_label, denominator
            ),
        ));
    }
    Ok(value)
}
