// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-adc-analyzer project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

use approx::assert_abs_diff_eq;
use rust_adc_analyzer::metrics::{self, AdcMetrics};
use rust_adc_analyzer::spectral::{locate_harmonics, power_spectrum, transform};
use rust_adc_analyzer::utility::adc_simulator::{coherent_frequency, full_scale_amplitude};
use rust_adc_analyzer::utility::{AdcSimulator, CaptureProfile};
use rust_adc_analyzer::AnalysisError;

const FS: f64 = 4000.0;
const N: usize = 1024;
const CYCLES: usize = 103;

fn power_of(profile: &CaptureProfile, seed: u32) -> Vec<f64> {
    let capture = AdcSimulator::new(seed).capture(profile, N);
    power_spectrum(&transform(&capture, N).unwrap())
}

fn tone(amplitude: f64) -> CaptureProfile {
    CaptureProfile {
        sampling_frequency: FS,
        signal_frequency: coherent_frequency(FS, N, CYCLES),
        amplitude,
        offset: 0.0,
        phase: 0.0,
        harmonics: Vec::new(),
        noise_rms: 0.0,
        bits: None,
    }
}

#[test]
fn test_thd_of_known_harmonic_content() {
    let mut profile = tone(1000.0);
    profile.harmonics = vec![1e-2, 1e-3];
    let power = power_of(&profile, 1);

    let harmonics = locate_harmonics(profile.signal_frequency, FS / N as f64, FS, 3).unwrap();
    assert_eq!(harmonics, vec![103, 206, 309]);

    let thd = metrics::thd(&power, &[CYCLES], &harmonics).unwrap();
    assert_abs_diff_eq!(thd, 10.0 * 1.01e-4f64.log10(), epsilon = 1e-6);

    // The order-2 harmonic is the largest spur
    let sfdr = metrics::sfdr(&power, &[CYCLES]).unwrap();
    assert_abs_diff_eq!(sfdr, 40.0, epsilon = 1e-6);
}

#[test]
fn test_ideal_quantizer_enob_matches_resolution() {
    let bits = 10;
    let mut profile = tone(full_scale_amplitude(bits));
    profile.bits = Some(bits);
    let power = power_of(&profile, 1);

    let harmonics = locate_harmonics(profile.signal_frequency, FS / N as f64, FS, 10).unwrap();
    let result = AdcMetrics::compute(&power, &[CYCLES], &harmonics).unwrap();

    assert!(
        (result.enob - f64::from(bits)).abs() < 0.5,
        "ENOB {} too far from {} bits",
        result.enob,
        bits
    );
    assert_abs_diff_eq!(result.enob, metrics::enob(result.sinad), epsilon = 1e-12);
}

#[test]
fn test_fewer_bits_lower_enob() {
    let harmonics = locate_harmonics(coherent_frequency(FS, N, CYCLES), FS / N as f64, FS, 10)
        .unwrap();
    let enob_for = |bits: u8| {
        let mut profile = tone(full_scale_amplitude(bits));
        profile.bits = Some(bits);
        AdcMetrics::compute(&power_of(&profile, 1), &[CYCLES], &harmonics)
            .unwrap()
            .enob
    };
    assert!(enob_for(8) < enob_for(12));
}

#[test]
fn test_noise_lowers_sinad() {
    let mut clean = tone(1500.0);
    clean.bits = Some(12);
    let mut noisy = clean.clone();
    noisy.noise_rms = 20.0;

    let clean_sinad = metrics::sinad(&power_of(&clean, 5), &[CYCLES]).unwrap();
    let noisy_sinad = metrics::sinad(&power_of(&noisy, 5), &[CYCLES]).unwrap();
    assert!(noisy_sinad < clean_sinad - 10.0);
}

#[test]
fn test_metrics_reject_undefined_ratios() {
    let power = vec![0.0; 512];
    assert!(matches!(
        AdcMetrics::compute(&power, &[CYCLES], &[CYCLES, 206]),
        Err(AnalysisError::DomainError { .. })
    ));

    // A pure tone has no harmonic power at all
    let mut pure = vec![0.0; 512];
    pure[CYCLES] = 1.0;
    assert!(matches!(
        metrics::thd(&pure, &[CYCLES], &[CYCLES, 206, 309]),
        Err(AnalysisError::DomainError { metric: "THD", .. })
    ));
}

#[test]
fn test_metrics_reject_out_of_range_indices() {
    let power = vec![1.0; 16];
    assert!(matches!(
        metrics::sinad(&power, &[16]),
        Err(AnalysisError::InvalidArgument { .. })
    ));
    assert!(matches!(
        metrics::snhr(&power, &[3], &[3, 40]),
        Err(AnalysisError::InvalidArgument { .. })
    ));
    assert!(matches!(
        metrics::sfdr(&power, &[]),
        Err(AnalysisError::InvalidArgument { .. })
    ));
}

#[test]
fn test_enob_is_affine() {
    for sinad in [-20.0, 0.0, 1.76, 49.988, 98.09] {
        assert_abs_diff_eq!(metrics::enob(sinad), (sinad - 1.76) / 6.02, epsilon = 1e-15);
    }
}
