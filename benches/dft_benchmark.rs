// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-adc-analyzer project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! DFT engine benchmarks
//!
//! Compares the sequential and the parallel direct DFT.
//!
//! Run with: cargo bench --bench dft_benchmark

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use std::time::Duration;

use rust_adc_analyzer::metrics::AdcMetrics;
use rust_adc_analyzer::spectral::{locate_harmonics, power_spectrum, ParallelDft, SequentialDft, SpectralTransform};
use rust_adc_analyzer::utility::adc_simulator::coherent_frequency;
use rust_adc_analyzer::utility::{AdcSimulator, CaptureProfile};

fn capture(length: usize) -> Vec<f64> {
    let profile = CaptureProfile {
        sampling_frequency: 4000.0,
        signal_frequency: coherent_frequency(4000.0, length, 103),
        amplitude: 1800.0,
        offset: 0.0,
        phase: 0.0,
        harmonics: vec![1e-3, 5e-4],
        noise_rms: 0.7,
        bits: Some(12),
    };
    AdcSimulator::new(1234).capture(&profile, length)
}

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("dft");
    group.measurement_time(Duration::from_secs(10));

    for length in [256usize, 1024, 4096] {
        let samples = capture(length);
        group.throughput(Throughput::Elements(length as u64));

        let sequential = SequentialDft::new();
        group.bench_with_input(
            BenchmarkId::new("sequential", length),
            &samples,
            |b, samples| b.iter(|| sequential.transform(black_box(samples), length)),
        );

        let parallel = ParallelDft::new();
        group.bench_with_input(
            BenchmarkId::new("parallel", length),
            &samples,
            |b, samples| b.iter(|| parallel.transform(black_box(samples), length)),
        );
    }

    group.finish();
}

fn bench_metrics(c: &mut Criterion) {
    let samples = capture(1024);
    let spectrum = ParallelDft::new().transform(&samples, 1024).unwrap_or_default();
    let power = power_spectrum(&spectrum);
    let harmonics =
        locate_harmonics(coherent_frequency(4000.0, 1024, 103), 3.90625, 4000.0, 10).unwrap_or_default();

    c.bench_function("metrics_1024", |b| {
        b.iter(|| AdcMetrics::compute(black_box(&power), &[103], black_box(&harmonics)))
    });
}

criterion_group!(benches, bench_transform, bench_metrics);
criterion_main!(benches);
