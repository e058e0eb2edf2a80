// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-adc-analyzer project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

// Synthetic ADC capture generator
// Writes a quantized test tone with harmonics and noise as CSV or 16-bit WAV

use anyhow::{bail, Context, Result};
use clap::Parser;
use hound::{WavSpec, WavWriter};
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use rust_adc_analyzer::acquisition::SampleFormat;
use rust_adc_analyzer::utility::adc_simulator::{coherent_frequency, full_scale_amplitude};
use rust_adc_analyzer::utility::{AdcSimulator, CaptureProfile};

/// Synthetic ADC capture generator
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output file path (.csv or .wav)
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Output format, `auto` picks it from the extension
    #[arg(long, value_enum, default_value_t = SampleFormat::Auto)]
    format: SampleFormat,

    /// Sampling frequency in Hz
    #[arg(long, default_value_t = 4000.0)]
    fsam: f64,

    /// Number of samples in the capture
    #[arg(short = 'n', long, default_value_t = 1024)]
    length: usize,

    /// Number of tone periods in the capture (coherent sampling)
    #[arg(long, default_value_t = 103)]
    cycles: usize,

    /// Converter resolution in bits (2 to 16)
    #[arg(short, long, default_value_t = 12)]
    bits: u8,

    /// Tone amplitude relative to full scale (0.0 to 1.0)
    #[arg(short, long, default_value_t = 0.9)]
    amplitude: f64,

    /// Relative harmonic amplitudes, starting at order 2
    #[arg(long, value_delimiter = ',')]
    harmonics: Vec<f64>,

    /// RMS of the additive Gaussian noise in codes
    #[arg(long, default_value_t = 0.0)]
    noise: f64,

    /// Random seed, the system time is used when absent
    #[arg(long)]
    seed: Option<u32>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if !(2..=16).contains(&args.bits) {
        bail!("Resolution must be between 2 and 16 bits");
    }
    if args.amplitude <= 0.0 || args.amplitude > 1.0 {
        bail!("Amplitude must be between 0.0 and 1.0");
    }
    if args.length < 2 || args.cycles == 0 || args.cycles >= args.length / 2 {
        bail!("Cycle count must lie in 1..{}", args.length / 2);
    }

    let signal_frequency = coherent_frequency(args.fsam, args.length, args.cycles);
    let profile = CaptureProfile {
        sampling_frequency: args.fsam,
        signal_frequency,
        amplitude: args.amplitude * full_scale_amplitude(args.bits),
        offset: 0.0,
        phase: 0.0,
        harmonics: args.harmonics.clone(),
        noise_rms: args.noise,
        bits: Some(args.bits),
    };

    let seed = match args.seed {
        Some(seed) => seed,
        None => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.subsec_nanos())
            .unwrap_or(0),
    };
    let mut simulator = AdcSimulator::new(seed);
    let capture = simulator.capture(&profile, args.length);

    info!(
        "Generated {} samples of a {} Hz tone at {} Hz ({} bits, seed {})",
        capture.len(),
        signal_frequency,
        args.fsam,
        args.bits,
        seed
    );

    match args.format.resolve(&args.output) {
        SampleFormat::Wav => write_wav(&args, &capture)?,
        _ => write_csv(&args, &capture)?,
    }

    info!(
        "Analyze with: --fsig {} --fsam {} --dftlen {}",
        signal_frequency, args.fsam, args.length
    );
    Ok(())
}

fn write_csv(args: &Args, capture: &[f64]) -> Result<()> {
    let file = File::create(&args.output)
        .with_context(|| format!("Failed to create {:?}", args.output))?;
    let mut writer = BufWriter::new(file);
    for code in capture {
        writeln!(writer, "{}", code)?;
    }
    writer.flush()?;
    info!("Capture saved to {}", args.output.display());
    Ok(())
}

fn write_wav(args: &Args, capture: &[f64]) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        // WAV headers carry an integer rate
        sample_rate: args.fsam.round() as u32,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = WavWriter::create(&args.output, spec)
        .with_context(|| format!("Failed to create {:?}", args.output))?;
    for &code in capture {
        writer.write_sample(code as i16)?;
    }
    writer.finalize()?;
    info!("Capture saved to {}", args.output.display());
    Ok(())
}
