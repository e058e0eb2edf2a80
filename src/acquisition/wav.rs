// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-adc-analyzer project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! WAV capture reader
//!
//! Integer samples are kept as raw output codes (no normalisation), float
//! samples are widened to `f64`. Only the first channel of a multi-channel
//! file is used.

use anyhow::{Context, Result};
use hound::{SampleFormat as WavSampleFormat, WavReader};
use log::{info, warn};
use std::path::{Path, PathBuf};

use super::SampleSource;

/// Sample source reading a WAV capture
pub struct WavSampleSource {
    path: PathBuf,
}

impl WavSampleSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl SampleSource for WavSampleSource {
    fn read_samples(&mut self) -> Result<Vec<f64>> {
        info!("Reading WAV data from {}", self.path.display());
        let mut reader = WavReader::open(&self.path)
            .with_context(|| format!("Failed to open WAV file {:?}", self.path))?;

        let spec = reader.spec();
        let channels = spec.channels.max(1) as usize;
        if channels > 1 {
            warn!(
                "{} has {} channels, only the first one is analyzed",
                self.path.display(),
                channels
            );
        }

        let interleaved: Vec<f64> = match spec.sample_format {
            WavSampleFormat::Int => reader
                .samples::<i32>()
                .map(|s| s.map(f64::from))
                .collect::<Result<Vec<f64>, _>>()
                .with_context(|| format!("Failed to read samples from {:?}", self.path))?,
            WavSampleFormat::Float => reader
                .samples::<f32>()
                .map(|s| s.map(f64::from))
                .collect::<Result<Vec<f64>, _>>()
                .with_context(|| format!("Failed to read samples from {:?}", self.path))?,
        };

        let samples: Vec<f64> = interleaved.into_iter().step_by(channels).collect();
        info!(
            "Read {} points ({} Hz, {} bits)",
            samples.len(),
            spec.sample_rate,
            spec.bits_per_sample
        );
        Ok(samples)
    }

    fn describe(&self) -> String {
        format!("WAV file {}", self.path.display())
    }
}
