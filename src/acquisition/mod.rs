// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-adc-analyzer project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Sample acquisition module
//!
//! This module loads captured ADC sample sequences from CSV or WAV files.
//! Every source yields the whole capture at once as an ordered `Vec<f64>`.

pub mod csv;
pub mod wav;

use anyhow::Result;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub use self::csv::CsvSampleSource;
pub use self::wav::WavSampleSource;

/// Represents a provider of captured samples
pub trait SampleSource: Send {
    /// Read the complete capture as an ordered sample sequence
    fn read_samples(&mut self) -> Result<Vec<f64>>;

    /// Human readable description of the source, for logs
    fn describe(&self) -> String;
}

/// On-disk format of a capture
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SampleFormat {
    /// Pick the format from the file extension (`.wav` → WAV, anything else → CSV)
    #[default]
    Auto,
    /// One sample per record, comma separated fields
    Csv,
    /// PCM WAV file, first channel only
    Wav,
}

impl SampleFormat {
    /// Resolve `Auto` against the file extension
    pub fn resolve<P: AsRef<Path>>(self, path: P) -> SampleFormat {
        match self {
            SampleFormat::Auto => {
                let is_wav = path
                    .as_ref()
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| ext.eq_ignore_ascii_case("wav"))
                    .unwrap_or(false);
                if is_wav {
                    SampleFormat::Wav
                } else {
                    SampleFormat::Csv
                }
            }
            other => other,
        }
    }
}

/// Get a sample source for the given capture file
///
/// ### Parameters
///
/// * `path` - The capture file
/// * `format` - Capture format, `Auto` to decide from the extension
/// * `column` - 0-based CSV column holding the samples (ignored for WAV)
pub fn get_sample_source<P: AsRef<Path>>(
    path: P,
    format: SampleFormat,
    column: usize,
) -> Result<Box<dyn SampleSource>> {
    let path = path.as_ref();
    let resolved = format.resolve(path);
    debug!("Using {:?} sample source for {}", resolved, path.display());

    match resolved {
        SampleFormat::Wav => Ok(Box::new(WavSampleSource::new(path))),
        _ => Ok(Box::new(CsvSampleSource::new(path).with_column(column))),
    }
}

/// Load a whole capture in one call
pub fn load_samples<P: AsRef<Path>>(path: P, format: SampleFormat, column: usize) -> Result<Vec<f64>> {
    let mut source = get_sample_source(path, format, column)?;
    let samples = source.read_samples()?;
    debug!("Loaded {} samples from {}", samples.len(), source.describe());
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_resolution() {
        assert_eq!(SampleFormat::Auto.resolve("capture.wav"), SampleFormat::Wav);
        assert_eq!(SampleFormat::Auto.resolve("capture.WAV"), SampleFormat::Wav);
        assert_eq!(SampleFormat::Auto.resolve("capture.csv"), SampleFormat::Csv);
        assert_eq!(SampleFormat::Auto.resolve("capture"), SampleFormat::Csv);
        assert_eq!(SampleFormat::Csv.resolve("capture.wav"), SampleFormat::Csv);
    }
}
