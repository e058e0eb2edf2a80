// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-adc-analyzer project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! CSV capture reader
//!
//! One sample per record. The sample is taken from a configurable column,
//! blank lines are skipped and any record whose field is missing or not a
//! number aborts the load with its line number.

use anyhow::{Context, Result};
use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::SampleSource;

/// Sample source reading a CSV capture
pub struct CsvSampleSource {
    path: PathBuf,
    column: usize,
}

impl CsvSampleSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            column: 0,
        }
    }

    /// Select the 0-based column holding the samples
    pub fn with_column(mut self, column: usize) -> Self {
        self.column = column;
        self
    }
}

impl SampleSource for CsvSampleSource {
    fn read_samples(&mut self) -> Result<Vec<f64>> {
        info!("Reading data from {}", self.path.display());
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open capture file {:?}", self.path))?;

        let samples = parse_records(BufReader::new(file), self.column)
            .with_context(|| format!("Failed to parse capture file {:?}", self.path))?;

        info!("Read {} points", samples.len());
        Ok(samples)
    }

    fn describe(&self) -> String {
        format!("CSV file {} (column {})", self.path.display(), self.column)
    }
}

/// Parse CSV records from any reader
pub fn parse_records<R: BufRead>(reader: R, column: usize) -> Result<Vec<f64>> {
    let mut samples = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.with_context(|| format!("Failed to read line {}", line_number))?;
        if line.trim().is_empty() {
            continue;
        }

        let field = line.split(',').nth(column).with_context(|| {
            format!("Line {} has no column {}: {:?}", line_number, column, line)
        })?;
        let value: f64 = field
            .trim()
            .parse()
            .with_context(|| format!("Line {} is not a number: {:?}", line_number, field))?;
        samples.push(value);
    }

    debug!("Parsed {} CSV records", samples.len());
    Ok(samples)
}
