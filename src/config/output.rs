// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-adc-analyzer project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Result output configuration
//!
//! Controls where the spectrum and the analysis report are written. Both
//! outputs are optional; the metrics table is always printed.

use serde::{Deserialize, Serialize};

/// Output settings of an analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// CSV file receiving the magnitude spectrum
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spectrum_file: Option<String>,

    /// JSON file receiving the full analysis report
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_file: Option<String>,

    /// Write the spectrum magnitude in dB
    #[serde(default = "default_db_scale")]
    pub db_scale: bool,

    /// Magnitude floor applied before taking log10
    #[serde(default = "default_db_floor")]
    pub db_floor: f64,
}

fn default_db_scale() -> bool {
    true
}

fn default_db_floor() -> f64 {
    1e-3
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            spectrum_file: None,
            report_file: None,
            db_scale: default_db_scale(),
            db_floor: default_db_floor(),
        }
    }
}
