// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-adc-analyzer project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Capture input configuration

use serde::{Deserialize, Serialize};

use crate::acquisition::SampleFormat;

/// Where the captured samples come from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Capture file, CSV or WAV
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Capture format
    #[serde(default)]
    pub format: SampleFormat,

    /// 0-based CSV column holding the samples
    #[serde(default)]
    pub column: usize,
}
