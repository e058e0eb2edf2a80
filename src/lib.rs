// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-adc-analyzer project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Rust ADC analyzer library
//!
//! This library characterizes an analog-to-digital converter from a captured
//! sample sequence: it computes the one-sided DFT of the capture, locates the
//! aliased harmonics of the test tone and derives THD, SNHR, SFDR, SINAD and ENOB.

pub mod acquisition;
pub mod analyzer;
pub mod config;
pub mod error;
pub mod metrics;
pub mod report;
pub mod spectral;
pub mod utility;

pub use analyzer::{AdcAnalyzer, AnalysisReport};
pub use error::{AdcResult, AnalysisError};
pub use metrics::AdcMetrics;
