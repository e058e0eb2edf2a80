// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-adc-analyzer project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Error types of the numeric core
//!
//! The spectral transform, the harmonic locator and the metric engine report
//! failures through [`AnalysisError`]. The surrounding glue (configuration,
//! sample loading, reporting) uses `anyhow` and converts these errors with `?`.

use thiserror::Error;

/// Result alias used by the numeric core
pub type AdcResult<T> = std::result::Result<T, AnalysisError>;

/// Typed failures of the numeric core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Malformed parameters given to the core, detected before any computation starts
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// The defining ratio of a metric is undefined (zero or negative power)
    #[error("{metric} is undefined: {reason}")]
    DomainError { metric: &'static str, reason: String },
}

impl AnalysisError {
    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        AnalysisError::InvalidArgument {
            reason: reason.into(),
        }
    }

    pub(crate) fn domain(metric: &'static str, reason: impl Into<String>) -> Self {
        AnalysisError::DomainError {
            metric,
            reason: reason.into(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            AnalysisError::InvalidArgument { .. } => 2,
            AnalysisError::DomainError { .. } => 3,
        }
    }
}
