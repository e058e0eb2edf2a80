// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-adc-analyzer project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

// Main entry point for the ADC analyzer

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, error, info};
use std::path::PathBuf;

use rust_adc_analyzer::acquisition::{self, SampleFormat};
use rust_adc_analyzer::config::{output_config_schema, Config};
use rust_adc_analyzer::report;
use rust_adc_analyzer::{AdcAnalyzer, AnalysisError};

/// ADC characterization from a captured sample sequence
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file path (CSV or WAV capture)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Input file format
    #[arg(long, value_enum)]
    format: Option<SampleFormat>,

    /// Original signal frequency in Hz
    #[arg(long)]
    fsig: Option<f64>,

    /// Sampling frequency in Hz
    #[arg(long)]
    fsam: Option<f64>,

    /// Length of the DFT
    #[arg(long)]
    dftlen: Option<u32>,

    /// Number of harmonic orders taken into account
    #[arg(long)]
    harmonics: Option<u16>,

    /// Write the magnitude spectrum to this CSV file
    #[arg(long)]
    spectrum: Option<PathBuf>,

    /// Write the JSON report to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Configuration file (YAML); command line flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the configuration JSON schema and exit
    #[arg(long)]
    show_config_schema: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(err) = run(args) {
        error!("{:#}", err);
        let code = err
            .downcast_ref::<AnalysisError>()
            .map(AnalysisError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run(args: Args) -> Result<()> {
    if args.show_config_schema {
        return output_config_schema();
    }

    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    config.apply_args(
        args.input,
        args.format,
        args.fsig,
        args.fsam,
        args.dftlen,
        args.harmonics,
        args.spectrum,
        args.report,
    );
    rust_adc_analyzer::config::validate_specific_rules(&config)?;
    debug!("Effective configuration: {:?}", config);

    let input = config
        .input
        .file
        .clone()
        .context("No input file given (use --input or input.file in the configuration)")?;

    let analyzer = AdcAnalyzer::new(config.analysis.clone())?;
    let samples = acquisition::load_samples(&input, config.input.format, config.input.column)?;

    info!("Starting analysis of {}", input);
    let analysis = analyzer.analyze(&samples)?;
    report::print_report(&analysis);

    if let Some(path) = &config.output.spectrum_file {
        report::save_spectrum(&analysis, path, config.output.db_scale, config.output.db_floor)?;
    }
    if let Some(path) = &config.output.report_file {
        report::save_report(&analysis, path)?;
    }

    Ok(())
}
