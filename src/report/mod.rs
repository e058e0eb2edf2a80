// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-adc-analyzer project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Reporting of analysis results
//!
//! - console tables for the run parameters and the five metrics
//! - JSON export of the complete [`AnalysisReport`]
//! - CSV export of the magnitude spectrum, linear or in dB

use anyhow::{Context, Result};
use log::info;
use num_complex::Complex64;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::analyzer::AnalysisReport;

/// Render rows as a bordered text table
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.len());
            }
        }
    }

    let separator = widths
        .iter()
        .map(|w| "-".repeat(w + 2))
        .collect::<Vec<_>>()
        .join("+");
    let separator = format!("+{}+", separator);

    let format_row = |cells: &[String]| {
        let body = widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                format!(" {:>width$} ", cell, width = w)
            })
            .collect::<Vec<_>>()
            .join("|");
        format!("|{}|", body)
    };

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let mut lines = vec![separator.clone(), format_row(&header_cells), separator.clone()];
    for row in rows {
        lines.push(format_row(row));
    }
    lines.push(separator);
    lines.join("\n")
}

/// Table of the run parameters
pub fn parameters_table(report: &AnalysisReport) -> String {
    let p = &report.parameters;
    render_table(
        &["Fsig [Hz]", "Fs [Hz]", "DFT len", "Fb [Hz]"],
        &[vec![
            format!("{:.3}", p.signal_frequency),
            format!("{:.3}", p.sampling_frequency),
            p.dft_length.to_string(),
            format!("{:.3}", report.base_frequency),
        ]],
    )
}

/// Table of the five metrics
pub fn metrics_table(report: &AnalysisReport) -> String {
    let m = &report.metrics;
    render_table(
        &["THD [dB]", "SNHR [dB]", "SFDR [dB]", "SINAD [dB]", "ENOB [bits]"],
        &[vec![
            format!("{:.3}", m.thd),
            format!("{:.3}", m.snhr),
            format!("{:.3}", m.sfdr),
            format!("{:.3}", m.sinad),
            format!("{:.3}", m.enob),
        ]],
    )
}

/// Print both tables on stdout
pub fn print_report(report: &AnalysisReport) {
    println!("{}", parameters_table(report));
    println!("{}", metrics_table(report));
}

/// Save the report as pretty-printed JSON
pub fn save_report<P: AsRef<Path>>(report: &AnalysisReport, path: P) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report to {:?}", path))?;
    info!("Report saved in {}", path.display());
    Ok(())
}

/// Magnitude of a bin, optionally in dB with `floor` applied before log10
pub fn magnitude(value: Complex64, db: bool, floor: f64) -> f64 {
    let v = value.norm();
    if db {
        20.0 * v.max(floor).log10()
    } else {
        v
    }
}

/// Write the magnitude spectrum as CSV, one `frequency,magnitude` row per bin
pub fn write_spectrum<W: Write>(
    writer: &mut W,
    spectrum: &[Complex64],
    base_frequency: f64,
    db: bool,
    floor: f64,
) -> Result<()> {
    let column = if db { "magnitude_db" } else { "magnitude" };
    writeln!(writer, "frequency_hz,{}", column)?;
    for (i, &value) in spectrum.iter().enumerate() {
        writeln!(
            writer,
            "{},{}",
            base_frequency * i as f64,
            magnitude(value, db, floor)
        )?;
    }
    Ok(())
}

/// Save the magnitude spectrum of a report as a CSV file
pub fn save_spectrum<P: AsRef<Path>>(
    report: &AnalysisReport,
    path: P,
    db: bool,
    floor: f64,
) -> Result<()> {
    let path = path.as_ref();
    let file =
        File::create(path).with_context(|| format!("Failed to create spectrum file {:?}", path))?;
    let mut writer = BufWriter::new(file);
    write_spectrum(
        &mut writer,
        &report.spectrum,
        report.base_frequency,
        db,
        floor,
    )
    .with_context(|| format!("Failed to write spectrum to {:?}", path))?;
    writer.flush()?;
    info!("Spectrum saved in {}", path.display());
    Ok(())
}
