// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-adc-analyzer project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

use anyhow::Result;
use hound::{WavSpec, WavWriter};
use rust_adc_analyzer::acquisition::{get_sample_source, load_samples, SampleFormat};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_csv_capture_is_read_in_order() -> Result<()> {
    let temp_dir = tempdir()?;
    let path = temp_dir.path().join("capture.csv");
    fs::write(&path, "12\n-4.5\n\n  7 \n0\n")?;

    let samples = load_samples(&path, SampleFormat::Auto, 0)?;
    assert_eq!(samples, vec![12.0, -4.5, 7.0, 0.0]);
    Ok(())
}

#[test]
fn test_csv_column_selection() -> Result<()> {
    let temp_dir = tempdir()?;
    let path = temp_dir.path().join("capture.txt");
    fs::write(&path, "0,100\n1,-100\n2,50\n")?;

    let samples = load_samples(&path, SampleFormat::Csv, 1)?;
    assert_eq!(samples, vec![100.0, -100.0, 50.0]);
    Ok(())
}

#[test]
fn test_malformed_csv_reports_the_line() -> Result<()> {
    let temp_dir = tempdir()?;
    let path = temp_dir.path().join("capture.csv");
    fs::write(&path, "1\n2\nthree\n")?;

    let err = load_samples(&path, SampleFormat::Csv, 0).unwrap_err();
    assert!(format!("{:#}", err).contains("Line 3"));
    Ok(())
}

#[test]
fn test_missing_file_is_an_error() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("absent.csv");
    assert!(load_samples(&path, SampleFormat::Auto, 0).is_err());
}

#[test]
fn test_wav_capture_keeps_raw_codes() -> Result<()> {
    let temp_dir = tempdir()?;
    let path = temp_dir.path().join("capture.wav");
    let spec = WavSpec {
        channels: 1,
        sample_rate: 4000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = WavWriter::create(&path, spec)?;
    for code in [-2048i16, -1, 0, 1, 2047] {
        writer.write_sample(code)?;
    }
    writer.finalize()?;

    let source = get_sample_source(&path, SampleFormat::Auto, 0)?;
    assert!(source.describe().contains("WAV"));

    let samples = load_samples(&path, SampleFormat::Auto, 0)?;
    assert_eq!(samples, vec![-2048.0, -1.0, 0.0, 1.0, 2047.0]);
    Ok(())
}
