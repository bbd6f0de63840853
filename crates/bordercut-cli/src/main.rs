// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bordercut: scanner border removal for document page images.
//
// Entry point. Initialises logging, builds the detector from flags and an
// optional config file, and prints one crop geometry per page.

mod batch;
mod cli;

use std::process::ExitCode;

use anyhow::Result;
use bordercut_document::BorderDetector;
use clap::Parser;

use batch::{BatchOptions, format_line, process_all};
use cli::Cli;

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries only geometry.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("bordercut: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every page succeeded.
fn run(cli: Cli) -> Result<bool> {
    let detector = BorderDetector::new(cli.trim_config()?)?;
    tracing::info!(pages = cli.images.len(), "Bordercut starting");

    if let Some(dir) = &cli.crop_output {
        std::fs::create_dir_all(dir)?;
    }
    let options = BatchOptions {
        fail_on_empty: cli.fail_on_empty,
        crop_output: cli.crop_output.clone(),
    };

    let results = process_all(&detector, &cli.images, &options);
    let with_path = results.len() > 1;
    let mut all_ok = true;
    for result in &results {
        match &result.outcome {
            Ok(rect) => println!("{}", format_line(&result.path, rect, with_path)),
            Err(err) => {
                all_ok = false;
                tracing::error!(path = %result.path.display(), error = %err, "Page failed");
                eprintln!("bordercut: {}: {err}", result.path.display());
            }
        }
    }
    Ok(all_ok)
}
