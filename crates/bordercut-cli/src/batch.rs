// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Batch processing: pages are independent, so they are detected in parallel.

use std::path::{Path, PathBuf};

use bordercut_core::error::{BordercutError, Result};
use bordercut_core::types::CropRectangle;
use bordercut_document::{BorderDetector, ImageProcessor};
use rayon::prelude::*;
use tracing::{info, warn};

/// Per-run options that do not affect detection itself.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    pub fail_on_empty: bool,
    pub crop_output: Option<PathBuf>,
}

/// Outcome for one page.
#[derive(Debug)]
pub struct PageResult {
    pub path: PathBuf,
    pub outcome: Result<CropRectangle>,
}

/// Detect every page, keeping the input order in the results.
pub fn process_all(
    detector: &BorderDetector,
    paths: &[PathBuf],
    options: &BatchOptions,
) -> Vec<PageResult> {
    paths
        .par_iter()
        .map(|path| PageResult {
            path: path.clone(),
            outcome: process_page(detector, path, options),
        })
        .collect()
}

fn process_page(
    detector: &BorderDetector,
    path: &Path,
    options: &BatchOptions,
) -> Result<CropRectangle> {
    let page = ImageProcessor::open(path)?;
    let rect = detector.detect_gray(&page.to_gray())?;
    if rect.is_empty() {
        warn!(path = %path.display(), %rect, "Page is entirely border");
        if options.fail_on_empty {
            return Err(BordercutError::EmptyCrop {
                geometry: rect.to_string(),
            });
        }
    }

    if let Some(dir) = &options.crop_output {
        if rect.is_empty() {
            warn!(path = %path.display(), "Nothing to write for an empty crop");
        } else {
            let target = crop_target(dir, path);
            page.crop(&rect)?.save(&target)?;
            info!(target = %target.display(), "Cropped page written");
        }
    }

    Ok(rect)
}

/// `<dir>/<input stem>.png`.
fn crop_target(dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "page".to_string());
    dir.join(format!("{stem}.png"))
}

/// One output line per page: just the geometry for a single page, or the
/// path and geometry when several pages are processed.
pub fn format_line(path: &Path, rect: &CropRectangle, with_path: bool) -> String {
    if with_path {
        format!("{} {}", path.display(), rect)
    } else {
        rect.to_string()
    }
}
