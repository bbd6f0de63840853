// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Border detection pipeline: normalize, binarize, smooth, and resolve the
// horizontal crop of a scanned page.

use std::path::Path;

use bordercut_core::config::TrimConfig;
use bordercut_core::error::Result;
use bordercut_core::types::CropRectangle;
use image::GrayImage;
use tracing::{debug, info, instrument};

use crate::image::processor::ImageProcessor;
use crate::matrix::{BinaryMatrix, IntensityMatrix};
use crate::scan::binarize::binarize;
use crate::scan::crop::resolve_crop;
use crate::scan::normalize::normalize;
use crate::scan::rlsa::smooth;

/// Finds the black scanner frame and residual white margins of a page.
///
/// The detector holds only its configuration; every call builds fresh
/// matrices, so the same input always produces the same rectangle and one
/// detector can be shared across threads.
///
/// ```ignore
/// let detector = BorderDetector::new(TrimConfig::default())?;
/// let rect = detector.detect_path("page-001.png")?;
/// println!("{rect}"); // e.g. 1480x2100+62+0
/// ```
#[derive(Debug, Clone, Default)]
pub struct BorderDetector {
    config: TrimConfig,
}

impl BorderDetector {
    /// Create a detector, rejecting invalid configuration up front.
    pub fn new(config: TrimConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TrimConfig {
        &self.config
    }

    /// Run the full pipeline on an intensity matrix (ink high).
    ///
    /// 1. Histogram equalization and smoothing
    /// 2. Binarization at the configured threshold
    /// 3. Vertical then horizontal RLSA
    /// 4. Black-border pass, then white-border pass
    #[instrument(skip_all, fields(height = matrix.height(), width = matrix.width()))]
    pub fn detect(&self, matrix: &IntensityMatrix) -> CropRectangle {
        let smoothed = self.smoothed(matrix);
        let rect = self.detect_binary(&smoothed);
        info!(%rect, "Border detection complete");
        rect
    }

    /// Run only the border passes on an already smoothed binary matrix.
    pub fn detect_binary(&self, smoothed: &BinaryMatrix) -> CropRectangle {
        resolve_crop(
            smoothed,
            &self.config.black_border,
            &self.config.white_border,
        )
    }

    /// Normalize, binarize, and smooth without resolving borders.
    pub fn smoothed(&self, matrix: &IntensityMatrix) -> BinaryMatrix {
        let normalized = normalize(matrix, &self.config.normalize);
        let binary = binarize(&normalized, self.config.binarize_threshold);
        let threshold = self.config.rlsa_threshold_for(matrix.height());
        debug!(rlsa_threshold = threshold, ink = binary.ink_count(), "Binarized");
        smooth(&binary, threshold)
    }

    /// Detect borders on a decoded 8-bit grayscale page (dark ink on light paper).
    pub fn detect_gray(&self, gray: &GrayImage) -> Result<CropRectangle> {
        let matrix = IntensityMatrix::from_gray_image(gray)?;
        Ok(self.detect(&matrix))
    }

    /// Decode an image file and detect its borders.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn detect_path(&self, path: impl AsRef<Path>) -> Result<CropRectangle> {
        let gray = ImageProcessor::open(path)?.to_gray();
        self.detect_gray(&gray)
    }
}
