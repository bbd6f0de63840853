// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// bordercut-document: Border detection for scanned document pages.
//
// Provides the detection pipeline (intensity normalization, binarization,
// run-length smoothing, border scanning, crop resolution) over flat matrices,
// plus image decoding and cropping helpers for callers working with files.

pub mod image;
pub mod matrix;
pub mod scan;

// Re-export the primary types so callers can use `bordercut_document::BorderDetector` etc.
pub use crate::image::processor::ImageProcessor;
pub use matrix::{BinaryMatrix, IntensityMatrix};
pub use scan::pipeline::BorderDetector;
