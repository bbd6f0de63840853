// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fixed-threshold binarization of a normalized intensity matrix.

use tracing::debug;

use crate::matrix::{BinaryMatrix, IntensityMatrix};

/// Default midpoint threshold. Equalization has already maximised contrast,
/// so no adaptive threshold is needed.
pub const DEFAULT_THRESHOLD: f32 = 0.5;

/// Values `>= threshold` become ink (1), everything else background (0).
pub fn binarize(matrix: &IntensityMatrix, threshold: f32) -> BinaryMatrix {
    let data: Vec<u8> = matrix
        .as_slice()
        .iter()
        .map(|&v| u8::from(v >= threshold))
        .collect();
    let out = BinaryMatrix::from_parts(matrix.height(), matrix.width(), data);
    debug!(threshold, ink = out.ink_count(), "Binarization complete");
    out
}
