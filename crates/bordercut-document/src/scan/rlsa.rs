// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Run-length smoothing (RLSA). Short background runs between ink pixels are
// filled so that nearby marks merge into solid text blocks.

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::matrix::BinaryMatrix;

/// Apply one RLSA pass along every row.
///
/// Each row is scanned left to right. A background run that ends at an ink
/// pixel is filled when it is shorter than `threshold`. The first run of
/// `threshold` or more pixels stops bridging for the rest of that row.
/// Counting starts at column 0, so a short leading margin is filled too.
pub fn rlsa_rows(matrix: &BinaryMatrix, threshold: usize) -> BinaryMatrix {
    let width = matrix.width();
    let mut data = matrix.as_slice().to_vec();
    data.par_chunks_mut(width)
        .for_each(|row| smooth_row(row, threshold));
    BinaryMatrix::from_parts(matrix.height(), width, data)
}

/// Vertical RLSA (on the transpose) followed by horizontal RLSA.
///
/// The two passes do not commute; vertical bridging always runs first.
#[instrument(skip(matrix), fields(height = matrix.height(), width = matrix.width()))]
pub fn smooth(matrix: &BinaryMatrix, threshold: usize) -> BinaryMatrix {
    let before = matrix.ink_count();
    let vertical = rlsa_rows(&matrix.transpose(), threshold);
    let horizontal = rlsa_rows(&vertical.transpose(), threshold);
    debug!(before, after = horizontal.ink_count(), "RLSA smoothing complete");
    horizontal
}

fn smooth_row(row: &mut [u8], threshold: usize) {
    let mut tracking = true;
    let mut gap = 0usize;

    for j in 0..row.len() {
        if row[j] == 1 {
            if tracking {
                if gap < threshold {
                    row[j - gap..j].fill(1);
                } else {
                    tracking = false;
                }
            }
            gap = 0;
        } else if tracking {
            gap += 1;
        }
    }
}
