// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Border scanner: column ink-density projection and bounded edge scans.

use bordercut_core::types::BorderThresholds;
use tracing::{debug, warn};

use crate::matrix::BinaryMatrix;

/// Ink density of every column: ink pixels in the column divided by height.
///
/// Every value lies in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnHistogram(Vec<f32>);

impl ColumnHistogram {
    pub fn from_matrix(matrix: &BinaryMatrix) -> Self {
        let mut counts = vec![0u32; matrix.width()];
        for row in matrix.rows() {
            for (count, &v) in counts.iter_mut().zip(row) {
                *count += u32::from(v);
            }
        }
        let height = matrix.height() as f32;
        Self(counts.into_iter().map(|c| c as f32 / height).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

/// Decides whether a column belongs to a border.
pub trait BorderPredicate {
    fn is_border(&self, density: f32, threshold: f32) -> bool;
}

/// Ink-dominated columns: the frame left by scanner hardware.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlackBorder;

impl BorderPredicate for BlackBorder {
    fn is_border(&self, density: f32, threshold: f32) -> bool {
        density > threshold
    }
}

/// Nearly empty columns left over once the black frame is gone.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhiteBorder;

impl BorderPredicate for WhiteBorder {
    fn is_border(&self, density: f32, threshold: f32) -> bool {
        density <= threshold
    }
}

/// Columns kept by one border pass: `left..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpan {
    /// First column to keep.
    pub left: usize,
    /// One past the last column to keep.
    pub end: usize,
}

impl ColumnSpan {
    /// Inclusive index of the last kept column, or `None` if nothing is kept.
    pub fn right(&self) -> Option<usize> {
        self.end.checked_sub(1)
    }

    /// The left and right scans crossed: the whole page matched the predicate.
    pub fn is_degenerate(&self) -> bool {
        self.left >= self.end
    }

    pub fn width(&self) -> usize {
        self.end.saturating_sub(self.left)
    }
}

/// Scan inward from both edges while `predicate` holds.
///
/// When `max_border_width` is set and a side scans further than it, the trim
/// on that side is cancelled. Without a guard the scans may cross, producing a
/// degenerate span rather than an error.
pub fn scan_borders<P: BorderPredicate + ?Sized>(
    matrix: &BinaryMatrix,
    predicate: &P,
    density_threshold: f32,
    max_border_width: Option<usize>,
) -> ColumnSpan {
    let histogram = ColumnHistogram::from_matrix(matrix);
    let hist = histogram.as_slice();
    let w = hist.len();

    let is_border = |density: f32| predicate.is_border(density, density_threshold);
    let mut left = hist.iter().take_while(|&&d| is_border(d)).count();
    let mut right = hist.iter().rev().take_while(|&&d| is_border(d)).count();

    if let Some(limit) = max_border_width {
        if left > limit {
            debug!(left, limit, "Left trim exceeds width guard; cancelled");
            left = 0;
        }
        if right > limit {
            debug!(right, limit, "Right trim exceeds width guard; cancelled");
            right = 0;
        }
    }

    let span = ColumnSpan {
        left,
        end: w - right,
    };
    if span.is_degenerate() {
        warn!(width = w, left, right, "Border scan crossed; page is entirely border");
    }
    span
}

/// Black-border pass with thresholds resolved against the matrix height.
pub fn black_borders(matrix: &BinaryMatrix, thresholds: &BorderThresholds) -> ColumnSpan {
    scan_borders(
        matrix,
        &BlackBorder,
        thresholds.density_threshold,
        thresholds.max_border_width.resolve(matrix.height()),
    )
}

/// White-border pass with thresholds resolved against the matrix height.
pub fn white_borders(matrix: &BinaryMatrix, thresholds: &BorderThresholds) -> ColumnSpan {
    scan_borders(
        matrix,
        &WhiteBorder,
        thresholds.density_threshold,
        thresholds.max_border_width.resolve(matrix.height()),
    )
}
