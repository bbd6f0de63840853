// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Crop resolver: composes the black-border and white-border passes into a
// crop rectangle in original image coordinates.

use bordercut_core::types::{BorderThresholds, CropRectangle};
use tracing::{debug, instrument, warn};

use crate::matrix::BinaryMatrix;
use crate::scan::borders::{black_borders, white_borders};

/// Trim black borders, then trim white slivers from what remains.
///
/// The white pass runs on the matrix already cropped to the black pass, so
/// its offsets are relative to the black pass's left edge and are accumulated
/// onto it. An empty result (width 0) means the page was entirely border.
#[instrument(skip_all, fields(height = smoothed.height(), width = smoothed.width()))]
pub fn resolve_crop(
    smoothed: &BinaryMatrix,
    black: &BorderThresholds,
    white: &BorderThresholds,
) -> CropRectangle {
    let height = smoothed.height();

    let black_span = black_borders(smoothed, black);
    debug!(left = black_span.left, end = black_span.end, "Black-border pass");

    let Some(cropped) = smoothed.crop_columns(black_span.left, black_span.end) else {
        warn!("Black-border pass kept no columns");
        return CropRectangle::horizontal(black_span.left, 0, height);
    };

    let white_span = white_borders(&cropped, white);
    debug!(left = white_span.left, end = white_span.end, "White-border pass");

    let rect = CropRectangle::horizontal(
        black_span.left + white_span.left,
        white_span.width(),
        height,
    );
    if rect.is_empty() {
        warn!(%rect, "White-border pass kept no columns");
    }
    rect
}
