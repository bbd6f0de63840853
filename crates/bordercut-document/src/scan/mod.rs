// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Detection pipeline stages, leaf first: normalization, binarization, RLSA,
// border scanning, crop resolution, and the detector that chains them.

pub mod binarize;
pub mod borders;
pub mod crop;
pub mod normalize;
pub mod pipeline;
pub mod rlsa;

pub use borders::{BlackBorder, BorderPredicate, ColumnHistogram, ColumnSpan, WhiteBorder};
pub use crop::resolve_crop;
pub use pipeline::BorderDetector;
