// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Bordercut: border-pass thresholds and the crop
// rectangle produced by the detector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BordercutError;

/// Upper bound on how many columns a single border pass may trim per side.
///
/// A pass that would trim more than the limit on one side cancels the trim on
/// that side instead, so a page that matches the border predicate everywhere
/// is never collapsed to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidthLimit {
    /// Half the image height (integer division), the classic black-border guard.
    HalfHeight,
    /// A fixed number of columns.
    Fixed(usize),
    /// No guard at all.
    Unbounded,
}

impl WidthLimit {
    /// Resolve the limit against an image height. `None` means unbounded.
    pub fn resolve(&self, height: usize) -> Option<usize> {
        match self {
            Self::HalfHeight => Some(height / 2),
            Self::Fixed(columns) => Some(*columns),
            Self::Unbounded => None,
        }
    }
}

/// Configuration of one border pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BorderThresholds {
    /// Column ink density the pass predicate compares against.
    pub density_threshold: f32,
    /// Maximum trim per side before the trim is cancelled.
    pub max_border_width: WidthLimit,
}

impl BorderThresholds {
    /// Defaults for the black-border pass: any ink at all, guarded at H/2.
    pub fn black_default() -> Self {
        Self {
            density_threshold: 0.0,
            max_border_width: WidthLimit::HalfHeight,
        }
    }

    /// Defaults for the white-border pass: completely empty columns, no guard.
    pub fn white_default() -> Self {
        Self {
            density_threshold: 0.0,
            max_border_width: WidthLimit::Unbounded,
        }
    }
}

/// Horizontal crop geometry in the coordinate space of the original image.
///
/// Vertical borders are never addressed: `y` is always 0 and `height` is the
/// full image height. Renders as the conventional `WxH+X+Y` geometry string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CropRectangle {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl CropRectangle {
    /// Full-height rectangle starting at column `x`.
    pub fn horizontal(x: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y: 0,
            width,
            height,
        }
    }

    /// True when the border scans left no column to keep.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Treat an empty rectangle as an error, for callers that cannot use one.
    pub fn non_empty(self) -> Result<Self, BordercutError> {
        if self.is_empty() {
            return Err(BordercutError::EmptyCrop {
                geometry: self.to_string(),
            });
        }
        Ok(self)
    }
}

impl fmt::Display for CropRectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

impl FromStr for CropRectangle {
    type Err = BordercutError;

    /// Parse `WxH+X+Y` geometry notation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BordercutError::InvalidConfig(format!("malformed geometry '{s}'"));

        let (size, offsets) = s.trim().split_once('+').ok_or_else(invalid)?;
        let (width, height) = size.split_once('x').ok_or_else(invalid)?;
        let (x, y) = offsets.split_once('+').ok_or_else(invalid)?;

        let parse = |part: &str| part.parse::<usize>().map_err(|_| invalid());
        Ok(Self {
            x: parse(x)?,
            y: parse(y)?,
            width: parse(width)?,
            height: parse(height)?,
        })
    }
}
