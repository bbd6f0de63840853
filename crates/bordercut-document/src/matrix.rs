// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Flat row-major matrices passed between the detection stages.

use bordercut_core::error::{BordercutError, Result};
use image::GrayImage;

fn check_dimensions(height: usize, width: usize, len: usize) -> Result<()> {
    if height == 0 || width == 0 {
        return Err(BordercutError::InvalidDimensions { height, width });
    }
    let expected = height * width;
    if len != expected {
        return Err(BordercutError::BufferSizeMismatch {
            expected,
            actual: len,
        });
    }
    Ok(())
}

/// H x W grid of real-valued intensities, ink high.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityMatrix {
    height: usize,
    width: usize,
    data: Vec<f32>,
}

impl IntensityMatrix {
    /// Wrap a row-major buffer of `height * width` values.
    pub fn from_raw(height: usize, width: usize, data: Vec<f32>) -> Result<Self> {
        check_dimensions(height, width, data.len())?;
        Ok(Self {
            height,
            width,
            data,
        })
    }

    /// Build from a decoded 8-bit grayscale image, mapping `v` to `1 - v / 255`
    /// so dark ink ends up with high intensity.
    pub fn from_gray_image(gray: &GrayImage) -> Result<Self> {
        let (width, height) = gray.dimensions();
        let data = gray
            .as_raw()
            .iter()
            .map(|&v| 1.0 - v as f32 / 255.0)
            .collect();
        Self::from_raw(height as usize, width as usize, data)
    }

    /// Matrix of the same shape with a new buffer. Only used by stages that
    /// already hold a valid shape.
    pub(crate) fn with_data(&self, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), self.data.len());
        Self {
            height: self.height,
            width: self.width,
            data,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<f32> {
        self.data
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.width + col]
    }

    /// Smallest and largest value.
    pub fn min_max(&self) -> (f32, f32) {
        self.data
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}

/// H x W grid of 0 (background) and 1 (ink).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMatrix {
    height: usize,
    width: usize,
    data: Vec<u8>,
}

impl BinaryMatrix {
    /// Wrap a row-major buffer. Any non-zero value counts as ink and is stored as 1.
    pub fn from_raw(height: usize, width: usize, mut data: Vec<u8>) -> Result<Self> {
        check_dimensions(height, width, data.len())?;
        for v in data.iter_mut() {
            *v = u8::from(*v != 0);
        }
        Ok(Self {
            height,
            width,
            data,
        })
    }

    /// Build from nested rows, mostly for tests and small fixtures.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|row| row.len() != width) {
            return Err(BordercutError::BufferSizeMismatch {
                expected: width,
                actual: bad.len(),
            });
        }
        Self::from_raw(height, width, rows.concat())
    }

    /// All-background matrix.
    pub fn zeros(height: usize, width: usize) -> Result<Self> {
        Self::from_raw(height, width, vec![0; height * width])
    }

    /// Trusted constructor for stages that produce exactly `height * width` 0/1 values.
    pub(crate) fn from_parts(height: usize, width: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), height * width);
        Self {
            height,
            width,
            data,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.data[row * self.width + col]
    }

    pub fn set(&mut self, row: usize, col: usize, ink: bool) {
        self.data[row * self.width + col] = u8::from(ink);
    }

    pub fn row(&self, row: usize) -> &[u8] {
        let start = row * self.width;
        &self.data[start..start + self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(self.width)
    }

    /// Number of ink pixels.
    pub fn ink_count(&self) -> usize {
        self.data.iter().filter(|&&v| v == 1).count()
    }

    /// W x H matrix with rows and columns swapped.
    pub fn transpose(&self) -> Self {
        let (h, w) = (self.height, self.width);
        let mut data = vec![0u8; h * w];
        for (r, row) in self.rows().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                data[c * h + r] = v;
            }
        }
        Self::from_parts(w, h, data)
    }

    /// Keep columns `start..end`. Returns `None` when the range is empty or
    /// out of bounds.
    pub fn crop_columns(&self, start: usize, end: usize) -> Option<Self> {
        if start >= end || end > self.width {
            return None;
        }
        let data = self
            .rows()
            .flat_map(|row| row[start..end].iter().copied())
            .collect();
        Some(Self::from_parts(self.height, end - start, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn zero_sized_input_fails_fast() {
        assert!(matches!(
            IntensityMatrix::from_raw(0, 5, vec![]),
            Err(BordercutError::InvalidDimensions { height: 0, width: 5 })
        ));
        assert!(matches!(
            BinaryMatrix::from_raw(3, 0, vec![]),
            Err(BordercutError::InvalidDimensions { height: 3, width: 0 })
        ));
    }

    #[test]
    fn buffer_length_must_match_shape() {
        assert!(matches!(
            IntensityMatrix::from_raw(2, 3, vec![0.0; 5]),
            Err(BordercutError::BufferSizeMismatch {
                expected: 6,
                actual: 5
            })
        ));
        assert!(BinaryMatrix::from_rows(&[vec![1, 0], vec![1]]).is_err());
    }

    #[test]
    fn gray_image_is_inverted_so_ink_is_high() {
        let mut img = GrayImage::from_pixel(3, 2, Luma([255u8]));
        img.put_pixel(1, 0, Luma([0u8]));
        let m = IntensityMatrix::from_gray_image(&img).expect("valid image");
        assert_eq!((m.height(), m.width()), (2, 3));
        assert_eq!(m.get(0, 1), 1.0);
        assert_eq!(m.get(1, 2), 0.0);
    }

    #[test]
    fn transpose_swaps_axes() {
        let m = BinaryMatrix::from_rows(&[vec![1, 0, 0], vec![0, 1, 1]]).expect("rows");
        let t = m.transpose();
        assert_eq!((t.height(), t.width()), (3, 2));
        assert_eq!(t.row(0), &[1, 0]);
        assert_eq!(t.row(2), &[0, 1]);
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn crop_columns_keeps_requested_range() {
        let m = BinaryMatrix::from_rows(&[vec![1, 0, 1, 1], vec![0, 0, 1, 0]]).expect("rows");
        let cropped = m.crop_columns(1, 3).expect("non-empty range");
        assert_eq!(cropped.width(), 2);
        assert_eq!(cropped.row(0), &[0, 1]);
        assert_eq!(cropped.row(1), &[0, 1]);
        assert!(m.crop_columns(2, 2).is_none());
        assert!(m.crop_columns(3, 5).is_none());
    }

    #[test]
    fn nonzero_values_normalize_to_one() {
        let m = BinaryMatrix::from_raw(1, 3, vec![0, 7, 255]).expect("valid");
        assert_eq!(m.as_slice(), &[0, 1, 1]);
        assert_eq!(m.ink_count(), 2);
    }
}
