// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Intensity normalization: histogram equalization followed by a local
// smoothing filter, rescaled to [0, 1].

use bordercut_core::config::{NormalizeConfig, SmoothingFilter};
use image::{ImageBuffer, Luma};
use imageproc::filter::gaussian_blur_f32;
use tracing::{debug, instrument, warn};

use crate::matrix::IntensityMatrix;

/// Number of histogram bins used for equalization.
const EQUALIZE_BINS: usize = 256;

/// Normalize a raw intensity matrix so that contrast is maximised and isolated
/// noise pixels are suppressed. The output always lies in [0, 1].
#[instrument(skip_all, fields(height = matrix.height(), width = matrix.width()))]
pub fn normalize(matrix: &IntensityMatrix, config: &NormalizeConfig) -> IntensityMatrix {
    let mut current = if config.equalize {
        rescale_intensity(&equalize_histogram(matrix))
    } else {
        matrix.clone()
    };

    current = match config.smoothing {
        SmoothingFilter::None => current,
        SmoothingFilter::Mean { radius } => mean_filter(&current, radius as usize),
        SmoothingFilter::Gaussian { sigma } => gaussian_filter(&current, sigma),
    };

    let out = rescale_intensity(&current);
    debug!(equalize = config.equalize, smoothing = ?config.smoothing, "Normalization complete");
    out
}

/// Remap intensities so their empirical cumulative distribution becomes uniform.
///
/// Values are binned over `[min, max]`; each pixel takes the CDF value
/// linearly interpolated between neighbouring bin centres. A constant matrix
/// carries no contrast and is returned clamped to [0, 1].
pub fn equalize_histogram(matrix: &IntensityMatrix) -> IntensityMatrix {
    let (lo, hi) = matrix.min_max();
    let span = hi - lo;
    if !(span > f32::EPSILON) {
        return clamp_unit(matrix);
    }

    let bins = EQUALIZE_BINS;
    let scale = bins as f32 / span;
    let mut counts = [0u64; EQUALIZE_BINS];
    for &v in matrix.as_slice() {
        let bin = (((v - lo) * scale) as usize).min(bins - 1);
        counts[bin] += 1;
    }

    let total = matrix.as_slice().len() as f64;
    let mut cdf = [0f32; EQUALIZE_BINS];
    let mut running = 0u64;
    for (slot, &count) in cdf.iter_mut().zip(counts.iter()) {
        running += count;
        *slot = (running as f64 / total) as f32;
    }

    let data = matrix
        .as_slice()
        .iter()
        .map(|&v| {
            // Position relative to the bin centres.
            let pos = (v - lo) * scale - 0.5;
            if pos <= 0.0 {
                cdf[0]
            } else if pos >= (bins - 1) as f32 {
                cdf[bins - 1]
            } else {
                let k = pos.floor() as usize;
                let t = pos - k as f32;
                cdf[k] * (1.0 - t) + cdf[k + 1] * t
            }
        })
        .collect();

    matrix.with_data(data)
}

/// Linearly stretch `[min, max]` onto `[0, 1]`.
pub fn rescale_intensity(matrix: &IntensityMatrix) -> IntensityMatrix {
    let (lo, hi) = matrix.min_max();
    let span = hi - lo;
    if !(span > f32::EPSILON) {
        return clamp_unit(matrix);
    }
    let data = matrix.as_slice().iter().map(|&v| (v - lo) / span).collect();
    matrix.with_data(data)
}

fn clamp_unit(matrix: &IntensityMatrix) -> IntensityMatrix {
    let data = matrix.as_slice().iter().map(|&v| v.clamp(0.0, 1.0)).collect();
    matrix.with_data(data)
}

/// Mean over a `(2 * radius + 1)` square window.
///
/// The image is reflected about its edges (`d c b a | a b c d | d c b a`), so
/// pixels in the outer columns average a full window just like interior ones.
pub fn mean_filter(matrix: &IntensityMatrix, radius: usize) -> IntensityMatrix {
    if radius == 0 {
        return matrix.clone();
    }
    let (h, w) = (matrix.height(), matrix.width());
    let side = 2 * radius + 1;
    let integral = compute_integral_image(matrix, radius);

    let mut data = Vec::with_capacity(h * w);
    for y in 0..h {
        for x in 0..w {
            data.push(region_mean(&integral, w + 2 * radius, x, y, side) as f32);
        }
    }
    matrix.with_data(data)
}

/// Gaussian blur with standard deviation `sigma`.
pub fn gaussian_filter(matrix: &IntensityMatrix, sigma: f32) -> IntensityMatrix {
    let (w, h) = (matrix.width() as u32, matrix.height() as u32);
    let Some(buffer) = ImageBuffer::<Luma<f32>, Vec<f32>>::from_raw(w, h, matrix.as_slice().to_vec())
    else {
        warn!(w, h, "Matrix does not fit an image buffer; skipping Gaussian smoothing");
        return matrix.clone();
    };
    let blurred = gaussian_blur_f32(&buffer, sigma);
    matrix.with_data(blurred.into_raw())
}

// -- Integral image helpers ---------------------------------------------------

/// Index into `0..len` after reflecting `pos` about the edges.
fn reflect_index(pos: isize, len: usize) -> usize {
    let period = 2 * len as isize;
    let folded = pos.rem_euclid(period) as usize;
    if folded < len { folded } else { 2 * len - 1 - folded }
}

/// Summed-area table of the matrix padded by `pad` reflected pixels per side.
///
/// `table[y * (pw + 1) + x]` holds the sum over padded rows `[0, y)` and
/// columns `[0, x)`, where `pw = w + 2 * pad`; the first row and column are
/// zero.
fn compute_integral_image(matrix: &IntensityMatrix, pad: usize) -> Vec<f64> {
    let (h, w) = (matrix.height(), matrix.width());
    let (ph, pw) = (h + 2 * pad, w + 2 * pad);
    let stride = pw + 1;
    let mut table = vec![0f64; stride * (ph + 1)];

    for py in 0..ph {
        let y = reflect_index(py as isize - pad as isize, h);
        let mut row_sum = 0f64;
        for px in 0..pw {
            let x = reflect_index(px as isize - pad as isize, w);
            row_sum += matrix.get(y, x) as f64;
            table[(py + 1) * stride + (px + 1)] = row_sum + table[py * stride + (px + 1)];
        }
    }

    table
}

/// Mean of the `side`-square window whose top-left corner in padded
/// coordinates is `(x, y)`; with the padding equal to the radius this is the
/// window centred on image pixel `(x, y)`.
fn region_mean(integral: &[f64], padded_width: usize, x: usize, y: usize, side: usize) -> f64 {
    let stride = padded_width + 1;
    let (x1, y1) = (x, y);
    let (x2, y2) = (x + side, y + side);

    // S = I[y2][x2] - I[y1][x2] - I[y2][x1] + I[y1][x1]
    let sum = integral[y2 * stride + x2] - integral[y1 * stride + x2] - integral[y2 * stride + x1]
        + integral[y1 * stride + x1];

    sum / (side * side) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(height: usize, width: usize, data: Vec<f32>) -> IntensityMatrix {
        IntensityMatrix::from_raw(height, width, data).expect("valid shape")
    }

    fn assert_unit_range(m: &IntensityMatrix) {
        for &v in m.as_slice() {
            assert!((0.0..=1.0).contains(&v), "value {v} outside [0, 1]");
        }
    }

    #[test]
    fn equalization_preserves_order() {
        let m = matrix(1, 6, vec![0.1, 0.1, 0.2, 0.15, 0.9, 0.3]);
        let eq = equalize_histogram(&m);
        let v = eq.as_slice();
        assert!(v[0] <= v[3] && v[3] <= v[2] && v[2] <= v[5] && v[5] <= v[4]);
        assert_eq!(v[0], v[1]);
        assert_unit_range(&eq);
        assert_eq!(v[4], 1.0);
    }

    #[test]
    fn equalization_spreads_a_skewed_distribution() {
        // Most pixels crowd the bottom of the range; equalization should lift
        // the crowd's upper member well above its raw position.
        let mut data = vec![0.0; 8];
        data.extend([0.05, 0.06, 0.07, 1.0]);
        let eq = equalize_histogram(&matrix(3, 4, data));
        assert!(eq.get(2, 2) > 0.7, "got {}", eq.get(2, 2));
    }

    #[test]
    fn constant_matrix_is_clamped_not_stretched() {
        let m = matrix(2, 2, vec![1.0; 4]);
        let out = normalize(&m, &NormalizeConfig::default());
        assert_eq!(out.as_slice(), &[1.0; 4]);

        let blank = matrix(2, 2, vec![0.0; 4]);
        let out = normalize(&blank, &NormalizeConfig::default());
        assert_eq!(out.as_slice(), &[0.0; 4]);
    }

    #[test]
    fn mean_filter_spreads_an_impulse() {
        let mut data = vec![0.0; 25];
        data[12] = 9.0;
        let smoothed = mean_filter(&matrix(5, 5, data), 1);
        assert!((smoothed.get(2, 2) - 1.0).abs() < 1e-6);
        assert!((smoothed.get(1, 1) - 1.0).abs() < 1e-6);
        assert_eq!(smoothed.get(0, 0), 0.0);
    }

    #[test]
    fn mean_filter_reflects_at_edges() {
        // Reflection repeats the edge pixel, so column 0 averages 1, 1, 0.
        let m = matrix(1, 5, vec![1.0, 0.0, 0.0, 0.0, 0.0]);
        let smoothed = mean_filter(&m, 1);
        assert!((smoothed.get(0, 0) - 2.0 / 3.0).abs() < 1e-6);
        assert!((smoothed.get(0, 1) - 1.0 / 3.0).abs() < 1e-6);
        assert_eq!(smoothed.get(0, 4), 0.0);
    }

    #[test]
    fn mean_filter_keeps_constant_images_constant() {
        // Radius larger than the image still folds back onto real pixels.
        let m = matrix(2, 3, vec![3.0; 6]);
        let smoothed = mean_filter(&m, 4);
        for &v in smoothed.as_slice() {
            assert!((v - 3.0).abs() < 1e-6);
        }
    }

    #[test]
    fn reflected_indices_fold_back_into_range() {
        let folded: Vec<usize> = (-3..7).map(|i| reflect_index(i, 3)).collect();
        assert_eq!(folded, vec![2, 1, 0, 0, 1, 2, 2, 1, 0, 0]);
    }

    #[test]
    fn gaussian_filter_keeps_shape_and_blurs() {
        let mut data = vec![0.0; 49];
        data[24] = 1.0;
        let blurred = gaussian_filter(&matrix(7, 7, data), 1.0);
        assert_eq!((blurred.height(), blurred.width()), (7, 7));
        assert!(blurred.get(3, 3) < 1.0);
        assert!(blurred.get(3, 4) > 0.0);
    }

    #[test]
    fn normalized_output_is_in_unit_range() {
        let data = (0..64).map(|i| ((i * 37) % 255) as f32).collect();
        let configs = [
            NormalizeConfig::default(),
            NormalizeConfig {
                equalize: false,
                smoothing: SmoothingFilter::None,
            },
            NormalizeConfig {
                equalize: true,
                smoothing: SmoothingFilter::Gaussian { sigma: 1.2 },
            },
        ];
        let m = matrix(8, 8, data);
        for config in configs {
            let out = normalize(&m, &config);
            assert_unit_range(&out);
            let (lo, hi) = out.min_max();
            assert_eq!((lo, hi), (0.0, 1.0));
        }
    }
}
