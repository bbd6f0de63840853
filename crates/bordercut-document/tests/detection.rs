// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// End-to-end border detection through the public API.

use bordercut_core::config::TrimConfig;
use bordercut_core::error::BordercutError;
use bordercut_core::types::{BorderThresholds, CropRectangle, WidthLimit};
use bordercut_document::scan::resolve_crop;
use bordercut_document::{BinaryMatrix, BorderDetector, ImageProcessor, IntensityMatrix};
use image::{DynamicImage, GrayImage, Luma};

/// 30x100 page: columns 0-9 solid ink, 10-89 every fifth row inked like text
/// lines, 90-99 blank paper.
fn framed_text_matrix() -> BinaryMatrix {
    let (h, w) = (30, 100);
    let mut m = BinaryMatrix::zeros(h, w).expect("shape");
    for row in 0..h {
        for col in 0..10 {
            m.set(row, col, true);
        }
        if row % 5 == 2 {
            for col in 10..90 {
                m.set(row, col, true);
            }
        }
    }
    m
}

#[test]
fn frame_and_blank_margin_are_trimmed() {
    let m = framed_text_matrix();
    // Text columns carry 20% ink, so the frame is told apart by a density
    // threshold between that and the frame's 100%.
    let black = BorderThresholds {
        density_threshold: 0.5,
        max_border_width: WidthLimit::Fixed(15),
    };
    let white = BorderThresholds {
        density_threshold: 0.0,
        max_border_width: WidthLimit::Unbounded,
    };

    let rect = resolve_crop(&m, &black, &white);
    assert_eq!(rect, CropRectangle::horizontal(10, 80, 30));
    assert_eq!(rect.to_string(), "80x30+10+0");
}

#[test]
fn zero_black_threshold_runs_into_the_guard() {
    // Every text column carries some ink, so at threshold 0 the black run
    // spans 90 columns, exceeds the half-height guard of 15, and the left
    // trim is cancelled. Only the blank right margin goes.
    let m = framed_text_matrix();
    let rect = resolve_crop(
        &m,
        &BorderThresholds::black_default(),
        &BorderThresholds::white_default(),
    );
    assert_eq!(rect.to_string(), "90x30+0+0");
    assert_eq!(BorderDetector::default().detect_binary(&m), rect);
}

#[test]
fn frame_wider_than_guard_is_kept() {
    let m = framed_text_matrix();
    let black = BorderThresholds {
        density_threshold: 0.5,
        max_border_width: WidthLimit::Fixed(5),
    };
    let rect = resolve_crop(&m, &black, &BorderThresholds::white_default());
    assert_eq!(rect, CropRectangle::horizontal(0, 90, 30));
}

#[test]
fn detector_is_stable_across_runs() {
    let (h, w) = (40, 90);
    let data: Vec<f32> = (0..h * w)
        .map(|i| {
            let (row, col) = (i / w, i % w);
            if col < 6 {
                0.95
            } else if (30..75).contains(&col) && row % 6 < 3 {
                0.85
            } else {
                0.08
            }
        })
        .collect();
    let matrix = IntensityMatrix::from_raw(h, w, data).expect("shape");
    let detector = BorderDetector::default();

    let first = detector.detect(&matrix);
    let second = detector.detect(&matrix);
    assert_eq!(first, second);
    assert_eq!(first.height, h);
    assert_eq!(first.y, 0);
}

#[test]
fn zero_sized_input_is_rejected_before_detection() {
    assert!(matches!(
        IntensityMatrix::from_raw(0, 0, Vec::new()),
        Err(BordercutError::InvalidDimensions { .. })
    ));
}

#[test]
fn detect_path_reads_the_page_from_disk() {
    let (w, h) = (160u32, 60u32);
    let mut img = GrayImage::from_pixel(w, h, Luma([240u8]));
    for y in 0..h {
        for x in 0..6 {
            img.put_pixel(x, y, Luma([5u8]));
        }
    }
    for y in (8..52).filter(|y| y % 8 < 5) {
        for x in 50..120 {
            img.put_pixel(x, y, Luma([20u8]));
        }
    }

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("page.png");
    img.save(&path).expect("write png");

    let detector = BorderDetector::new(TrimConfig::default()).expect("valid config");
    let rect = detector.detect_path(&path).expect("detect");
    assert_eq!(rect, detector.detect_gray(&img).expect("detect in memory"));
    assert!((48..=52).contains(&rect.x), "x = {}", rect.x);

    let cropped = ImageProcessor::from_dynamic(DynamicImage::ImageLuma8(img))
        .crop(&rect)
        .expect("non-empty crop");
    assert_eq!(cropped.width() as usize, rect.width);
    assert_eq!(cropped.height(), h);
}

#[test]
fn missing_file_is_an_image_error() {
    let detector = BorderDetector::default();
    assert!(matches!(
        detector.detect_path("/no/such/page.png"),
        Err(BordercutError::ImageError(_))
    ));
}
