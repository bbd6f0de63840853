// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor: decoding, grayscale conversion, and cropping of page
// images. Operates on in-memory images using the `image` crate.

use bordercut_core::error::{BordercutError, Result};
use bordercut_core::types::CropRectangle;
use image::{DynamicImage, GrayImage, ImageFormat};
use tracing::{debug, info, instrument};

/// A single decoded page image.
///
/// Transformations consume `self` and return a new `ImageProcessor`, enabling
/// method chaining.
///
/// ```ignore
/// let rect = detector.detect_gray(&ImageProcessor::open("page.tif")?.to_gray())?;
/// ImageProcessor::open("page.tif")?
///     .crop(&rect)?
///     .save("page-cropped.png")?;
/// ```
pub struct ImageProcessor {
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let img = image::open(path.as_ref()).map_err(|err| {
            BordercutError::ImageError(format!(
                "failed to open {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        info!(width = img.width(), height = img.height(), "Image loaded");
        Ok(Self { image: img })
    }

    /// Create a processor from raw encoded bytes (PNG, TIFF, JPEG, etc.).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(data).map_err(|err| {
            BordercutError::ImageError(format!("failed to decode image: {}", err))
        })?;
        debug!(
            width = img.width(),
            height = img.height(),
            "Image decoded from bytes"
        );
        Ok(Self { image: img })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Consume the processor and return the underlying `DynamicImage`.
    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    /// 8-bit luma copy of the page, the input the detector works on.
    pub fn to_gray(&self) -> GrayImage {
        self.image.to_luma8()
    }

    // -- Transformations ------------------------------------------------------

    /// Crop to a detected rectangle. A rectangle that overhangs the image is
    /// clamped to its bounds. An empty rectangle, or one whose origin lies
    /// outside the image, is an error because no pixels would remain.
    #[instrument(skip_all, fields(rect = %rect))]
    pub fn crop(self, rect: &CropRectangle) -> Result<Self> {
        let rect = rect.non_empty()?;
        let img_w = self.image.width() as usize;
        let img_h = self.image.height() as usize;

        if rect.x >= img_w || rect.y >= img_h {
            return Err(BordercutError::ImageError(format!(
                "crop {rect} starts outside the {img_w}x{img_h} image"
            )));
        }

        let safe_x = rect.x as u32;
        let safe_y = rect.y as u32;
        let safe_w = rect.width.min(img_w - rect.x) as u32;
        let safe_h = rect.height.min(img_h - rect.y) as u32;

        info!(safe_x, safe_y, safe_w, safe_h, "Cropping image");

        let cropped = self.image.crop_imm(safe_x, safe_y, safe_w, safe_h);
        Ok(Self { image: cropped })
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);
        self.image
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|err| BordercutError::ImageError(format!("image encoding failed: {}", err)))?;
        Ok(buffer)
    }

    /// Write the image to a file. The format is inferred from the file extension.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        self.image.save(path.as_ref()).map_err(|err| {
            BordercutError::ImageError(format!(
                "failed to save image to {}: {}",
                path.as_ref().display(),
                err
            ))
        })
    }
}
