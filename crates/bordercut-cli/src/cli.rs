// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments and their mapping onto the detector configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use bordercut_core::config::{SmoothingFilter, TrimConfig};
use bordercut_core::types::WidthLimit;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "bordercut",
    version,
    about = "Print the WxH+X+Y crop that removes black scanner borders and white margins"
)]
pub struct Cli {
    /// Page images to analyse (PNG, TIFF, JPEG, ...)
    #[arg(required = true)]
    pub images: Vec<PathBuf>,

    /// Read detector settings from a JSON file (flags below override it)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Skip histogram equalization
    #[arg(long = "no-equalize")]
    pub no_equalize: bool,

    /// Radius of the mean smoothing window (0 disables smoothing)
    #[arg(long = "smoothing-radius", conflicts_with = "gaussian_sigma")]
    pub smoothing_radius: Option<u32>,

    /// Smooth with a Gaussian of this sigma instead of a mean window
    #[arg(long = "gaussian-sigma")]
    pub gaussian_sigma: Option<f32>,

    /// Normalized intensity at or above which a pixel is ink
    #[arg(long = "binarize-threshold")]
    pub binarize_threshold: Option<f32>,

    /// RLSA gap threshold in pixels (default: image height / 3)
    #[arg(long = "rlsa-threshold")]
    pub rlsa_threshold: Option<usize>,

    /// Column density above which a column belongs to the black border
    #[arg(long = "black-threshold")]
    pub black_threshold: Option<f32>,

    /// Maximum black border width per side (default: image height / 2)
    #[arg(long = "black-max-width")]
    pub black_max_width: Option<usize>,

    /// Column density at or below which a column belongs to the white border
    #[arg(long = "white-threshold")]
    pub white_threshold: Option<f32>,

    /// Maximum white border width per side (default: unbounded)
    #[arg(long = "white-max-width")]
    pub white_max_width: Option<usize>,

    /// Treat a page that is entirely border as an error
    #[arg(long = "fail-on-empty")]
    pub fail_on_empty: bool,

    /// Also write each cropped page as PNG into this directory
    #[arg(short = 'o', long = "crop-output")]
    pub crop_output: Option<PathBuf>,
}

impl Cli {
    /// Build the detector configuration: defaults, then the config file, then flags.
    pub fn trim_config(&self) -> Result<TrimConfig> {
        let mut config = match &self.config {
            Some(path) => TrimConfig::from_json_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => TrimConfig::default(),
        };

        if self.no_equalize {
            config.normalize.equalize = false;
        }
        if let Some(radius) = self.smoothing_radius {
            config.normalize.smoothing = match radius {
                0 => SmoothingFilter::None,
                radius => SmoothingFilter::Mean { radius },
            };
        }
        if let Some(sigma) = self.gaussian_sigma {
            config.normalize.smoothing = SmoothingFilter::Gaussian { sigma };
        }
        if let Some(threshold) = self.binarize_threshold {
            config.binarize_threshold = threshold;
        }
        if let Some(threshold) = self.rlsa_threshold {
            config.rlsa_threshold = Some(threshold);
        }
        if let Some(threshold) = self.black_threshold {
            config.black_border.density_threshold = threshold;
        }
        if let Some(width) = self.black_max_width {
            config.black_border.max_border_width = WidthLimit::Fixed(width);
        }
        if let Some(threshold) = self.white_threshold {
            config.white_border.density_threshold = threshold;
        }
        if let Some(width) = self.white_max_width {
            config.white_border.max_border_width = WidthLimit::Fixed(width);
        }

        config.validate().context("invalid detector settings")?;
        Ok(config)
    }
}
