// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Detector configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BordercutError, Result};
use crate::types::{BorderThresholds, WidthLimit};

/// Local smoothing applied after histogram equalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SmoothingFilter {
    /// No smoothing.
    None,
    /// Mean over a `(2 * radius + 1)` square window, clamped at image edges.
    Mean { radius: u32 },
    /// Gaussian blur with the given standard deviation.
    Gaussian { sigma: f32 },
}

/// Intensity normalization settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Run histogram equalization before smoothing.
    pub equalize: bool,
    /// Smoothing filter used to suppress isolated noise pixels.
    pub smoothing: SmoothingFilter,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            equalize: true,
            smoothing: SmoothingFilter::Mean { radius: 2 },
        }
    }
}

/// Complete border-detection settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimConfig {
    pub normalize: NormalizeConfig,
    /// Normalized intensities at or above this become ink.
    pub binarize_threshold: f32,
    /// RLSA gap threshold. `None` uses one third of the image height.
    pub rlsa_threshold: Option<usize>,
    /// Black-border pass (columns denser than the threshold are border).
    pub black_border: BorderThresholds,
    /// White-border pass (columns at or below the threshold are border).
    pub white_border: BorderThresholds,
}

impl Default for TrimConfig {
    fn default() -> Self {
        Self {
            normalize: NormalizeConfig::default(),
            binarize_threshold: 0.5,
            rlsa_threshold: None,
            black_border: BorderThresholds::black_default(),
            white_border: BorderThresholds::white_default(),
        }
    }
}

impl TrimConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// RLSA threshold for an image of the given height.
    pub fn rlsa_threshold_for(&self, height: usize) -> usize {
        self.rlsa_threshold.unwrap_or(height / 3)
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.binarize_threshold) {
            return Err(BordercutError::InvalidConfig(format!(
                "binarize_threshold must lie in [0, 1], got {}",
                self.binarize_threshold
            )));
        }
        if let SmoothingFilter::Gaussian { sigma } = self.normalize.smoothing {
            if !(sigma.is_finite() && sigma > 0.0) {
                return Err(BordercutError::InvalidConfig(format!(
                    "gaussian sigma must be positive, got {sigma}"
                )));
            }
        }
        if self.rlsa_threshold == Some(0) {
            return Err(BordercutError::InvalidConfig(
                "rlsa_threshold must be at least 1".into(),
            ));
        }
        let passes = [
            ("black_border", &self.black_border),
            ("white_border", &self.white_border),
        ];
        for (name, pass) in passes {
            if !(0.0..=1.0).contains(&pass.density_threshold) {
                return Err(BordercutError::InvalidConfig(format!(
                    "{name}.density_threshold must lie in [0, 1], got {}",
                    pass.density_threshold
                )));
            }
            if pass.max_border_width == WidthLimit::Fixed(0) {
                return Err(BordercutError::InvalidConfig(format!(
                    "{name}.max_border_width must be at least 1 when fixed"
                )));
            }
        }
        Ok(())
    }
}
