// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Bordercut.

use thiserror::Error;

/// Top-level error type for all Bordercut operations.
#[derive(Debug, Error)]
pub enum BordercutError {
    // -- Input validation --
    #[error("invalid image dimensions: {height}x{width} (both must be at least 1)")]
    InvalidDimensions { height: usize, width: usize },

    #[error("pixel buffer has {actual} values, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // -- Detection outcome --
    #[error("border scan left nothing to keep (geometry {geometry})")]
    EmptyCrop { geometry: String },

    // -- Image I/O --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BordercutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_message_names_both_axes() {
        let err = BordercutError::InvalidDimensions {
            height: 0,
            width: 12,
        };
        assert_eq!(
            err.to_string(),
            "invalid image dimensions: 0x12 (both must be at least 1)"
        );
    }

    #[test]
    fn io_errors_convert_with_question_mark() {
        fn read_missing() -> Result<Vec<u8>> {
            Ok(std::fs::read("/definitely/not/a/real/path.png")?)
        }
        assert!(matches!(read_missing(), Err(BordercutError::Io(_))));
    }
}
