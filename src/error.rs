//! Error types for the coin shaper

use std::path::PathBuf;

use thiserror::Error;

use crate::models::Rect;

/// Result type alias for shaper operations
pub type Result<T> = std::result::Result<T, ShaperError>;

/// Failures that abort a run. Nothing here is retried.
#[derive(Error, Debug)]
pub enum ShaperError {
    /// Input file could not be read or is not an image
    #[error("Failed to decode image {path}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Output image could not be written
    #[error("Failed to write image {path}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Output directory could not be created
    #[error("Failed to create output directory {path}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Crop window does not fit inside the image
    #[error("Rectangle {rect:?} lies outside a {width}x{height} image")]
    Crop { rect: Rect, width: u32, height: u32 },
}

impl ShaperError {
    pub fn decode(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Decode {
            path: path.into(),
            source,
        }
    }

    pub fn encode(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Encode {
            path: path.into(),
            source,
        }
    }
}
