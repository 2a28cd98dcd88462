//! Run configuration.
//!
//! A [`ShaperConfig`] is built once from the command line and handed to the
//! pipeline; nothing mutates it afterwards.

use std::path::PathBuf;

pub const DEFAULT_OUTPUT_DIR: &str = "tempCoinsShaper";
pub const DEFAULT_BLUR: f32 = 0.05;
pub const DEFAULT_THRESHOLD: u8 = 50;
pub const DEFAULT_MIN_SIZE: u32 = 10;
pub const DEFAULT_PADDING: u32 = 30;

/// How the blurred grayscale image is turned into a mask for contour tracing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binarization {
    /// Pixels brighter than `level` become foreground
    Fixed { level: u8 },
    /// Level picked from the image histogram (Otsu's method)
    Otsu,
    /// Averaged absolute Sobel derivatives instead of a binary mask
    Sobel,
}

impl Binarization {
    /// Stage name used for the saved intermediate image
    pub fn stage_name(&self) -> &'static str {
        match self {
            Binarization::Fixed { .. } | Binarization::Otsu => "Threshold",
            Binarization::Sobel => "Sobel",
        }
    }
}

impl Default for Binarization {
    fn default() -> Self {
        Binarization::Fixed {
            level: DEFAULT_THRESHOLD,
        }
    }
}

/// Which traced borders produce rectangles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContourRetrieval {
    /// Outermost borders only
    #[default]
    External,
    /// Every border, including holes and nested regions
    Tree,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShaperConfig {
    /// Blur strength as a fraction of the shorter image side, in [0, 1]
    pub blur: f32,
    pub binarization: Binarization,
    /// Invert the thresholded mask so dark objects on a light background are found
    pub invert: bool,
    pub retrieval: ContourRetrieval,
    /// Regions this size or smaller in either dimension are discarded
    pub min_size: u32,
    /// Margin added around each bounding rectangle
    pub padding: u32,
    /// Write grayscale and mask stages next to the crops
    pub save_processed: bool,
    pub output_dir: PathBuf,
}

impl ShaperConfig {
    pub fn new() -> Self {
        Self {
            blur: DEFAULT_BLUR,
            binarization: Binarization::default(),
            invert: false,
            retrieval: ContourRetrieval::default(),
            min_size: DEFAULT_MIN_SIZE,
            padding: DEFAULT_PADDING,
            save_processed: false,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }

    pub fn with_blur(mut self, blur: f32) -> Self {
        self.blur = if blur.is_nan() { 0.0 } else { blur.clamp(0.0, 1.0) };
        self
    }

    pub fn with_binarization(mut self, binarization: Binarization) -> Self {
        self.binarization = binarization;
        self
    }

    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    pub fn with_retrieval(mut self, retrieval: ContourRetrieval) -> Self {
        self.retrieval = retrieval;
        self
    }

    pub fn with_min_size(mut self, min_size: u32) -> Self {
        self.min_size = min_size;
        self
    }

    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_save_processed(mut self, save_processed: bool) -> Self {
        self.save_processed = save_processed;
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }
}

impl Default for ShaperConfig {
    fn default() -> Self {
        Self::new()
    }
}
