pub mod preprocessing;
pub mod contours;

use image::{DynamicImage, GrayImage};

use crate::config::{Binarization, ContourRetrieval, ShaperConfig};
use crate::models::Rect;

/// Result of running detection over one photo
#[derive(Debug)]
pub struct Detection {
    /// Grayscale conversion of the input
    pub gray: GrayImage,
    /// Threshold or edge mask the contours were traced on
    pub mask: GrayImage,
    /// Padded bounding rectangles, in trace order
    pub rects: Vec<Rect>,
}

/// Preprocess a photo and locate candidate objects in it
#[derive(Debug, Clone)]
pub struct DetectionPipeline {
    pub blur: f32,
    pub binarization: Binarization,
    pub invert: bool,
    pub retrieval: ContourRetrieval,
    pub min_size: u32,
    pub padding: u32,
}

impl DetectionPipeline {
    pub fn new(config: &ShaperConfig) -> Self {
        Self {
            blur: config.blur,
            binarization: config.binarization,
            invert: config.invert,
            retrieval: config.retrieval,
            min_size: config.min_size,
            padding: config.padding,
        }
    }

    /// Run preprocessing and contour extraction on an image
    pub fn detect(&self, img: &DynamicImage) -> Detection {
        log::debug!(
            "Preprocessing {}x{} image ({:?}, blur {})",
            img.width(),
            img.height(),
            self.binarization,
            self.blur
        );
        let preprocessing::Preprocessed { gray, mask } =
            preprocessing::preprocess(img, self.blur, self.binarization, self.invert);

        log::debug!("Finding contours ({:?})...", self.retrieval);
        let rects = contours::extract_rects(&mask, self.retrieval, self.min_size, self.padding);

        for (i, rect) in rects.iter().enumerate() {
            log::debug!(
                "  Region {}: ({}, {}) {}x{}",
                i,
                rect.x,
                rect.y,
                rect.width,
                rect.height
            );
        }

        Detection { gray, mask, rects }
    }
}

impl Default for DetectionPipeline {
    fn default() -> Self {
        Self::new(&ShaperConfig::default())
    }
}
