use image::{DynamicImage, GrayImage, Luma};
use imageproc::contrast::{otsu_level, threshold, ThresholdType};
use imageproc::filter::gaussian_blur_f32;
use imageproc::gradients::{horizontal_sobel, vertical_sobel};

use crate::config::Binarization;

/// Convert image to grayscale
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// Odd Gaussian kernel size proportional to the shorter image side.
///
/// Never smaller than 1, so a zero blur fraction yields the identity kernel.
pub fn blur_kernel_size(width: u32, height: u32, blur: f32) -> u32 {
    let raw = (width.min(height) as f32 * blur.max(0.0) * 0.25).round() as u32;
    if raw % 2 == 0 { raw + 1 } else { raw }
}

/// Sigma matching a Gaussian kernel of the given odd size
pub fn kernel_sigma(kernel_size: u32) -> f32 {
    0.3 * ((kernel_size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Apply Gaussian blur with a kernel of `kernel_size` pixels
pub fn apply_blur(img: &GrayImage, kernel_size: u32) -> GrayImage {
    if kernel_size <= 1 {
        return img.clone();
    }
    gaussian_blur_f32(img, kernel_sigma(kernel_size))
}

/// Binary mask: pixels above `level` become 255, everything else 0
pub fn apply_threshold(img: &GrayImage, level: u8) -> GrayImage {
    threshold(img, level, ThresholdType::Binary)
}

/// Binary mask with the level chosen by Otsu's method
pub fn apply_otsu(img: &GrayImage) -> GrayImage {
    let level = otsu_level(img);
    log::debug!("Otsu level: {}", level);
    apply_threshold(img, level)
}

/// Edge strength as the average of absolute horizontal and vertical Sobel responses
pub fn detect_edges(img: &GrayImage) -> GrayImage {
    let gx = horizontal_sobel(img);
    let gy = vertical_sobel(img);

    let mut edges = GrayImage::new(img.width(), img.height());
    for ((out, dx), dy) in edges.pixels_mut().zip(gx.pixels()).zip(gy.pixels()) {
        let ax = dx[0].unsigned_abs().min(255) as f32;
        let ay = dy[0].unsigned_abs().min(255) as f32;
        *out = Luma([(0.5 * ax + 0.5 * ay).round() as u8]);
    }
    edges
}

/// Swap foreground and background
pub fn invert_mask(mask: &GrayImage) -> GrayImage {
    let mut inverted = mask.clone();
    image::imageops::invert(&mut inverted);
    inverted
}

/// Intermediate images produced while turning a photo into a contour mask
pub struct Preprocessed {
    pub gray: GrayImage,
    pub mask: GrayImage,
}

/// Grayscale, blur, then binarize or edge-filter an image
pub fn preprocess(
    img: &DynamicImage,
    blur: f32,
    binarization: Binarization,
    invert: bool,
) -> Preprocessed {
    let gray = to_grayscale(img);

    let kernel = blur_kernel_size(gray.width(), gray.height(), blur);
    log::debug!("Gaussian blur kernel: {}px", kernel);
    let blurred = apply_blur(&gray, kernel);

    let mask = match binarization {
        Binarization::Fixed { level } => apply_threshold(&blurred, level),
        Binarization::Otsu => apply_otsu(&blurred),
        Binarization::Sobel => detect_edges(&blurred),
    };

    let mask = if invert && binarization != Binarization::Sobel {
        invert_mask(&mask)
    } else {
        mask
    };

    Preprocessed { gray, mask }
}
