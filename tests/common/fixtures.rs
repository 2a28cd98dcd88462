#![allow(dead_code)]

use std::path::{Path, PathBuf};

use coinshaper::Rect;
use image::{GrayImage, Luma, Rgb, RgbImage};

pub const BRIGHT: Rgb<u8> = Rgb([230, 220, 200]);
pub const DARK: Rgb<u8> = Rgb([10, 10, 10]);

/// Creates an image of `background` with every rect filled with `fill`.
pub fn blobs_image(
    width: u32,
    height: u32,
    blobs: &[Rect],
    fill: Rgb<u8>,
    background: Rgb<u8>,
) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let inside = blobs
            .iter()
            .any(|b| x >= b.x && x < b.right() && y >= b.y && y < b.bottom());
        if inside { fill } else { background }
    })
}

/// Bright blobs on a dark background
pub fn bright_blobs(width: u32, height: u32, blobs: &[Rect]) -> RgbImage {
    blobs_image(width, height, blobs, BRIGHT, DARK)
}

/// Binary mask with every rect set to 255
pub fn mask_with(width: u32, height: u32, blobs: &[Rect]) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| {
        let inside = blobs
            .iter()
            .any(|b| x >= b.x && x < b.right() && y >= b.y && y < b.bottom());
        Luma([if inside { 255 } else { 0 }])
    })
}

/// Saves an image as PNG inside `dir` and returns its path.
/// PNG keeps the input lossless so detection sees exact edges.
pub fn save_png(dir: &Path, name: &str, img: &RgbImage) -> PathBuf {
    let path = dir.join(name);
    img.save_with_format(&path, image::ImageFormat::Png)
        .expect("Failed to save test image");
    path
}

/// Creates a temporary directory for inputs plus the output path inside it.
/// The directory is removed when the returned handle is dropped.
pub fn temp_workspace() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::TempDir::new().expect("Failed to create temp directory");
    let out = dir.path().join("out");
    (dir, out)
}

/// Dimensions of an image file on disk
pub fn image_dimensions(path: &Path) -> (u32, u32) {
    image::image_dimensions(path).expect("Failed to read output image")
}
