use image::{imageops, RgbImage, SubImage};

use crate::error::{Result, ShaperError};
use crate::models::Rect;

/// Borrowed window into `img` covering `rect`
pub fn view<'a>(img: &'a RgbImage, rect: &Rect) -> Result<SubImage<&'a RgbImage>> {
    let (width, height) = img.dimensions();
    if !rect.fits_within(width, height) {
        return Err(ShaperError::Crop {
            rect: *rect,
            width,
            height,
        });
    }
    Ok(imageops::crop_imm(img, rect.x, rect.y, rect.width, rect.height))
}

/// Copy of the region of `img` bounded by `rect`
pub fn crop(img: &RgbImage, rect: &Rect) -> Result<RgbImage> {
    Ok(view(img, rect)?.to_image())
}

/// Both regions side by side, `first` on the left, top-aligned, unscaled.
///
/// Uncovered pixels below the shorter crop stay black.
pub fn compose(
    first: &RgbImage,
    first_rect: &Rect,
    second: &RgbImage,
    second_rect: &Rect,
) -> Result<RgbImage> {
    let left = crop(first, first_rect)?;
    let right = crop(second, second_rect)?;

    let mut canvas = RgbImage::new(
        first_rect.width + second_rect.width,
        first_rect.height.max(second_rect.height),
    );
    imageops::replace(&mut canvas, &left, 0, 0);
    imageops::replace(&mut canvas, &right, first_rect.width as i64, 0);

    Ok(canvas)
}
