use image::{imageops, GrayImage};
use imageproc::contours::{find_contours, BorderType};
use imageproc::point::Point;

use crate::config::ContourRetrieval;
use crate::models::{Contour, Rect};

/// Copy of `mask` inside a one-pixel background frame.
///
/// Border following only starts an outer border next to a background pixel,
/// so regions touching the image edge need the frame to be traced.
fn with_background_frame(mask: &GrayImage) -> GrayImage {
    let mut framed = GrayImage::new(mask.width() + 2, mask.height() + 2);
    imageops::replace(&mut framed, mask, 1, 1);
    framed
}

/// Trace region borders in a mask. Any non-zero pixel counts as foreground.
pub fn trace_contours(mask: &GrayImage, retrieval: ContourRetrieval) -> Vec<Contour> {
    find_contours::<u32>(&with_background_frame(mask))
        .into_iter()
        .filter(|c| match retrieval {
            ContourRetrieval::External => c.border_type == BorderType::Outer && c.parent.is_none(),
            ContourRetrieval::Tree => true,
        })
        .map(|c| {
            // foreground never lies on the frame, so every coordinate is >= 1
            let points: Vec<Point<u32>> =
                c.points.iter().map(|p| Point::new(p.x - 1, p.y - 1)).collect();
            Contour {
                points: simplify_polygon(&points),
            }
        })
        .collect()
}

/// Drop vertices that lie on a straight run between their neighbours.
///
/// The polygon is treated as closed. Direction reversals are kept.
pub fn simplify_polygon(points: &[Point<u32>]) -> Vec<Point<u32>> {
    let mut points = points.to_vec();
    points.dedup();
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }

    let n = points.len();
    if n < 3 {
        return points;
    }

    (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let cur = points[i];
            let next = points[(i + 1) % n];

            let (ax, ay) = (cur.x as i64 - prev.x as i64, cur.y as i64 - prev.y as i64);
            let (bx, by) = (next.x as i64 - cur.x as i64, next.y as i64 - cur.y as i64);

            let cross = ax * by - ay * bx;
            let dot = ax * bx + ay * by;
            cross != 0 || dot < 0
        })
        .map(|i| points[i])
        .collect()
}

/// Remove rectangles that are `min_size` or smaller in either dimension
pub fn filter_small(rects: Vec<Rect>, min_size: u32) -> Vec<Rect> {
    rects
        .into_iter()
        .filter(|r| r.width > min_size && r.height > min_size)
        .collect()
}

/// Bounding rectangles of the mask's regions, filtered and padded.
///
/// Order follows the trace and is stable for a given mask.
pub fn extract_rects(
    mask: &GrayImage,
    retrieval: ContourRetrieval,
    min_size: u32,
    padding: u32,
) -> Vec<Rect> {
    let (img_width, img_height) = mask.dimensions();

    let bounds: Vec<Rect> = trace_contours(mask, retrieval)
        .iter()
        .filter_map(Contour::bounding_rect)
        .collect();
    let traced = bounds.len();

    let rects: Vec<Rect> = filter_small(bounds, min_size)
        .into_iter()
        .map(|r| r.padded(padding, img_width, img_height))
        .collect();

    log::debug!(
        "Traced {} contours, {} larger than {}px",
        traced,
        rects.len(),
        min_size
    );

    rects
}
