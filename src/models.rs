use imageproc::point::Point;

/// Axis-aligned rectangle in image pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Smallest rectangle covering the inclusive corner coordinates
    pub fn from_corners(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Self {
        Self {
            x: min_x,
            y: min_y,
            width: max_x - min_x + 1,
            height: max_y - min_y + 1,
        }
    }

    /// Exclusive right edge
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether the rectangle lies entirely within an image of the given size
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        !self.is_empty() && self.right() <= width && self.bottom() <= height
    }

    /// Overlapping region of two rectangles, if they share any pixels
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x >= right || y >= bottom {
            return None;
        }

        Some(Rect::new(x, y, right - x, bottom - y))
    }

    /// Grow by `padding` on every side, clamped to `[0, width) x [0, height)`
    pub fn padded(&self, padding: u32, width: u32, height: u32) -> Rect {
        let x = self.x.saturating_sub(padding).min(width.saturating_sub(1));
        let y = self.y.saturating_sub(padding).min(height.saturating_sub(1));
        let right = self.right().saturating_add(padding).min(width);
        let bottom = self.bottom().saturating_add(padding).min(height);

        Rect {
            x,
            y,
            width: right.saturating_sub(x),
            height: bottom.saturating_sub(y),
        }
    }
}

/// A rectangle in the first photo matched with one in the second
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectPair {
    pub first: Rect,
    pub second: Rect,
}

/// Boundary polygon of one connected foreground region
#[derive(Debug, Clone)]
pub struct Contour {
    pub points: Vec<Point<u32>>,
}

impl Contour {
    /// Smallest axis-aligned rectangle containing every point
    pub fn bounding_rect(&self) -> Option<Rect> {
        let first = self.points.first()?;
        let (mut min_x, mut min_y) = (first.x, first.y);
        let (mut max_x, mut max_y) = (first.x, first.y);

        for p in &self.points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        Some(Rect::from_corners(min_x, min_y, max_x, max_y))
    }
}
