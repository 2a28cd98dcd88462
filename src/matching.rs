//! Pairing regions across two photos of the same objects.
//!
//! Both photos are assumed to share roughly the same framing: a region is
//! paired with another when their areas are similar and they overlap in
//! place. Large camera movement between shots defeats this.

use crate::models::{Rect, RectPair};

/// Largest relative area difference two regions may have and still match
pub const MAX_AREA_DIFFERENCE: f64 = 0.2;

/// Whether two regions plausibly show the same object.
///
/// The larger area may exceed the smaller by at most 20%. Comparing larger
/// against smaller keeps the predicate symmetric.
pub fn rect_compare(a: &Rect, b: &Rect) -> bool {
    let (sa, sb) = (a.area(), b.area());
    if sa == 0 || sb == 0 {
        return false;
    }

    let larger = sa.max(sb) as f64;
    let smaller = sa.min(sb) as f64;
    if larger / smaller - 1.0 > MAX_AREA_DIFFERENCE {
        return false;
    }

    a.intersection(b).is_some_and(|overlap| overlap.area() > 0)
}

/// Every matching pair across the two lists, first list in the outer loop.
///
/// A region may appear in any number of pairs.
pub fn match_rects(first: &[Rect], second: &[Rect]) -> Vec<RectPair> {
    first
        .iter()
        .flat_map(|a| {
            second
                .iter()
                .filter(move |b| rect_compare(a, b))
                .map(move |b| RectPair {
                    first: *a,
                    second: *b,
                })
        })
        .collect()
}
