//! Bounding boxes, hit-testing and box membership.
//!
//! All functions work in canvas space. Ordering matters for [`hit_test`]:
//! elements later in the slice are painted on top, so the scan runs back
//! to front.

use crate::elements::Element;
use kurbo::{Point, Rect};

/// Axis-aligned bounds of an element.
///
/// Images and shapes return their frame. Paths return the bounding box of
/// their points; an empty path is a zero rect at the origin.
pub fn bounds_of(element: &Element) -> Rect {
    match element {
        Element::Image(img) => img.rect(),
        Element::Shape(shape) => shape.rect(),
        Element::Path(path) => points_bounds(&path.points),
    }
}

fn points_bounds(points: &[Point]) -> Rect {
    let Some(first) = points.first() else {
        return Rect::ZERO;
    };
    points
        .iter()
        .skip(1)
        .fold(Rect::from_points(*first, *first), |rect, p| rect.union_pt(*p))
}

/// Inclusive containment: points on the edge count as inside.
pub fn contains_inclusive(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Whether `point` hits `element`.
///
/// Paths use their bounding box (coarse, not stroke distance).
pub fn element_contains(element: &Element, point: Point) -> bool {
    contains_inclusive(bounds_of(element), point)
}

/// Return the topmost element under `point`.
pub fn hit_test(point: Point, elements: &[Element]) -> Option<&Element> {
    elements.iter().rev().find(|el| element_contains(el, point))
}

/// Rubber-band membership.
///
/// A path is inside if any of its points lies in the box (inclusive). An
/// image or shape is inside if its frame overlaps the box (strict AABB test).
pub fn in_box(element: &Element, selection: Rect) -> bool {
    match element {
        Element::Path(path) => path.points.iter().any(|p| contains_inclusive(selection, *p)),
        Element::Image(_) | Element::Shape(_) => {
            let frame = bounds_of(element);
            frame.x0 < selection.x1
                && frame.x1 > selection.x0
                && frame.y0 < selection.y1
                && frame.y1 > selection.y0
        }
    }
}

/// The sign-corrected rectangle spanned by two corner points.
pub fn span_rect(start: Point, current: Point) -> Rect {
    Rect::from_points(start, current)
}
