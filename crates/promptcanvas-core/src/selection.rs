//! Selection set, resize handles and resize math.

use crate::elements::ElementId;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// The set of selected element ids, in selection order.
///
/// When exactly one id is selected it is the primary element, which drives
/// the resize handles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<ElementId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection with a single element.
    pub fn select_only(&mut self, id: ElementId) {
        self.ids.clear();
        self.ids.push(id);
    }

    pub fn add(&mut self, id: ElementId) {
        if !self.ids.contains(&id) {
            self.ids.push(id);
        }
    }

    pub fn set(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        self.ids.clear();
        for id in ids {
            self.add(id);
        }
    }

    pub fn remove(&mut self, id: ElementId) {
        self.ids.retain(|&s| s != id);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drop ids for which `exists` is false.
    pub fn retain(&mut self, exists: impl Fn(ElementId) -> bool) {
        self.ids.retain(|&id| exists(id));
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[ElementId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The single selected element, if exactly one is selected.
    pub fn primary(&self) -> Option<ElementId> {
        match self.ids.as_slice() {
            [id] => Some(*id),
            _ => None,
        }
    }
}

/// Resize handle positions, named by the edges they move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl HandleKind {
    pub const ALL: [HandleKind; 8] = [
        HandleKind::TopLeft,
        HandleKind::Top,
        HandleKind::TopRight,
        HandleKind::Right,
        HandleKind::BottomRight,
        HandleKind::Bottom,
        HandleKind::BottomLeft,
        HandleKind::Left,
    ];

    /// Short name: `t`, `b`, `l`, `r` for the edges involved.
    pub fn name(&self) -> &'static str {
        match self {
            HandleKind::TopLeft => "tl",
            HandleKind::Top => "t",
            HandleKind::TopRight => "tr",
            HandleKind::Right => "r",
            HandleKind::BottomRight => "br",
            HandleKind::Bottom => "b",
            HandleKind::BottomLeft => "bl",
            HandleKind::Left => "l",
        }
    }

    pub fn moves_left(&self) -> bool {
        self.name().contains('l')
    }

    pub fn moves_right(&self) -> bool {
        self.name().contains('r')
    }

    pub fn moves_top(&self) -> bool {
        self.name().contains('t')
    }

    pub fn moves_bottom(&self) -> bool {
        self.name().contains('b')
    }

    /// Where this handle sits on `rect`.
    pub fn position(&self, rect: Rect) -> Point {
        let center = rect.center();
        let x = if self.moves_left() {
            rect.x0
        } else if self.moves_right() {
            rect.x1
        } else {
            center.x
        };
        let y = if self.moves_top() {
            rect.y0
        } else if self.moves_bottom() {
            rect.y1
        } else {
            center.y
        };
        Point::new(x, y)
    }
}

/// A resize handle with its position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Position in canvas coordinates.
    pub position: Point,
    pub kind: HandleKind,
}

impl Handle {
    /// Square hit-test around the handle center.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        (point.x - self.position.x).abs() <= tolerance && (point.y - self.position.y).abs() <= tolerance
    }
}

/// All eight handles for a frame.
pub fn get_handles(rect: Rect) -> Vec<Handle> {
    HandleKind::ALL
        .into_iter()
        .map(|kind| Handle {
            position: kind.position(rect),
            kind,
        })
        .collect()
}

/// Find which handle (if any) is hit at the given point.
pub fn hit_test_handles(rect: Rect, point: Point, tolerance: f64) -> Option<HandleKind> {
    get_handles(rect)
        .into_iter()
        .find(|handle| handle.hit_test(point, tolerance))
        .map(|handle| handle.kind)
}

/// Resize `original` by dragging `handle` by `delta`.
///
/// Leading edges (left/top) move the position and shrink the size; trailing
/// edges only change the size. Both dimensions are floored at `min_size`,
/// and a floored leading edge is pinned so the opposite edge stays put.
/// With `keep_aspect`, one dimension is re-derived from the other using the
/// original ratio: width from height when a top/bottom edge is involved,
/// height from width otherwise.
pub fn apply_resize(original: Rect, handle: HandleKind, delta: Vec2, keep_aspect: bool, min_size: f64) -> Rect {
    let (ox, oy) = (original.x0, original.y0);
    let (ow, oh) = (original.width(), original.height());

    let mut width = ow;
    let mut height = oh;
    if handle.moves_left() {
        width = ow - delta.x;
    } else if handle.moves_right() {
        width = ow + delta.x;
    }
    if handle.moves_top() {
        height = oh - delta.y;
    } else if handle.moves_bottom() {
        height = oh + delta.y;
    }

    width = width.max(min_size);
    height = height.max(min_size);

    if keep_aspect && ow > 0.0 && oh > 0.0 {
        let aspect = ow / oh;
        if handle.moves_top() || handle.moves_bottom() {
            width = height * aspect;
            if width < min_size {
                width = min_size;
                height = width / aspect;
            }
        } else {
            height = width / aspect;
            if height < min_size {
                height = min_size;
                width = height * aspect;
            }
        }
    }

    let x = if handle.moves_left() { ox + ow - width } else { ox };
    let y = if handle.moves_top() { oy + oh - height } else { oy };
    Rect::new(x, y, x + width, y + height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    const MIN: f64 = 10.0;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_primary_only_for_single() {
        let mut selection = Selection::new();
        assert!(selection.primary().is_none());
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        selection.select_only(a);
        assert_eq!(selection.primary(), Some(a));
        selection.add(b);
        assert!(selection.primary().is_none());
        selection.add(b);
        assert_eq!(selection.len(), 2);
        selection.remove(a);
        assert_eq!(selection.primary(), Some(b));
    }

    #[test]
    fn test_handle_edges() {
        assert!(HandleKind::TopLeft.moves_left() && HandleKind::TopLeft.moves_top());
        assert!(HandleKind::Right.moves_right() && !HandleKind::Right.moves_top());
        assert!(HandleKind::Bottom.moves_bottom() && !HandleKind::Bottom.moves_left());
    }

    #[test]
    fn test_handle_hit() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(hit_test_handles(rect, Point::new(101.0, 49.0), 4.0), Some(HandleKind::BottomRight));
        assert_eq!(hit_test_handles(rect, Point::new(50.0, -2.0), 4.0), Some(HandleKind::Top));
        assert_eq!(hit_test_handles(rect, Point::new(50.0, 25.0), 4.0), None);
    }

    #[test]
    fn test_right_handle_grows_width_only() {
        let r = apply_resize(Rect::new(10.0, 10.0, 60.0, 40.0), HandleKind::Right, Vec2::new(20.0, 99.0), false, MIN);
        assert_eq!(r, Rect::new(10.0, 10.0, 80.0, 40.0));
    }

    #[test]
    fn test_left_handle_moves_position() {
        let r = apply_resize(Rect::new(10.0, 10.0, 60.0, 40.0), HandleKind::Left, Vec2::new(5.0, 0.0), false, MIN);
        assert_eq!(r, Rect::new(15.0, 10.0, 60.0, 40.0));
    }

    #[test]
    fn test_floor_pins_trailing_edge() {
        let original = Rect::new(10.0, 10.0, 60.0, 40.0);
        let r = apply_resize(original, HandleKind::TopLeft, Vec2::new(500.0, 500.0), false, MIN);
        assert!(approx(r.width(), MIN));
        assert!(approx(r.height(), MIN));
        assert!(approx(r.x1, 60.0));
        assert!(approx(r.y1, 40.0));

        let r = apply_resize(original, HandleKind::BottomRight, Vec2::new(-500.0, -500.0), false, MIN);
        assert!(approx(r.x0, 10.0) && approx(r.y0, 10.0));
        assert!(approx(r.width(), MIN) && approx(r.height(), MIN));
    }

    #[test]
    fn test_aspect_lock_width_from_height_on_corner() {
        // 2:1 frame, bottom-right corner dragged down by 10.
        let original = Rect::new(0.0, 0.0, 100.0, 50.0);
        let r = apply_resize(original, HandleKind::BottomRight, Vec2::new(0.0, 10.0), true, MIN);
        assert!(approx(r.height(), 60.0));
        assert!(approx(r.width(), 120.0));
        assert!(approx(r.x0, 0.0) && approx(r.y0, 0.0));
    }

    #[test]
    fn test_aspect_lock_height_from_width_on_side() {
        let original = Rect::new(0.0, 0.0, 100.0, 50.0);
        let r = apply_resize(original, HandleKind::Left, Vec2::new(-100.0, 0.0), true, MIN);
        assert!(approx(r.width(), 200.0));
        assert!(approx(r.height(), 100.0));
        assert!(approx(r.x1, 100.0));
    }

    #[test]
    fn test_aspect_lock_respects_floor() {
        // Tall 1:4 frame: width-from-height would drop below the floor.
        let original = Rect::new(0.0, 0.0, 20.0, 80.0);
        let r = apply_resize(original, HandleKind::TopRight, Vec2::new(0.0, 1000.0), true, MIN);
        assert!(r.width() >= MIN - 1e-9);
        assert!(r.height() >= MIN - 1e-9);
        assert!(approx(r.y1, 80.0));

        // Wide 4:1 frame dragged from the side.
        let original = Rect::new(0.0, 0.0, 80.0, 20.0);
        let r = apply_resize(original, HandleKind::Right, Vec2::new(-1000.0, 0.0), true, MIN);
        assert!(r.width() >= MIN - 1e-9);
        assert!(r.height() >= MIN - 1e-9);
    }

    #[test]
    fn test_floor_holds_for_any_drag() {
        let original = Rect::new(5.0, 5.0, 45.0, 25.0);
        for handle in HandleKind::ALL {
            for &(dx, dy) in &[(-300.0, -300.0), (300.0, 300.0), (-300.0, 300.0), (300.0, -300.0)] {
                for keep in [false, true] {
                    let r = apply_resize(original, handle, Vec2::new(dx, dy), keep, MIN);
                    assert!(r.width() >= MIN - 1e-9, "{handle:?} {dx} {dy} {keep}");
                    assert!(r.height() >= MIN - 1e-9, "{handle:?} {dx} {dy} {keep}");
                }
            }
        }
    }
}
