//! Crop-box state for an image being cropped.

use crate::elements::ElementId;
use crate::selection::{HandleKind, apply_resize, hit_test_handles};
use kurbo::{Point, Rect};

/// An in-progress drag of the crop box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropDrag {
    pub start: Point,
    pub origin: Rect,
    /// Handle being dragged, or `None` for a plain translate.
    pub handle: Option<HandleKind>,
}

/// Cropping mode: the target image and the proposed frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CropState {
    pub target: ElementId,
    pub rect: Rect,
    pub drag: Option<CropDrag>,
}

impl CropState {
    pub fn new(target: ElementId, rect: Rect) -> Self {
        Self {
            target,
            rect,
            drag: None,
        }
    }

    /// Start dragging at `point`. A hit on one of the box's handles resizes,
    /// anywhere else translates.
    pub fn begin_drag(&mut self, point: Point, tolerance: f64) {
        let handle = hit_test_handles(self.rect, point, tolerance);
        self.drag = Some(CropDrag {
            start: point,
            origin: self.rect,
            handle,
        });
    }

    pub fn drag_to(&mut self, point: Point, min_size: f64) {
        let Some(drag) = self.drag else {
            return;
        };
        let delta = point - drag.start;
        self.rect = match drag.handle {
            Some(handle) => apply_resize(drag.origin, handle, delta, false, min_size),
            None => drag.origin + delta,
        };
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}
