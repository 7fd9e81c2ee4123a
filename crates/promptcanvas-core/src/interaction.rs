//! Pointer-driven interaction state machine.
//!
//! A gesture runs from pointer-down to pointer-up. Moves mutate the live
//! document directly; the whole gesture becomes one history entry when it
//! ends.

use crate::canvas::Canvas;
use crate::document::Document;
use crate::elements::{DragOrigin, Element, ElementId};
use crate::geometry::span_rect;
use crate::input::{Modifiers, PointerEvent};
use crate::selection::{HandleKind, Selection, apply_resize, hit_test_handles};
use crate::tools::{ToolKind, create_element};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Coarse interaction state, as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Idle,
    Drawing,
    Moving,
    Resizing,
}

/// Transient per-gesture context. Created on pointer-down, consumed on
/// pointer-up.
#[derive(Debug, Clone, Default)]
pub(crate) enum Gesture {
    #[default]
    Idle,
    /// Select tool dragging over empty canvas.
    RubberBand { start: Point, rect: Rect },
    /// Freehand path being drawn.
    Draw { id: ElementId },
    /// Shape being sized from its anchor corner.
    Shape { id: ElementId, start: Point },
    /// Erase drag; counts removed elements.
    Erase { erased: usize },
    /// Selected elements being dragged, with their positions at drag start.
    Move {
        start: Point,
        origins: HashMap<ElementId, DragOrigin>,
    },
    /// View pan; anchored at the last screen point seen.
    Pan { last_screen: Point },
    /// Primary element being resized by a handle.
    Resize {
        id: ElementId,
        handle: HandleKind,
        start: Point,
        original: Rect,
        keep_aspect: bool,
    },
}

impl Canvas {
    /// Current coarse interaction state.
    pub fn action(&self) -> Action {
        match self.gesture {
            Gesture::Idle => Action::Idle,
            Gesture::RubberBand { .. } | Gesture::Draw { .. } | Gesture::Shape { .. } | Gesture::Erase { .. } => {
                Action::Drawing
            }
            Gesture::Move { .. } | Gesture::Pan { .. } => Action::Moving,
            Gesture::Resize { .. } => Action::Resizing,
        }
    }

    /// The rubber-band selection box while one is being dragged.
    pub fn rubber_band(&self) -> Option<Rect> {
        match self.gesture {
            Gesture::RubberBand { rect, .. } => Some(rect),
            _ => None,
        }
    }

    /// Whether a pointer gesture is in progress.
    pub(crate) fn gesture_open(&self) -> bool {
        !matches!(self.gesture, Gesture::Idle)
    }

    /// Id of the path or shape currently being created.
    pub fn in_progress(&self) -> Option<ElementId> {
        match self.gesture {
            Gesture::Draw { id } | Gesture::Shape { id, .. } => Some(id),
            _ => None,
        }
    }

    pub fn handle_pointer(&mut self, event: &PointerEvent) {
        match *event {
            PointerEvent::Down { position, modifiers } => self.pointer_down(position, modifiers),
            PointerEvent::Move { position, modifiers } => self.pointer_move(position, modifiers),
            PointerEvent::Up { position } => self.pointer_up(position),
        }
    }

    pub fn pointer_down(&mut self, screen: Point, modifiers: Modifiers) {
        // A missing pointer-up must not leak the previous gesture.
        self.finish_gesture();

        let point = self.view.screen_to_canvas(screen);
        let tolerance = self.config.handle_tolerance;

        if let Some(crop) = self.crop.as_mut() {
            crop.begin_drag(point, tolerance);
            return;
        }

        self.gesture = match self.tool {
            ToolKind::Select => self.select_down(point, modifiers),
            ToolKind::Pan => Gesture::Pan { last_screen: screen },
            ToolKind::Draw => match create_element(self.tool, point, &self.style) {
                Some(element) => {
                    let id = element.id();
                    self.document.push(element);
                    Gesture::Draw { id }
                }
                None => Gesture::Idle,
            },
            ToolKind::Erase => {
                let erased = usize::from(erase_at(&mut self.document, &mut self.selection, point));
                Gesture::Erase { erased }
            }
            ToolKind::Rectangle | ToolKind::Circle | ToolKind::Triangle => {
                match create_element(self.tool, point, &self.style) {
                    Some(element) => {
                        let id = element.id();
                        self.document.push(element);
                        Gesture::Shape { id, start: point }
                    }
                    None => Gesture::Idle,
                }
            }
        };
        log::trace!("pointer down at {:?} -> {:?}", point, self.action());
    }

    fn select_down(&mut self, point: Point, modifiers: Modifiers) -> Gesture {
        let tolerance = self.config.handle_tolerance;
        let resize = self.primary_element().and_then(|element| {
            let frame = element.frame()?;
            let handle = hit_test_handles(frame, point, tolerance)?;
            Some(Gesture::Resize {
                id: element.id(),
                handle,
                start: point,
                original: frame,
                keep_aspect: modifiers.shift,
            })
        });
        if let Some(gesture) = resize {
            return gesture;
        }

        let Some(hit) = self.document.element_at(point).map(Element::id) else {
            self.selection.clear();
            return Gesture::RubberBand {
                start: point,
                rect: span_rect(point, point),
            };
        };

        if modifiers.shift {
            self.selection.add(hit);
        } else if !self.selection.contains(hit) {
            self.selection.select_only(hit);
        }

        let origins = self
            .selection
            .ids()
            .iter()
            .filter_map(|&id| self.document.get(id).map(|el| (id, el.drag_origin())))
            .collect();
        Gesture::Move { start: point, origins }
    }

    pub fn pointer_move(&mut self, screen: Point, _modifiers: Modifiers) {
        let point = self.view.screen_to_canvas(screen);
        let min_size = self.config.min_element_size;

        if let Some(crop) = self.crop.as_mut() {
            crop.drag_to(point, min_size);
            return;
        }

        match &mut self.gesture {
            Gesture::Idle => {}
            Gesture::RubberBand { start, rect } => {
                *rect = span_rect(*start, point);
            }
            Gesture::Draw { id } => {
                if let Some(Element::Path(path)) = self.document.get_mut(*id) {
                    path.add_point(point);
                }
            }
            Gesture::Shape { id, start } => {
                let rect = span_rect(*start, point);
                if let Some(element) = self.document.get_mut(*id) {
                    element.set_frame(rect);
                }
            }
            Gesture::Erase { erased } => {
                if erase_at(&mut self.document, &mut self.selection, point) {
                    *erased += 1;
                }
            }
            Gesture::Move { start, origins } => {
                let delta = point - *start;
                for (id, origin) in origins.iter() {
                    if let Some(element) = self.document.get_mut(*id) {
                        element.move_from(origin, delta);
                    }
                }
            }
            Gesture::Pan { last_screen } => {
                let delta = screen - *last_screen;
                *last_screen = screen;
                self.view.pan(delta);
            }
            Gesture::Resize {
                id,
                handle,
                start,
                original,
                keep_aspect,
            } => {
                let rect = apply_resize(*original, *handle, point - *start, *keep_aspect, min_size);
                if let Some(element) = self.document.get_mut(*id) {
                    element.set_frame(rect);
                }
            }
        }
    }

    pub fn pointer_up(&mut self, screen: Point) {
        log::trace!("pointer up at {:?}", self.view.screen_to_canvas(screen));
        self.finish_gesture();
    }

    /// End the current gesture as a pointer-up would.
    pub(crate) fn finish_gesture(&mut self) {
        if let Some(crop) = self.crop.as_mut() {
            crop.end_drag();
        }

        match std::mem::take(&mut self.gesture) {
            Gesture::Idle | Gesture::Pan { .. } => {}
            Gesture::RubberBand { rect, .. } => {
                let ids = self.document.ids_in_box(rect);
                log::debug!("rubber band selected {} element(s)", ids.len());
                self.selection.set(ids);
            }
            Gesture::Draw { .. } | Gesture::Shape { .. } | Gesture::Move { .. } | Gesture::Resize { .. } => {
                self.commit();
            }
            Gesture::Erase { erased } => {
                if erased > 0 {
                    log::debug!("erased {} element(s)", erased);
                    self.commit();
                }
            }
        }
    }

    /// Drop the current gesture and roll the live document back to the
    /// current history entry.
    pub(crate) fn abandon_gesture(&mut self) {
        if let Some(crop) = self.crop.as_mut() {
            crop.end_drag();
        }
        if matches!(std::mem::take(&mut self.gesture), Gesture::Idle) {
            return;
        }
        self.document = self.history.current().clone();
        let document = &self.document;
        self.selection.retain(|id| document.contains(id));
    }
}

/// Remove the topmost element under `point` from the live document.
fn erase_at(document: &mut Document, selection: &mut Selection, point: Point) -> bool {
    let Some(id) = document.element_at(point).map(Element::id) else {
        return false;
    };
    document.remove(id);
    selection.remove(id);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{ImageElement, PathElement, ShapeElement, ShapeKind};

    fn drag(canvas: &mut Canvas, from: (f64, f64), to: (f64, f64), modifiers: Modifiers) {
        canvas.pointer_down(Point::new(from.0, from.1), modifiers);
        let mid = Point::new((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0);
        canvas.pointer_move(mid, modifiers);
        canvas.pointer_move(Point::new(to.0, to.1), modifiers);
        canvas.pointer_up(Point::new(to.0, to.1));
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn shape(x: f64, y: f64, w: f64, h: f64) -> Element {
        Element::Shape(ShapeElement::new(ShapeKind::Rectangle, Point::ZERO).with_rect(Rect::new(x, y, x + w, y + h)))
    }

    #[test]
    fn test_rectangle_drag_then_undo_redo() {
        let mut canvas = Canvas::new();
        canvas.set_tool(ToolKind::Rectangle);
        drag(&mut canvas, (10.0, 10.0), (60.0, 40.0), Modifiers::NONE);

        assert_eq!(canvas.action(), Action::Idle);
        assert_eq!(canvas.document().len(), 1);
        let created = canvas.document().elements()[0].clone();
        let s = created.as_shape().unwrap();
        assert!(approx(s.x, 10.0) && approx(s.y, 10.0));
        assert!(approx(s.width, 50.0) && approx(s.height, 30.0));

        assert!(canvas.undo());
        assert!(canvas.document().is_empty());
        assert!(canvas.redo());
        assert_eq!(canvas.document().elements(), &[created]);
    }

    #[test]
    fn test_shape_drag_up_left_is_sign_corrected() {
        let mut canvas = Canvas::new();
        canvas.set_tool(ToolKind::Circle);
        drag(&mut canvas, (60.0, 40.0), (10.0, 10.0), Modifiers::NONE);
        let s = canvas.document().elements()[0].as_shape().unwrap().clone();
        assert!(approx(s.x, 10.0) && approx(s.y, 10.0));
        assert!(approx(s.width, 50.0) && approx(s.height, 30.0));
    }

    #[test]
    fn test_gesture_is_one_undo_step() {
        let mut canvas = Canvas::new();
        canvas.set_tool(ToolKind::Draw);
        canvas.pointer_down(Point::new(0.0, 0.0), Modifiers::NONE);
        assert_eq!(canvas.action(), Action::Drawing);
        for i in 1..20 {
            canvas.pointer_move(Point::new(i as f64, i as f64 * 2.0), Modifiers::NONE);
        }
        assert!(!canvas.can_undo());
        canvas.pointer_up(Point::new(19.0, 38.0));
        assert_eq!(canvas.history().len(), 2);
        assert_eq!(canvas.document().elements()[0].as_path().unwrap().len(), 20);
        assert!(canvas.in_progress().is_none());
    }

    #[test]
    fn test_screen_to_canvas_applies_to_drawing() {
        let mut canvas = Canvas::new();
        canvas.view.canvas_origin = Point::new(100.0, 50.0);
        canvas.view.set_scale_percent(200.0);
        canvas.set_tool(ToolKind::Rectangle);
        drag(&mut canvas, (120.0, 70.0), (220.0, 130.0), Modifiers::NONE);
        let s = canvas.document().elements()[0].as_shape().unwrap().clone();
        assert!(approx(s.x, 10.0) && approx(s.y, 10.0));
        assert!(approx(s.width, 50.0) && approx(s.height, 30.0));
    }

    #[test]
    fn test_select_and_move_shape() {
        let el = shape(10.0, 10.0, 50.0, 50.0);
        let id = el.id();
        let mut canvas = Canvas::new();
        canvas.add_elements(vec![el]);
        let entries = canvas.history().len();

        canvas.pointer_down(Point::new(20.0, 20.0), Modifiers::NONE);
        assert_eq!(canvas.action(), Action::Moving);
        assert_eq!(canvas.selection.primary(), Some(id));
        canvas.pointer_move(Point::new(25.0, 30.0), Modifiers::NONE);
        canvas.pointer_move(Point::new(40.0, 50.0), Modifiers::NONE);
        canvas.pointer_up(Point::new(40.0, 50.0));

        let frame = canvas.document().get(id).unwrap().frame().unwrap();
        assert_eq!(frame, Rect::new(30.0, 40.0, 80.0, 90.0));
        assert_eq!(canvas.history().len(), entries + 1);
    }

    #[test]
    fn test_click_without_move_adds_no_history() {
        let el = shape(10.0, 10.0, 50.0, 50.0);
        let mut canvas = Canvas::new();
        canvas.add_elements(vec![el]);
        let entries = canvas.history().len();
        canvas.pointer_down(Point::new(20.0, 20.0), Modifiers::NONE);
        canvas.pointer_up(Point::new(20.0, 20.0));
        assert_eq!(canvas.history().len(), entries);
    }

    #[test]
    fn test_move_path_translates_points() {
        let path = Element::Path(PathElement::from_points(vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)]));
        let id = path.id();
        let mut canvas = Canvas::new();
        canvas.add_elements(vec![path]);
        drag(&mut canvas, (5.0, 5.0), (8.0, 9.0), Modifiers::NONE);
        let points = &canvas.document().get(id).unwrap().as_path().unwrap().points;
        assert_eq!(points, &vec![Point::new(3.0, 4.0), Point::new(13.0, 14.0)]);
    }

    #[test]
    fn test_topmost_element_is_selected() {
        let below = shape(0.0, 0.0, 100.0, 100.0);
        let above = shape(50.0, 50.0, 100.0, 100.0);
        let above_id = above.id();
        let mut canvas = Canvas::new();
        canvas.add_elements(vec![below, above]);
        canvas.pointer_down(Point::new(75.0, 75.0), Modifiers::NONE);
        canvas.pointer_up(Point::new(75.0, 75.0));
        assert_eq!(canvas.selection.primary(), Some(above_id));
    }

    #[test]
    fn test_rubber_band_selection() {
        let inside = shape(10.0, 10.0, 5.0, 5.0);
        let partial = shape(95.0, 95.0, 20.0, 20.0);
        let outside = shape(200.0, 200.0, 10.0, 10.0);
        let (a, b) = (inside.id(), partial.id());
        let mut canvas = Canvas::new();
        canvas.add_elements(vec![inside, partial, outside]);

        canvas.pointer_down(Point::new(0.0, 0.0), Modifiers::NONE);
        canvas.pointer_move(Point::new(100.0, 100.0), Modifiers::NONE);
        assert_eq!(canvas.rubber_band(), Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
        canvas.pointer_up(Point::new(100.0, 100.0));

        assert_eq!(canvas.selection.ids(), &[a, b]);
        assert!(canvas.rubber_band().is_none());
    }

    #[test]
    fn test_move_keeps_multi_selection() {
        let a = shape(0.0, 0.0, 10.0, 10.0);
        let b = shape(50.0, 0.0, 10.0, 10.0);
        let (ia, ib) = (a.id(), b.id());
        let mut canvas = Canvas::new();
        canvas.add_elements(vec![a, b]);
        canvas.selection.set([ia, ib]);
        drag(&mut canvas, (5.0, 5.0), (15.0, 25.0), Modifiers::NONE);
        assert_eq!(canvas.document().get(ia).unwrap().frame(), Some(Rect::new(10.0, 20.0, 20.0, 30.0)));
        assert_eq!(canvas.document().get(ib).unwrap().frame(), Some(Rect::new(60.0, 20.0, 70.0, 30.0)));
    }

    #[test]
    fn test_resize_via_handle() {
        let el = shape(10.0, 10.0, 50.0, 30.0);
        let id = el.id();
        let mut canvas = Canvas::new();
        canvas.add_elements(vec![el]);
        canvas.selection.select_only(id);

        canvas.pointer_down(Point::new(60.0, 40.0), Modifiers::NONE);
        assert_eq!(canvas.action(), Action::Resizing);
        canvas.pointer_move(Point::new(80.0, 50.0), Modifiers::NONE);
        canvas.pointer_up(Point::new(80.0, 50.0));

        assert_eq!(canvas.document().get(id).unwrap().frame(), Some(Rect::new(10.0, 10.0, 80.0, 50.0)));
        assert_eq!(canvas.primary_element().unwrap().frame(), Some(Rect::new(10.0, 10.0, 80.0, 50.0)));
        assert_eq!(canvas.handles().len(), 8);
    }

    #[test]
    fn test_resize_floor_with_shift() {
        let el = shape(10.0, 10.0, 50.0, 30.0);
        let id = el.id();
        let mut canvas = Canvas::new();
        canvas.add_elements(vec![el]);
        canvas.selection.select_only(id);

        canvas.pointer_down(Point::new(10.0, 10.0), Modifiers::SHIFT);
        canvas.pointer_move(Point::new(500.0, 500.0), Modifiers::SHIFT);
        canvas.pointer_up(Point::new(500.0, 500.0));

        let frame = canvas.document().get(id).unwrap().frame().unwrap();
        assert!(frame.width() >= 10.0 - 1e-9);
        assert!(frame.height() >= 10.0 - 1e-9);
        assert!(approx(frame.x1, 60.0) && approx(frame.y1, 40.0));
    }

    #[test]
    fn test_erase_drag_coalesces_into_one_commit() {
        let paths: Vec<Element> = (0..3)
            .map(|i| {
                let offset = i as f64 * 2.0;
                Element::Path(PathElement::from_points(vec![
                    Point::new(offset, 0.0),
                    Point::new(offset + 10.0, 10.0),
                ]))
            })
            .collect();
        let mut canvas = Canvas::new();
        canvas.add_elements(paths);
        let entries = canvas.history().len();

        canvas.set_tool(ToolKind::Erase);
        canvas.pointer_down(Point::new(5.0, 5.0), Modifiers::NONE);
        canvas.pointer_move(Point::new(6.0, 5.0), Modifiers::NONE);
        canvas.pointer_move(Point::new(7.0, 5.0), Modifiers::NONE);
        assert_eq!(canvas.history().len(), entries);
        canvas.pointer_up(Point::new(7.0, 5.0));

        assert!(canvas.document().is_empty());
        assert_eq!(canvas.history().len(), entries + 1);
        assert!(canvas.undo());
        assert_eq!(canvas.document().len(), 3);
    }

    #[test]
    fn test_erase_miss_adds_no_history() {
        let mut canvas = Canvas::new();
        canvas.add_elements(vec![shape(0.0, 0.0, 10.0, 10.0)]);
        let entries = canvas.history().len();
        canvas.set_tool(ToolKind::Erase);
        drag(&mut canvas, (100.0, 100.0), (120.0, 120.0), Modifiers::NONE);
        assert_eq!(canvas.history().len(), entries);
    }

    #[test]
    fn test_pan_uses_raw_screen_delta() {
        let mut canvas = Canvas::new();
        canvas.view.set_scale_percent(200.0);
        canvas.set_tool(ToolKind::Pan);
        canvas.pointer_down(Point::new(0.0, 0.0), Modifiers::NONE);
        assert_eq!(canvas.action(), Action::Moving);
        canvas.pointer_move(Point::new(10.0, 5.0), Modifiers::NONE);
        canvas.pointer_move(Point::new(15.0, 5.0), Modifiers::NONE);
        canvas.pointer_up(Point::new(15.0, 5.0));
        assert!(approx(canvas.view.pan_offset.x, 15.0));
        assert!(approx(canvas.view.pan_offset.y, 5.0));
        assert!(!canvas.can_undo());
    }

    #[test]
    fn test_crop_mode_overrides_tools() {
        let img = Element::Image(ImageElement::from_bytes(Point::ZERO, 100.0, 100.0, b"x", "image/png"));
        let id = img.id();
        let mut canvas = Canvas::new();
        canvas.add_elements(vec![img]);
        canvas.set_tool(ToolKind::Rectangle);
        assert!(canvas.begin_crop(id));

        drag(&mut canvas, (50.0, 50.0), (60.0, 70.0), Modifiers::NONE);
        assert_eq!(canvas.document().len(), 1);
        assert_eq!(canvas.crop_rect(), Some(Rect::new(10.0, 20.0, 110.0, 120.0)));
        assert!(!canvas.crop().unwrap().is_dragging());

        assert!(canvas.confirm_crop());
        assert_eq!(canvas.document().get(id).unwrap().frame(), Some(Rect::new(10.0, 20.0, 110.0, 120.0)));
    }

    #[test]
    fn test_undo_mid_gesture_rolls_back() {
        let mut canvas = Canvas::with_document(Document::new(), Default::default());
        canvas.set_tool(ToolKind::Draw);
        canvas.pointer_down(Point::new(0.0, 0.0), Modifiers::NONE);
        canvas.pointer_move(Point::new(5.0, 5.0), Modifiers::NONE);
        assert!(!canvas.undo());
        assert!(canvas.document().is_empty());
        assert_eq!(canvas.action(), Action::Idle);
    }

    #[test]
    fn test_generation_result_mid_stroke_keeps_stroke_one_step() {
        use crate::generation::GenerationOutcome;

        let mut canvas = Canvas::new();
        let ticket = canvas.begin_generation("a cat").unwrap();
        canvas.set_tool(ToolKind::Draw);
        canvas.pointer_down(Point::new(0.0, 0.0), Modifiers::NONE);
        canvas.pointer_move(Point::new(5.0, 5.0), Modifiers::NONE);

        let image_id = canvas
            .finish_generation(
                ticket.token,
                GenerationOutcome::Image {
                    data: b"png".to_vec(),
                    media_type: "image/png".into(),
                },
            )
            .unwrap();
        assert_eq!(canvas.action(), Action::Drawing);

        for i in 0..14 {
            canvas.pointer_move(Point::new(6.0 + i as f64, 5.0), Modifiers::NONE);
        }
        canvas.pointer_up(Point::new(20.0, 5.0));

        assert_eq!(canvas.history().len(), 3);
        let stroke = canvas.elements().iter().find_map(Element::as_path).unwrap();
        assert_eq!(stroke.points.len(), 16);

        assert!(canvas.undo());
        assert_eq!(canvas.document().len(), 1);
        assert_eq!(canvas.elements()[0].id(), image_id);

        assert!(canvas.redo());
        let stroke = canvas.elements().iter().find_map(Element::as_path).unwrap();
        assert_eq!(stroke.points.len(), 16);
    }

    #[test]
    fn test_paste_mid_move_closes_gesture_first() {
        let el = shape(10.0, 10.0, 20.0, 20.0);
        let id = el.id();
        let mut canvas = Canvas::new();
        canvas.add_elements(vec![el]);
        canvas.selection.select_only(id);
        assert!(canvas.copy());

        canvas.pointer_down(Point::new(20.0, 20.0), Modifiers::NONE);
        canvas.pointer_move(Point::new(50.0, 20.0), Modifiers::NONE);
        let pasted = canvas.paste().unwrap();
        assert_eq!(canvas.action(), Action::Idle);
        canvas.pointer_move(Point::new(90.0, 90.0), Modifiers::NONE);
        canvas.pointer_up(Point::new(90.0, 90.0));

        // initial, add, move, paste
        assert_eq!(canvas.history().len(), 4);
        assert!(canvas.undo());
        assert!(!canvas.document().contains(pasted));
        assert_eq!(canvas.document().get(id).unwrap().frame(), Some(Rect::new(40.0, 10.0, 60.0, 30.0)));
    }

    #[test]
    fn test_delete_mid_draw_commits_stroke_separately() {
        let target = shape(100.0, 100.0, 20.0, 20.0);
        let target_id = target.id();
        let mut canvas = Canvas::new();
        canvas.add_elements(vec![target]);
        canvas.set_tool(ToolKind::Draw);
        canvas.pointer_down(Point::new(0.0, 0.0), Modifiers::NONE);
        canvas.pointer_move(Point::new(5.0, 5.0), Modifiers::NONE);
        canvas.selection.select_only(target_id);
        assert!(canvas.delete_selected());

        assert_eq!(canvas.history().len(), 4);
        assert!(canvas.undo());
        assert!(canvas.document().contains(target_id));
        assert_eq!(canvas.document().len(), 2);
    }

    #[test]
    fn test_shift_after_resize_start_does_not_lock_aspect() {
        let el = shape(10.0, 10.0, 50.0, 30.0);
        let id = el.id();
        let mut canvas = Canvas::new();
        canvas.add_elements(vec![el]);
        canvas.selection.select_only(id);

        canvas.pointer_down(Point::new(60.0, 40.0), Modifiers::NONE);
        canvas.pointer_move(Point::new(80.0, 70.0), Modifiers::SHIFT);
        canvas.pointer_up(Point::new(80.0, 70.0));

        assert_eq!(canvas.document().get(id).unwrap().frame(), Some(Rect::new(10.0, 10.0, 80.0, 70.0)));
    }
}
