//! Editor state aggregate and discrete editing commands.

use crate::camera::ViewTransform;
use crate::config::EditorConfig;
use crate::crop::CropState;
use crate::document::{Document, DocumentError};
use crate::elements::{Element, ElementId, SerializableColor};
use crate::generation::GenerationState;
use crate::history::History;
use crate::input::{EditorAction, KeyPress, resolve_key};
use crate::interaction::Gesture;
use crate::notice::{NoticeLevel, Notices};
use crate::selection::{Handle, Selection, get_handles};
use crate::tools::{ToolKind, ToolStyle};
use kurbo::{Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Layer reorder direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerMove {
    /// To the end of the order (topmost).
    Front,
    /// To the start of the order (bottommost).
    Back,
    /// Swap with the next element.
    Forward,
    /// Swap with the previous element.
    Backward,
}

/// The whole editor: live document, history, selection and the transient
/// interaction context.
///
/// Every mutation path ends in [`Canvas::commit`]; intermediate gesture
/// states touch only the live document.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// The live document. Equal to the current history entry between gestures.
    pub(crate) document: Document,
    pub(crate) history: History<Document>,
    pub selection: Selection,
    pub(crate) tool: ToolKind,
    /// Style applied to new elements.
    pub style: ToolStyle,
    pub view: ViewTransform,
    pub(crate) config: EditorConfig,
    pub(crate) gesture: Gesture,
    pub(crate) crop: Option<CropState>,
    pub(crate) clipboard: Option<Element>,
    pub notices: Notices,
    pub(crate) generation: GenerationState,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self::with_document(Document::new(), config)
    }

    /// Start editing `document`. It becomes the first history entry.
    pub fn with_document(document: Document, config: EditorConfig) -> Self {
        let mut view = ViewTransform::new();
        view.min_scale_percent = config.min_scale_percent;
        view.max_scale_percent = config.max_scale_percent;
        view.scale_step = config.scale_step;
        view.set_scale_percent(config.scale_percent);

        Self {
            history: History::new(document.clone()),
            document,
            selection: Selection::new(),
            tool: ToolKind::default(),
            style: ToolStyle::from(&config),
            view,
            config,
            gesture: Gesture::Idle,
            crop: None,
            clipboard: None,
            notices: Notices::new(),
            generation: GenerationState::default(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn elements(&self) -> &[Element] {
        self.document.elements()
    }

    pub fn history(&self) -> &History<Document> {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn clipboard(&self) -> Option<&Element> {
        self.clipboard.as_ref()
    }

    pub fn crop(&self) -> Option<&CropState> {
        self.crop.as_ref()
    }

    pub fn is_cropping(&self) -> bool {
        self.crop.is_some()
    }

    /// The single selected element, read from the live document.
    pub fn primary_element(&self) -> Option<&Element> {
        self.selection.primary().and_then(|id| self.document.get(id))
    }

    /// Resize handles for the primary element, if it is an image or shape.
    pub fn handles(&self) -> Vec<Handle> {
        self.primary_element()
            .and_then(Element::frame)
            .map(get_handles)
            .unwrap_or_default()
    }

    /// Snapshot the live document into history.
    ///
    /// Nothing is recorded when the live document already equals the
    /// current entry. Returns whether an entry was added.
    pub fn commit(&mut self) -> bool {
        if &self.document == self.history.current() {
            log::debug!("commit skipped: document unchanged");
            return false;
        }
        self.history.commit(self.document.clone());
        log::debug!(
            "committed history entry {} ({} elements)",
            self.history.cursor(),
            self.document.len()
        );
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) -> bool {
        self.abandon_gesture();
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        self.document = snapshot.clone();
        self.after_document_replaced();
        log::debug!("undo -> entry {}", self.history.cursor());
        true
    }

    pub fn redo(&mut self) -> bool {
        self.abandon_gesture();
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        self.document = snapshot.clone();
        self.after_document_replaced();
        log::debug!("redo -> entry {}", self.history.cursor());
        true
    }

    /// Drop selection and crop state that point at elements which no longer exist.
    fn after_document_replaced(&mut self) {
        let document = &self.document;
        self.selection.retain(|id| document.contains(id));
        let crop_target_gone = self
            .crop
            .as_ref()
            .is_some_and(|crop| !self.document.contains(crop.target));
        if crop_target_gone {
            self.crop = None;
        }
    }

    /// Remove every selected element and commit.
    pub fn delete_selected(&mut self) -> bool {
        self.finish_gesture();
        if self.selection.is_empty() {
            return false;
        }
        let removed = self.document.remove_all(self.selection.ids());
        self.selection.clear();
        if removed == 0 {
            return false;
        }
        log::info!("deleted {} element(s)", removed);
        self.commit()
    }

    /// Copy the primary element into the clipboard by value.
    pub fn copy(&mut self) -> bool {
        let Some(element) = self.primary_element().cloned() else {
            return false;
        };
        log::debug!("copied {} {}", element.kind_name(), element.id());
        self.clipboard = Some(element);
        true
    }

    /// Paste the clipboard element with a fresh id, offset from the
    /// clipboard copy. Repeated pastes land on the same spot.
    pub fn paste(&mut self) -> Option<ElementId> {
        let mut element = self.clipboard.clone()?;
        self.finish_gesture();
        element.regenerate_id();
        let offset = self.config.paste_offset;
        element.translate(Vec2::new(offset, offset));
        let id = element.id();
        self.document.push(element);
        self.selection.select_only(id);
        self.commit();
        log::debug!("pasted {}", id);
        Some(id)
    }

    /// Reorder the primary element and commit.
    pub fn reorder(&mut self, direction: LayerMove) -> bool {
        self.finish_gesture();
        let Some(id) = self.selection.primary() else {
            return false;
        };
        let moved = match direction {
            LayerMove::Front => self.document.bring_to_front(id),
            LayerMove::Back => self.document.send_to_back(id),
            LayerMove::Forward => self.document.bring_forward(id),
            LayerMove::Backward => self.document.send_backward(id),
        };
        moved && self.commit()
    }

    /// Set the fill for new shapes, and for the primary element if it is a shape.
    pub fn set_fill_color(&mut self, fill: Option<SerializableColor>) -> bool {
        self.style.fill_color = fill;
        self.finish_gesture();
        let Some(id) = self.selection.primary() else {
            return false;
        };
        match self.document.get_mut(id) {
            Some(Element::Shape(shape)) => {
                shape.fill_color = fill;
                self.commit()
            }
            _ => false,
        }
    }

    /// Set the stroke color for new elements and for a selected shape or path.
    pub fn set_stroke_color(&mut self, color: SerializableColor) -> bool {
        self.style.stroke_color = color;
        self.restyle_primary(|el| match el {
            Element::Shape(shape) => shape.stroke_color = color,
            Element::Path(path) => path.stroke_color = color,
            Element::Image(_) => {}
        })
    }

    pub fn set_stroke_width(&mut self, width: f64) -> bool {
        let width = width.max(0.0);
        self.style.stroke_width = width;
        self.restyle_primary(|el| match el {
            Element::Shape(shape) => shape.stroke_width = width,
            Element::Path(path) => path.stroke_width = width,
            Element::Image(_) => {}
        })
    }

    fn restyle_primary(&mut self, apply: impl FnOnce(&mut Element)) -> bool {
        self.finish_gesture();
        let Some(id) = self.selection.primary() else {
            return false;
        };
        let Some(element) = self.document.get_mut(id) else {
            return false;
        };
        apply(element);
        self.commit()
    }

    pub fn select_all(&mut self) {
        self.selection.set(self.document.elements().iter().map(Element::id));
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Switch tools. Any gesture in progress is finished first.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if tool == self.tool {
            return;
        }
        self.finish_gesture();
        if tool != ToolKind::Select {
            self.selection.clear();
        }
        log::debug!("tool: {:?} -> {:?}", self.tool, tool);
        self.tool = tool;
    }

    /// Enter cropping mode for an image. The crop box starts at the image frame.
    pub fn begin_crop(&mut self, id: ElementId) -> bool {
        let Some(rect) = self.document.get(id).and_then(Element::as_image).map(|image| image.rect()) else {
            return false;
        };
        self.finish_gesture();
        self.crop = Some(CropState::new(id, rect));
        true
    }

    /// Crop the primary element, if it is an image.
    pub fn begin_crop_selected(&mut self) -> bool {
        match self.selection.primary() {
            Some(id) => self.begin_crop(id),
            None => false,
        }
    }

    /// Apply the crop box to the target image's frame and commit.
    pub fn confirm_crop(&mut self) -> bool {
        let Some(crop) = self.crop.take() else {
            return false;
        };
        self.finish_gesture();
        match self.document.get_mut(crop.target) {
            Some(element) if element.as_image().is_some() => element.set_frame(crop.rect),
            _ => return false,
        }
        log::info!("cropped image {} to {:?}", crop.target, crop.rect);
        self.commit()
    }

    /// Leave cropping mode without touching the image.
    pub fn cancel_crop(&mut self) -> bool {
        self.crop.take().is_some()
    }

    /// Current crop box, if cropping.
    pub fn crop_rect(&self) -> Option<Rect> {
        self.crop.as_ref().map(|c| c.rect)
    }

    /// Run a discrete editor action. Returns whether anything changed.
    pub fn apply_action(&mut self, action: EditorAction) -> bool {
        log::debug!("action: {:?}", action);
        match action {
            EditorAction::Undo => self.undo(),
            EditorAction::Redo => self.redo(),
            EditorAction::Delete => self.delete_selected(),
            EditorAction::Copy => self.copy(),
            EditorAction::Paste => self.paste().is_some(),
            EditorAction::SelectAll => {
                self.select_all();
                true
            }
            EditorAction::Cancel => {
                let cancelled = self.cancel_crop();
                let had_selection = !self.selection.is_empty();
                self.selection.clear();
                cancelled || had_selection
            }
            EditorAction::ZoomIn => {
                self.view.zoom_in();
                true
            }
            EditorAction::ZoomOut => {
                self.view.zoom_out();
                true
            }
            EditorAction::SetTool(tool) => {
                self.set_tool(tool);
                true
            }
            EditorAction::Layer(direction) => self.reorder(direction),
        }
    }

    /// Resolve and run a key press. Returns the action that ran, if any.
    pub fn handle_key(&mut self, press: &KeyPress) -> Option<EditorAction> {
        let action = resolve_key(press)?;
        self.apply_action(action);
        Some(action)
    }

    /// Replace the live document and commit it as a new history entry.
    pub fn replace_document(&mut self, document: Document) {
        self.abandon_gesture();
        self.document = document;
        self.history.commit(self.document.clone());
        self.selection.clear();
        self.crop = None;
        self.cancel_generation();
        log::info!("document replaced ({} elements)", self.document.len());
    }

    /// Parse a persisted document and load it. A parse failure leaves the
    /// document untouched and raises an error notice.
    pub fn load_json(&mut self, json: &str) -> Result<(), DocumentError> {
        match Document::from_json(json) {
            Ok(document) => {
                self.replace_document(document);
                Ok(())
            }
            Err(err) => {
                self.notify_error(format!("Could not load document: {err}"));
                Err(err)
            }
        }
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        self.document.to_json()
    }

    /// Add elements on top in one commit, selecting none of them.
    ///
    /// Results that arrive while a gesture is open (generation, ingestion)
    /// are committed on top of the last history entry and also added to the
    /// live document, so the gesture still ends as a single undo step.
    pub fn add_elements(&mut self, elements: Vec<Element>) -> Vec<ElementId> {
        let ids: Vec<ElementId> = elements.iter().map(Element::id).collect();
        if ids.is_empty() {
            return ids;
        }
        if self.gesture_open() {
            let mut base = self.history.current().clone();
            base.extend(elements.iter().cloned());
            self.history.commit(base);
            self.document.extend(elements);
            log::debug!("added {} element(s) under an open gesture", ids.len());
        } else {
            self.document.extend(elements);
            self.commit();
        }
        ids
    }

    pub fn notify_info(&mut self, message: impl Into<String>) {
        let lifetime = self.config.notice_lifetime();
        self.notices.push(NoticeLevel::Info, message, lifetime);
    }

    pub fn notify_error(&mut self, message: impl Into<String>) {
        let lifetime = self.config.notice_lifetime();
        self.notices.push(NoticeLevel::Error, message, lifetime);
    }
}
