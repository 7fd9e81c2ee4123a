//! The flat, ordered element list that makes up a drawing.

use crate::elements::{Element, ElementId};
use crate::geometry;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Document load/save errors.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to parse document: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("failed to serialize document: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("duplicate element id {0}")]
    DuplicateId(ElementId),
}

/// Ordered elements; order is paint order (later = on top).
///
/// Serialized as a bare JSON array of element records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from elements, rejecting duplicate ids.
    pub fn from_elements(elements: Vec<Element>) -> Result<Self, DocumentError> {
        let mut seen = std::collections::HashSet::with_capacity(elements.len());
        for el in &elements {
            if !seen.insert(el.id()) {
                return Err(DocumentError::DuplicateId(el.id()));
            }
        }
        Ok(Self { elements })
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Append an element on top.
    pub fn push(&mut self, element: Element) {
        debug_assert!(self.get(element.id()).is_none(), "duplicate element id");
        self.elements.push(element);
    }

    pub fn extend(&mut self, elements: impl IntoIterator<Item = Element>) {
        for el in elements {
            self.push(el);
        }
    }

    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let index = self.index_of(id)?;
        Some(self.elements.remove(index))
    }

    /// Remove every element whose id is in `ids`. Returns how many were removed.
    pub fn remove_all(&mut self, ids: &[ElementId]) -> usize {
        let before = self.elements.len();
        self.elements.retain(|el| !ids.contains(&el.id()));
        before - self.elements.len()
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|el| el.id() == id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|el| el.id() == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.get(id).is_some()
    }

    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|el| el.id() == id)
    }

    /// Topmost element under `point`.
    pub fn element_at(&self, point: Point) -> Option<&Element> {
        geometry::hit_test(point, &self.elements)
    }

    /// Ids of elements inside a rubber-band box, in paint order.
    pub fn ids_in_box(&self, selection: Rect) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|el| geometry::in_box(el, selection))
            .map(Element::id)
            .collect()
    }

    /// Bring an element to the front (topmost).
    pub fn bring_to_front(&mut self, id: ElementId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let el = self.elements.remove(index);
        self.elements.push(el);
        true
    }

    /// Send an element to the back (bottommost).
    pub fn send_to_back(&mut self, id: ElementId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let el = self.elements.remove(index);
        self.elements.insert(0, el);
        true
    }

    /// Move an element one layer forward.
    /// Returns false if already at front.
    pub fn bring_forward(&mut self, id: ElementId) -> bool {
        match self.index_of(id) {
            Some(pos) if pos + 1 < self.elements.len() => {
                self.elements.swap(pos, pos + 1);
                true
            }
            _ => false,
        }
    }

    /// Move an element one layer backward.
    /// Returns false if already at back.
    pub fn send_backward(&mut self, id: ElementId) -> bool {
        match self.index_of(id) {
            Some(pos) if pos > 0 => {
                self.elements.swap(pos, pos - 1);
                true
            }
            _ => false,
        }
    }

    /// Union of all element bounds.
    pub fn bounds(&self) -> Option<Rect> {
        self.elements
            .iter()
            .map(Element::bounds)
            .reduce(|acc, b| acc.union(b))
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        serde_json::to_string_pretty(self).map_err(DocumentError::Serialize)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let elements: Vec<Element> = serde_json::from_str(json).map_err(DocumentError::Parse)?;
        Self::from_elements(elements)
    }
}
