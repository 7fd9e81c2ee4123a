//! Geometric shape elements (rectangle, circle, triangle).

use super::{ElementId, SerializableColor, fill_serde};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which figure a shape element draws inside its frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Triangle,
}

/// A filled/stroked figure occupying an axis-aligned frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeElement {
    pub(crate) id: ElementId,
    pub shape_kind: ShapeKind,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub stroke_color: SerializableColor,
    pub stroke_width: f64,
    /// Fill color (None = transparent).
    #[serde(default, with = "fill_serde")]
    pub fill_color: Option<SerializableColor>,
}

impl ShapeElement {
    /// Create a zero-size shape anchored at `position`.
    pub fn new(shape_kind: ShapeKind, position: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            shape_kind,
            x: position.x,
            y: position.y,
            width: 0.0,
            height: 0.0,
            stroke_color: SerializableColor::black(),
            stroke_width: 2.0,
            fill_color: None,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Builder-style frame setter.
    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.set_rect(rect);
        self
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    pub fn set_rect(&mut self, rect: Rect) {
        let rect = rect.abs();
        self.x = rect.x0;
        self.y = rect.y0;
        self.width = rect.width();
        self.height = rect.height();
    }
}
