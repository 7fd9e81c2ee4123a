//! Element definitions for the canvas document.

mod image;
mod path;
mod shape;

pub use image::{ImageElement, ImageFormat, data_uri, parse_data_uri};
pub use path::PathElement;
pub use shape::{ShapeElement, ShapeKind};

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Error returned when a color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color: {0:?}")]
pub struct ColorParseError(pub String);

/// Serializable color representation (RGBA8).
///
/// Stored on disk as a CSS hex string (`#rrggbb` or `#rrggbbaa`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(color: &str) -> Result<Self, ColorParseError> {
        let err = || ColorParseError(color.to_string());
        let hex = color.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.is_ascii() {
            return Err(err());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| err());
        match hex.len() {
            3 => Ok(Self::new(
                channel(&hex[0..1])? * 17,
                channel(&hex[1..2])? * 17,
                channel(&hex[2..3])? * 17,
                255,
            )),
            6 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                255,
            )),
            8 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                channel(&hex[6..8])?,
            )),
            _ => Err(err()),
        }
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl TryFrom<String> for SerializableColor {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<SerializableColor> for String {
    fn from(color: SerializableColor) -> Self {
        color.to_hex()
    }
}

/// Serde adapter for optional fills: `None` is written as `"none"`.
pub(crate) mod fill_serde {
    use super::SerializableColor;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        fill: &Option<SerializableColor>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match fill {
            Some(color) => serializer.serialize_str(&color.to_hex()),
            None => serializer.serialize_str("none"),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<SerializableColor>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref() {
            None | Some("none") | Some("transparent") | Some("") => Ok(None),
            Some(s) => SerializableColor::from_hex(s)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

/// A visual primitive in the document.
///
/// The `kind` tag selects the variant in the persisted format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Element {
    Image(ImageElement),
    Shape(ShapeElement),
    Path(PathElement),
}

impl Element {
    pub fn id(&self) -> ElementId {
        match self {
            Element::Image(e) => e.id,
            Element::Shape(e) => e.id,
            Element::Path(e) => e.id,
        }
    }

    /// Axis-aligned bounds in canvas space.
    pub fn bounds(&self) -> Rect {
        crate::geometry::bounds_of(self)
    }

    /// Short name of the variant, matching the persisted `kind` tag.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Element::Image(_) => "image",
            Element::Shape(_) => "shape",
            Element::Path(_) => "path",
        }
    }

    /// The frame of a box-like element (image or shape).
    /// Paths have no frame; their geometry is their point list.
    pub fn frame(&self) -> Option<Rect> {
        match self {
            Element::Image(e) => Some(e.rect()),
            Element::Shape(e) => Some(e.rect()),
            Element::Path(_) => None,
        }
    }

    /// Replace the frame of a box-like element. No-op for paths.
    pub fn set_frame(&mut self, rect: Rect) {
        match self {
            Element::Image(e) => e.set_rect(rect),
            Element::Shape(e) => e.set_rect(rect),
            Element::Path(_) => {}
        }
    }

    /// Whether resize handles apply to this element.
    pub fn is_resizable(&self) -> bool {
        matches!(self, Element::Image(_) | Element::Shape(_))
    }

    /// Translate the element by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Element::Image(e) => {
                e.x += delta.x;
                e.y += delta.y;
            }
            Element::Shape(e) => {
                e.x += delta.x;
                e.y += delta.y;
            }
            Element::Path(e) => {
                for point in &mut e.points {
                    *point += delta;
                }
            }
        }
    }

    /// Capture where this element is before a drag starts.
    pub fn drag_origin(&self) -> DragOrigin {
        match self {
            Element::Image(e) => DragOrigin::Position(Point::new(e.x, e.y)),
            Element::Shape(e) => DragOrigin::Position(Point::new(e.x, e.y)),
            Element::Path(e) => DragOrigin::Points(e.points.clone()),
        }
    }

    /// Place the element at `origin + delta`.
    pub fn move_from(&mut self, origin: &DragOrigin, delta: Vec2) {
        match (self, origin) {
            (Element::Image(e), DragOrigin::Position(p)) => {
                e.x = p.x + delta.x;
                e.y = p.y + delta.y;
            }
            (Element::Shape(e), DragOrigin::Position(p)) => {
                e.x = p.x + delta.x;
                e.y = p.y + delta.y;
            }
            (Element::Path(e), DragOrigin::Points(points)) => {
                e.points = points.iter().map(|p| *p + delta).collect();
            }
            _ => log::warn!("drag origin does not match element kind"),
        }
    }

    /// Regenerate the element's ID with a new unique identifier.
    pub fn regenerate_id(&mut self) {
        let new_id = Uuid::new_v4();
        match self {
            Element::Image(e) => e.id = new_id,
            Element::Shape(e) => e.id = new_id,
            Element::Path(e) => e.id = new_id,
        }
    }

    pub fn as_image(&self) -> Option<&ImageElement> {
        match self {
            Element::Image(img) => Some(img),
            _ => None,
        }
    }

    pub fn as_shape(&self) -> Option<&ShapeElement> {
        match self {
            Element::Shape(shape) => Some(shape),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&PathElement> {
        match self {
            Element::Path(path) => Some(path),
            _ => None,
        }
    }
}

/// Position snapshot taken at the start of a move gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum DragOrigin {
    /// Top-left corner of an image or shape.
    Position(Point),
    /// Full point list of a path.
    Points(Vec<Point>),
}
