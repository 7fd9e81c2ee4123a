//! Tool kinds and element factories.

use crate::config::EditorConfig;
use crate::elements::{Element, PathElement, SerializableColor, ShapeElement, ShapeKind};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Select,
    Pan,
    Draw,
    Erase,
    Rectangle,
    Circle,
    Triangle,
}

impl ToolKind {
    pub const ALL: [ToolKind; 7] = [
        ToolKind::Select,
        ToolKind::Pan,
        ToolKind::Draw,
        ToolKind::Erase,
        ToolKind::Rectangle,
        ToolKind::Circle,
        ToolKind::Triangle,
    ];

    /// Single-letter keyboard shortcut.
    pub fn shortcut(&self) -> char {
        match self {
            ToolKind::Select => 'v',
            ToolKind::Pan => 'h',
            ToolKind::Draw => 'p',
            ToolKind::Erase => 'e',
            ToolKind::Rectangle => 'r',
            ToolKind::Circle => 'c',
            ToolKind::Triangle => 't',
        }
    }

    /// Look up a tool by its shortcut letter (case-insensitive).
    pub fn from_shortcut(key: char) -> Option<Self> {
        let key = key.to_ascii_lowercase();
        Self::ALL.into_iter().find(|tool| tool.shortcut() == key)
    }

    /// The shape kind this tool draws, if it is a shape tool.
    pub fn shape_kind(&self) -> Option<ShapeKind> {
        match self {
            ToolKind::Rectangle => Some(ShapeKind::Rectangle),
            ToolKind::Circle => Some(ShapeKind::Circle),
            ToolKind::Triangle => Some(ShapeKind::Triangle),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ToolKind::Select => "Select",
            ToolKind::Pan => "Pan",
            ToolKind::Draw => "Draw",
            ToolKind::Erase => "Erase",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Circle => "Circle",
            ToolKind::Triangle => "Triangle",
        }
    }
}

/// Style applied to newly created elements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToolStyle {
    pub stroke_color: SerializableColor,
    pub stroke_width: f64,
    /// Fill color (None = transparent).
    pub fill_color: Option<SerializableColor>,
}

impl Default for ToolStyle {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::black(),
            stroke_width: 2.0,
            fill_color: None,
        }
    }
}

impl From<&EditorConfig> for ToolStyle {
    fn from(config: &EditorConfig) -> Self {
        Self {
            stroke_color: config.stroke_color,
            stroke_width: config.stroke_width,
            fill_color: config.fill_color,
        }
    }
}

/// Create the element a tool starts with at `point`.
///
/// Shape tools produce a zero-size shape, the draw tool a single-point
/// path. Select, pan and erase create nothing.
pub fn create_element(tool: ToolKind, point: Point, style: &ToolStyle) -> Option<Element> {
    if let Some(kind) = tool.shape_kind() {
        let mut shape = ShapeElement::new(kind, point);
        shape.stroke_color = style.stroke_color;
        shape.stroke_width = style.stroke_width;
        shape.fill_color = style.fill_color;
        return Some(Element::Shape(shape));
    }

    match tool {
        ToolKind::Draw => {
            let mut path = PathElement::new(point);
            path.stroke_color = style.stroke_color;
            path.stroke_width = style.stroke_width;
            Some(Element::Path(path))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcut_roundtrip() {
        for tool in ToolKind::ALL {
            assert_eq!(ToolKind::from_shortcut(tool.shortcut()), Some(tool));
        }
        assert_eq!(ToolKind::from_shortcut('R'), Some(ToolKind::Rectangle));
        assert_eq!(ToolKind::from_shortcut('z'), None);
    }

    #[test]
    fn test_create_shape_uses_style() {
        let style = ToolStyle {
            stroke_color: SerializableColor::new(255, 0, 0, 255),
            stroke_width: 4.0,
            fill_color: Some(SerializableColor::white()),
        };
        let el = create_element(ToolKind::Circle, Point::new(3.0, 4.0), &style).unwrap();
        let shape = el.as_shape().unwrap();
        assert_eq!(shape.shape_kind, ShapeKind::Circle);
        assert_eq!(shape.stroke_color, style.stroke_color);
        assert_eq!(shape.fill_color, Some(SerializableColor::white()));
        assert!(shape.width.abs() < f64::EPSILON);
    }

    #[test]
    fn test_create_path_has_start_point() {
        let el = create_element(ToolKind::Draw, Point::new(1.0, 1.0), &ToolStyle::default()).unwrap();
        assert_eq!(el.as_path().unwrap().points, vec![Point::new(1.0, 1.0)]);
    }

    #[test]
    fn test_non_creating_tools() {
        let style = ToolStyle::default();
        for tool in [ToolKind::Select, ToolKind::Pan, ToolKind::Erase] {
            assert!(create_element(tool, Point::ZERO, &style).is_none());
        }
    }
}
