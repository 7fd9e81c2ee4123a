//! Freehand path element.

use super::{ElementId, SerializableColor};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A freehand stroke. Its geometry is fully defined by `points`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathElement {
    pub(crate) id: ElementId,
    /// Points in canvas space, in drawing order.
    pub points: Vec<Point>,
    pub stroke_color: SerializableColor,
    pub stroke_width: f64,
}

impl PathElement {
    /// Create a path with a single starting point.
    pub fn new(start: Point) -> Self {
        Self::from_points(vec![start])
    }

    /// Create from existing points.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            stroke_color: SerializableColor::black(),
            stroke_width: 2.0,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Add a point to the path.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
