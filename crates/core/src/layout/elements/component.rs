//! Base component with bounding box.

use serde::{Deserialize, Serialize};

use crate::utils::{HasBBox, Rect};

/// Base component with a bounding box.
///
/// Serialized as a plain `[x0, y0, x1, y1]` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Rect", into = "Rect")]
pub struct LTComponent {
    pub(crate) x0: f64,
    pub(crate) y0: f64,
    pub(crate) x1: f64,
    pub(crate) y1: f64,
}

impl LTComponent {
    pub fn new(bbox: Rect) -> Self {
        let (x0, y0, x1, y1) = bbox;
        Self { x0, y0, x1, y1 }
    }

    pub fn set_bbox(&mut self, bbox: Rect) {
        let (x0, y0, x1, y1) = bbox;
        self.x0 = x0;
        self.y0 = y0;
        self.x1 = x1;
        self.y1 = y1;
    }

    pub fn bbox(&self) -> Rect {
        (self.x0, self.y0, self.x1, self.y1)
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }
}

impl From<Rect> for LTComponent {
    fn from(bbox: Rect) -> Self {
        Self::new(bbox)
    }
}

impl From<LTComponent> for Rect {
    fn from(component: LTComponent) -> Self {
        component.bbox()
    }
}

impl HasBBox for LTComponent {
    fn x0(&self) -> f64 {
        self.x0
    }
    fn y0(&self) -> f64 {
        self.y0
    }
    fn x1(&self) -> f64 {
        self.x1
    }
    fn y1(&self) -> f64 {
        self.y1
    }
}
