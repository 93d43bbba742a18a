//! Text boxes: groups of text lines with a stable index.

use serde::{Deserialize, Serialize};

use crate::utils::{INF_F64, Rect};

use super::component::LTComponent;
use super::textline::LTTextLine;

/// A group of text lines.
///
/// `index` is assigned by the upstream layout analysis in reading order and
/// is stable within a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LTTextBox {
    #[serde(rename = "bbox")]
    component: LTComponent,
    #[serde(default)]
    lines: Vec<LTTextLine>,
    #[serde(default = "default_index")]
    index: i32,
    #[serde(default)]
    pub vertical: bool,
}

fn default_index() -> i32 {
    -1
}

impl LTTextBox {
    pub fn new(index: i32) -> Self {
        Self {
            component: LTComponent::new((INF_F64, INF_F64, -INF_F64, -INF_F64)),
            lines: Vec::new(),
            index,
            vertical: false,
        }
    }

    /// Creates a box with a fixed bounding box.
    pub fn with_bbox(index: i32, bbox: Rect) -> Self {
        Self {
            component: LTComponent::new(bbox),
            lines: Vec::new(),
            index,
            vertical: false,
        }
    }

    /// Adds a line, growing the bounding box to include it.
    pub fn add(&mut self, line: LTTextLine) {
        let (x0, y0, x1, y1) = line.bbox();
        self.component.x0 = self.component.x0.min(x0);
        self.component.y0 = self.component.y0.min(y0);
        self.component.x1 = self.component.x1.max(x1);
        self.component.y1 = self.component.y1.max(y1);
        self.lines.push(line);
    }

    pub fn index(&self) -> i32 {
        self.index
    }

    pub fn set_index(&mut self, index: i32) {
        self.index = index;
    }

    pub fn iter(&self) -> impl Iterator<Item = &LTTextLine> {
        self.lines.iter()
    }

    pub fn get_text(&self) -> String {
        self.lines.iter().map(|l| l.get_text()).collect()
    }

    pub fn get_writing_mode(&self) -> &'static str {
        if self.vertical { "tb-rl" } else { "lr-tb" }
    }
}

impl std::ops::Deref for LTTextBox {
    type Target = LTComponent;
    fn deref(&self) -> &Self::Target {
        &self.component
    }
}
