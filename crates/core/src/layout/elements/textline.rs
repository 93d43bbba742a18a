//! Text lines: a run of characters sharing a baseline.

use serde::{Deserialize, Serialize};

use crate::utils::{INF_F64, Rect};

use super::character::{LTAnno, LTChar};
use super::component::LTComponent;

/// Element that can appear in a text line (character or annotation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TextLineElement {
    Char(LTChar),
    Anno(LTAnno),
}

impl TextLineElement {
    pub fn get_text(&self) -> &str {
        match self {
            TextLineElement::Char(c) => c.get_text(),
            TextLineElement::Anno(a) => a.get_text(),
        }
    }
}

/// A line of text, horizontal unless `vertical` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LTTextLine {
    #[serde(rename = "bbox")]
    component: LTComponent,
    #[serde(default)]
    elements: Vec<TextLineElement>,
    #[serde(default)]
    pub vertical: bool,
}

impl LTTextLine {
    pub fn new() -> Self {
        Self {
            component: LTComponent::new((INF_F64, INF_F64, -INF_F64, -INF_F64)),
            elements: Vec::new(),
            vertical: false,
        }
    }

    /// Creates a line with a fixed bounding box.
    pub fn with_bbox(bbox: Rect) -> Self {
        Self {
            component: LTComponent::new(bbox),
            elements: Vec::new(),
            vertical: false,
        }
    }

    /// Adds a character, growing the bounding box to include it.
    pub fn add_char(&mut self, ch: LTChar) {
        let (x0, y0, x1, y1) = ch.bbox();
        self.component.x0 = self.component.x0.min(x0);
        self.component.y0 = self.component.y0.min(y0);
        self.component.x1 = self.component.x1.max(x1);
        self.component.y1 = self.component.y1.max(y1);
        self.elements.push(TextLineElement::Char(ch));
    }

    pub fn add_anno(&mut self, anno: LTAnno) {
        self.elements.push(TextLineElement::Anno(anno));
    }

    pub fn iter(&self) -> impl Iterator<Item = &TextLineElement> {
        self.elements.iter()
    }

    pub fn get_text(&self) -> String {
        self.elements.iter().map(TextLineElement::get_text).collect()
    }
}

impl Default for LTTextLine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for LTTextLine {
    type Target = LTComponent;
    fn deref(&self) -> &Self::Target {
        &self.component
    }
}
