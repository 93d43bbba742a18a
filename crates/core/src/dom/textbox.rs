use crate::geometry::BoundingBox;
use crate::layout::LTTextBox;

/// A block of text on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBox {
    boxid: i64,
    bbox: BoundingBox,
    text: String,
}

impl TextBox {
    /// Wraps a text box node, trimming surrounding whitespace if `trim`.
    pub fn new(boxid: i64, item: &LTTextBox, trim: bool) -> Self {
        let text = item.get_text();
        let text = if trim { text.trim().to_string() } else { text };
        Self {
            boxid,
            bbox: BoundingBox::from(item.bbox()),
            text,
        }
    }

    /// Id assigned by upstream layout analysis, stable within a page.
    pub fn boxid(&self) -> i64 {
        self.boxid
    }

    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }
}
