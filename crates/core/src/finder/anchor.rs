use crate::dom::TextBox;
use crate::geometry::BoundingBox;

/// Reference box for relative lookups.
///
/// Coordinate anchors carry `boxid == -1`, which no text box uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    boxid: i64,
    bbox: BoundingBox,
    text: Option<String>,
}

impl Anchor {
    pub const COORDS_BOXID: i64 = -1;

    pub fn from_textbox(textbox: &TextBox) -> Self {
        Self {
            boxid: textbox.boxid(),
            bbox: textbox.bbox(),
            text: Some(textbox.text().to_string()),
        }
    }

    pub fn from_coords(bbox: BoundingBox) -> Self {
        Self {
            boxid: Self::COORDS_BOXID,
            bbox,
            text: None,
        }
    }

    pub fn boxid(&self) -> i64 {
        self.boxid
    }

    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}
