use std::fmt;

use crate::geometry::{BoundingBox, Coordinate};
use crate::layout::LTImage;

/// An image placed on a page.
///
/// Two figures are the same image when their string form and bbox agree;
/// the converter relies on this to drop duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Figure {
    bbox: BoundingBox,
    src: String,
    width: i64,
    height: i64,
}

impl Figure {
    /// Wraps an image node. Pixel size comes from the source image when
    /// known, otherwise from the placed size.
    pub fn new(image: &LTImage) -> Self {
        let (src_w, src_h) = image.srcsize;
        Self {
            bbox: BoundingBox::from(image.bbox()),
            src: image.name.clone(),
            width: src_w.map_or_else(|| image.width().to_coordinate(), i64::from),
            height: src_h.map_or_else(|| image.height().to_coordinate(), i64::from),
        }
    }

    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn width(&self) -> i64 {
        self.width
    }

    pub fn height(&self) -> i64 {
        self.height
    }
}

impl fmt::Display for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<image src=\"{}\" width=\"{}\" height=\"{}\" />",
            self.src, self.width, self.height
        )
    }
}
