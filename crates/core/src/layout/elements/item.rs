//! LTItem enum - the closed set of layout node kinds.

use serde::{Deserialize, Serialize};

use crate::utils::{HasBBox, Rect};

use super::character::{LTAnno, LTChar};
use super::component::LTComponent;
use super::container::{LTFigure, LTPage};
use super::graphics::{LTCurve, LTImage, LTLine, LTRect};
use super::textbox::LTTextBox;
use super::textline::LTTextLine;

/// A node kind the converter does not special-case.
///
/// Carries the upstream kind name for diagnostics and an optional bbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LTOther {
    pub kind: String,
    #[serde(default)]
    pub bbox: Option<LTComponent>,
}

impl LTOther {
    pub fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            bbox: None,
        }
    }
}

/// Any node of a page's layout tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LTItem {
    Page(Box<LTPage>),
    Line(LTLine),
    Rect(LTRect),
    Curve(LTCurve),
    Figure(Box<LTFigure>),
    Image(LTImage),
    TextBox(LTTextBox),
    TextLine(LTTextLine),
    Char(LTChar),
    Anno(LTAnno),
    Other(LTOther),
}

impl LTItem {
    /// Short lowercase name of the node kind, used in log messages.
    pub fn kind(&self) -> &str {
        match self {
            LTItem::Page(_) => "page",
            LTItem::Line(_) => "line",
            LTItem::Rect(_) => "rect",
            LTItem::Curve(_) => "curve",
            LTItem::Figure(_) => "figure",
            LTItem::Image(_) => "image",
            LTItem::TextBox(_) => "textbox",
            LTItem::TextLine(_) => "textline",
            LTItem::Char(_) => "char",
            LTItem::Anno(_) => "anno",
            LTItem::Other(o) => &o.kind,
        }
    }

    /// Bounding box of the node, if it has one.
    pub fn bbox(&self) -> Option<Rect> {
        match self {
            LTItem::Page(p) => Some(p.bbox()),
            LTItem::Line(l) => Some(l.bbox()),
            LTItem::Rect(r) => Some(r.bbox()),
            LTItem::Curve(c) => Some(c.bbox()),
            LTItem::Figure(f) => Some(f.bbox()),
            LTItem::Image(i) => Some(i.bbox()),
            LTItem::TextBox(t) => Some(t.bbox()),
            LTItem::TextLine(t) => Some(t.bbox()),
            LTItem::Char(c) => Some(c.bbox()),
            LTItem::Anno(_) => None,
            LTItem::Other(o) => o.bbox.as_ref().map(HasBBox::bbox),
        }
    }
}

impl From<LTTextBox> for LTItem {
    fn from(b: LTTextBox) -> Self {
        LTItem::TextBox(b)
    }
}

impl From<LTImage> for LTItem {
    fn from(i: LTImage) -> Self {
        LTItem::Image(i)
    }
}

impl From<LTFigure> for LTItem {
    fn from(f: LTFigure) -> Self {
        LTItem::Figure(Box::new(f))
    }
}

impl From<LTRect> for LTItem {
    fn from(r: LTRect) -> Self {
        LTItem::Rect(r)
    }
}

impl From<LTLine> for LTItem {
    fn from(l: LTLine) -> Self {
        LTItem::Line(l)
    }
}

impl From<LTCurve> for LTItem {
    fn from(c: LTCurve) -> Self {
        LTItem::Curve(c)
    }
}
