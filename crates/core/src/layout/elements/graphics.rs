//! Graphical elements: LTCurve, LTLine, LTRect, LTImage.

use serde::{Deserialize, Serialize};

use crate::utils::{Point, Rect, get_bound};

use super::component::LTComponent;

/// A generic Bezier curve.
///
/// `pts` holds the control points; the bounding box is derived from them
/// when built with [`LTCurve::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LTCurve {
    #[serde(rename = "bbox")]
    component: LTComponent,
    #[serde(default)]
    pub pts: Vec<Point>,
    #[serde(default)]
    pub linewidth: f64,
}

impl LTCurve {
    pub fn new(linewidth: f64, pts: Vec<Point>) -> Self {
        let bbox = get_bound(pts.iter().copied());
        Self {
            component: LTComponent::new(bbox),
            pts,
            linewidth,
        }
    }

    /// Returns the control points formatted as "x,y,x,y,...".
    pub fn get_pts(&self) -> String {
        self.pts
            .iter()
            .map(|(x, y)| format!("{:.3},{:.3}", x, y))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl std::ops::Deref for LTCurve {
    type Target = LTComponent;
    fn deref(&self) -> &Self::Target {
        &self.component
    }
}

/// A single straight line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LTLine {
    #[serde(rename = "bbox")]
    component: LTComponent,
    #[serde(default)]
    pub linewidth: f64,
}

impl LTLine {
    pub fn new(linewidth: f64, p0: Point, p1: Point) -> Self {
        Self {
            component: LTComponent::new(get_bound([p0, p1])),
            linewidth,
        }
    }
}

impl std::ops::Deref for LTLine {
    type Target = LTComponent;
    fn deref(&self) -> &Self::Target {
        &self.component
    }
}

/// A rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LTRect {
    #[serde(rename = "bbox")]
    component: LTComponent,
    #[serde(default)]
    pub linewidth: f64,
}

impl LTRect {
    pub fn new(linewidth: f64, bbox: Rect) -> Self {
        Self {
            component: LTComponent::new(bbox),
            linewidth,
        }
    }
}

impl std::ops::Deref for LTRect {
    type Target = LTComponent;
    fn deref(&self) -> &Self::Target {
        &self.component
    }
}

/// An image placed on the page.
///
/// `srcsize` is the pixel size of the source image; either dimension may be
/// unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LTImage {
    #[serde(rename = "bbox")]
    component: LTComponent,
    pub name: String,
    #[serde(default)]
    pub srcsize: (Option<i32>, Option<i32>),
}

impl LTImage {
    pub fn new(name: &str, bbox: Rect, srcsize: (Option<i32>, Option<i32>)) -> Self {
        Self {
            component: LTComponent::new(bbox),
            name: name.to_string(),
            srcsize,
        }
    }
}

impl std::ops::Deref for LTImage {
    type Target = LTComponent;
    fn deref(&self) -> &Self::Target {
        &self.component
    }
}
