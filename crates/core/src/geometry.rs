//! Integer bounding boxes shared by every positioned element.
//!
//! Coordinates coming from the layout tree are floats; they are truncated
//! toward zero on ingestion so that anchor tolerances work on whole units.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PdfError, Result};
use crate::utils::Rect;

/// Values that can be coerced into an integer coordinate.
pub trait Coordinate: Copy {
    fn to_coordinate(self) -> i64;
}

macro_rules! impl_coordinate {
    ($($t:ty),*) => {
        $(impl Coordinate for $t {
            fn to_coordinate(self) -> i64 {
                self as i64
            }
        })*
    };
}

impl_coordinate!(f64, f32, i64, i32, u32, usize);

/// Bounding box `(left, bottom, right, top)` in whole PDF units.
///
/// `left <= right` and `bottom <= top` are expected but not enforced, the
/// upstream layout data is trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    left: i64,
    bottom: i64,
    right: i64,
    top: i64,
}

impl BoundingBox {
    pub const fn new(left: i64, bottom: i64, right: i64, top: i64) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
        }
    }

    /// Builds a box from exactly four numeric values, truncating each one.
    pub fn from_values<I, T>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Coordinate,
    {
        let coords: Vec<i64> = values.into_iter().map(Coordinate::to_coordinate).collect();
        match coords.as_slice() {
            [left, bottom, right, top] => Ok(Self::new(*left, *bottom, *right, *top)),
            _ => Err(PdfError::InvalidGeometry(coords.len())),
        }
    }

    /// A zero-area box at a single point.
    pub const fn point(x: i64, y: i64) -> Self {
        Self::new(x, y, x, y)
    }

    pub const fn left(&self) -> i64 {
        self.left
    }

    pub const fn bottom(&self) -> i64 {
        self.bottom
    }

    pub const fn right(&self) -> i64 {
        self.right
    }

    pub const fn top(&self) -> i64 {
        self.top
    }

    pub const fn width(&self) -> i64 {
        self.right - self.left
    }

    pub const fn height(&self) -> i64 {
        self.top - self.bottom
    }

    /// True if `other` lies inside this box on all four sides.
    pub const fn contains(&self, other: &BoundingBox) -> bool {
        other.left >= self.left
            && other.bottom >= self.bottom
            && other.right <= self.right
            && other.top <= self.top
    }

    pub const fn as_tuple(&self) -> (i64, i64, i64, i64) {
        (self.left, self.bottom, self.right, self.top)
    }
}

impl From<Rect> for BoundingBox {
    fn from(rect: Rect) -> Self {
        let (x0, y0, x1, y1) = rect;
        Self::new(
            x0.to_coordinate(),
            y0.to_coordinate(),
            x1.to_coordinate(),
            y1.to_coordinate(),
        )
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.left, self.bottom, self.right, self.top
        )
    }
}
