//! Miscellaneous routines shared by the layout, converter and reader modules.
//!
//! - Geometric aliases (Point, Rect) and the `HasBBox` trait
//! - Text formatting for the XML dump
//! - Binary data helpers

use std::borrow::Cow;

/// Floating-point infinity for bounding box calculations.
pub const INF_F64: f64 = f64::MAX;

/// A 2D point (x, y).
pub type Point = (f64, f64);

/// A rectangle defined by (x0, y0, x1, y1) where (x0, y0) is bottom-left
/// and (x1, y1) is top-right.
pub type Rect = (f64, f64, f64, f64);

/// Trait for objects that have a bounding box.
pub trait HasBBox {
    fn x0(&self) -> f64;
    fn y0(&self) -> f64;
    fn x1(&self) -> f64;
    fn y1(&self) -> f64;

    fn bbox(&self) -> Rect {
        (self.x0(), self.y0(), self.x1(), self.y1())
    }

    fn width(&self) -> f64 {
        self.x1() - self.x0()
    }

    fn height(&self) -> f64 {
        self.y1() - self.y0()
    }
}

/// Returns the smallest rectangle containing all points.
pub fn get_bound<I: IntoIterator<Item = Point>>(pts: I) -> Rect {
    let mut x0 = INF_F64;
    let mut y0 = INF_F64;
    let mut x1 = -INF_F64;
    let mut y1 = -INF_F64;

    for (x, y) in pts {
        x0 = x0.min(x);
        y0 = y0.min(y);
        x1 = x1.max(x);
        y1 = y1.max(y);
    }

    (x0, y0, x1, y1)
}

/// Formats a bounding box as space-separated floats.
pub fn bbox2str(bbox: Rect) -> String {
    let (x0, y0, x1, y1) = bbox;
    format!("{:.3} {:.3} {:.3} {:.3}", x0, y0, x1, y1)
}

/// Encodes a string for XML attributes and text by escaping special characters.
pub fn enc(x: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(x)
}

/// Unpacks a big-endian unsigned integer of 0..=8 bytes.
pub fn nunpack(s: &[u8], default: u64) -> u64 {
    if s.is_empty() {
        return default;
    }
    let mut result: u64 = 0;
    for &byte in s {
        result = (result << 8) | (byte as u64);
    }
    result
}

/// Decodes bytes as ISO-8859-1 (every byte maps to the same code point).
pub fn latin1_decode(s: &[u8]) -> String {
    s.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nunpack() {
        assert_eq!(nunpack(&[], 0), 0);
        assert_eq!(nunpack(&[1], 0), 1);
        assert_eq!(nunpack(&[1, 2], 0), 258);
    }

    #[test]
    fn test_bbox2str_space_separated() {
        assert_eq!(bbox2str((1.0, 2.5, 3.0, 4.0)), "1.000 2.500 3.000 4.000");
    }

    #[test]
    fn test_get_bound() {
        let rect = get_bound([(3.0, 1.0), (1.0, 4.0), (2.0, 2.0)]);
        assert_eq!(rect, (1.0, 1.0, 3.0, 4.0));
    }

    #[test]
    fn test_enc_escapes_markup() {
        assert_eq!(enc("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }

    #[test]
    fn test_latin1_decode() {
        assert_eq!(latin1_decode(&[0x63, 0x61, 0x66, 0xE9]), "café");
    }
}
