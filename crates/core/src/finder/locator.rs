//! Anchor locators: `text:<label>`, `coords:<x,y>` or `coords:<l,b,r,t>`.

use std::fmt;
use std::str::FromStr;

use crate::error::{PdfError, Result};
use crate::geometry::{BoundingBox, Coordinate};

/// What an anchor is looked up by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// Exact, case-insensitive text of a text box.
    Text(String),
    /// A synthetic box at fixed coordinates.
    Coords(BoundingBox),
}

impl Locator {
    pub fn parse(locator: &str) -> Result<Self> {
        if let Some(coords) = locator.strip_prefix("coords:") {
            return parse_coords(coords).map(Locator::Coords);
        }
        let text = locator.strip_prefix("text:").unwrap_or(locator);
        Ok(Locator::Text(text.to_string()))
    }
}

impl FromStr for Locator {
    type Err = PdfError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Text(text) => write!(f, "text:{text}"),
            Locator::Coords(bbox) => write!(f, "coords:{bbox}"),
        }
    }
}

/// Two values are a point, four are `left,bottom,right,top`.
fn parse_coords(coords: &str) -> Result<BoundingBox> {
    let invalid = || PdfError::InvalidCoordinates(coords.to_string());
    let values = coords
        .split(',')
        .map(|v| v.trim().parse::<f64>().map_err(|_| invalid()))
        .collect::<Result<Vec<f64>>>()?;
    match values.as_slice() {
        &[x, y] => Ok(BoundingBox::point(x.to_coordinate(), y.to_coordinate())),
        [_, _, _, _] => BoundingBox::from_values(values),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text() {
        assert_eq!(
            Locator::parse("text:Invoice Number").unwrap(),
            Locator::Text("Invoice Number".into())
        );
    }

    #[test]
    fn test_no_prefix_is_text() {
        assert_eq!(Locator::parse("Total").unwrap(), Locator::Text("Total".into()));
    }

    #[test]
    fn test_parse_point() {
        assert_eq!(
            Locator::parse("coords:50,700").unwrap(),
            Locator::Coords(BoundingBox::new(50, 700, 50, 700))
        );
    }

    #[test]
    fn test_parse_box() {
        assert_eq!(
            "coords:50.5, 700, 150, 710.9".parse::<Locator>().unwrap(),
            Locator::Coords(BoundingBox::new(50, 700, 150, 710))
        );
    }

    #[test]
    fn test_parse_bad_coords() {
        for bad in ["coords:1,2,3", "coords:1", "coords:a,b", "coords:1,2,3,4,5"] {
            assert!(
                matches!(Locator::parse(bad), Err(PdfError::InvalidCoordinates(_))),
                "{bad}"
            );
        }
    }
}
