//! Search direction and options for anchor-relative lookups.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PdfError;

/// Where candidates are searched relative to the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Right,
    Left,
    Up,
    Down,
    /// Inside the anchor's box.
    Box,
}

impl Direction {
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::Right | Direction::Left)
    }

    pub const fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

impl FromStr for Direction {
    type Err = PdfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "right" => Ok(Direction::Right),
            "left" => Ok(Direction::Left),
            "top" | "up" => Ok(Direction::Up),
            "bottom" | "down" => Ok(Direction::Down),
            "box" => Ok(Direction::Box),
            _ => Err(PdfError::InvalidDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Right => "right",
            Direction::Left => "left",
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Box => "box",
        };
        f.write_str(name)
    }
}

/// Options for [`crate::dom::Document::find_text`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindOptions {
    /// 1-based page to search.
    pub pagenum: usize,
    pub direction: Direction,
    /// Vertical matches must share the anchor's left or right edge.
    pub strict: bool,
    /// Pattern the candidate text must match from its start.
    pub regexp: Option<String>,
    /// Return only the nearest candidate.
    pub only_closest: bool,
}

impl Default for FindOptions {
    fn default() -> Self {
        Self {
            pagenum: 1,
            direction: Direction::Right,
            strict: false,
            regexp: None,
            only_closest: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_aliases() {
        assert_eq!("top".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!("up".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!("bottom".parse::<Direction>().unwrap(), Direction::Down);
        assert_eq!("Down".parse::<Direction>().unwrap(), Direction::Down);
        assert_eq!("box".parse::<Direction>().unwrap(), Direction::Box);
    }

    #[test]
    fn test_unknown_direction() {
        assert!(matches!(
            "diagonal".parse::<Direction>(),
            Err(PdfError::InvalidDirection(d)) if d == "diagonal"
        ));
    }

    #[test]
    fn test_defaults() {
        let options = FindOptions::default();
        assert_eq!(options.pagenum, 1);
        assert_eq!(options.direction, Direction::Right);
        assert!(!options.strict);
        assert!(options.regexp.is_none());
        assert!(options.only_closest);
    }
}
