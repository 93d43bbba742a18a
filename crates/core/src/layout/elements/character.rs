//! Character types: LTChar and LTAnno.

use serde::{Deserialize, Serialize};

use crate::utils::Rect;

use super::component::LTComponent;

/// Virtual character inserted by layout analysis (e.g., space, newline).
///
/// Unlike LTChar, LTAnno has no bounding box as it represents a character
/// inferred from the relationship between real characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LTAnno {
    text: String,
}

impl LTAnno {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }

    pub fn get_text(&self) -> &str {
        &self.text
    }
}

/// A single glyph with its bounding box and font information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LTChar {
    #[serde(rename = "bbox")]
    component: LTComponent,
    text: String,
    #[serde(default)]
    fontname: String,
    #[serde(default)]
    size: f64,
}

impl LTChar {
    pub fn new(bbox: Rect, text: &str, fontname: &str, size: f64) -> Self {
        Self {
            component: LTComponent::new(bbox),
            text: text.to_string(),
            fontname: fontname.to_string(),
            size,
        }
    }

    pub fn get_text(&self) -> &str {
        &self.text
    }

    pub fn fontname(&self) -> &str {
        &self.fontname
    }

    pub fn size(&self) -> f64 {
        self.size
    }
}

impl std::ops::Deref for LTChar {
    type Target = LTComponent;
    fn deref(&self) -> &Self::Target {
        &self.component
    }
}
