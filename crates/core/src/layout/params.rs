//! Layout analysis parameters.
//!
//! These are handed to the upstream interpreter for every analysed page.

use serde::{Deserialize, Serialize};

/// Parameters for layout analysis.
///
/// Controls how characters are grouped into lines, words, and text boxes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LAParams {
    /// If two characters have more overlap than this they are considered to be
    /// on the same line. Specified relative to the minimum height of both characters.
    pub line_overlap: f64,

    /// If two characters are closer together than this margin they are considered
    /// part of the same line. Specified relative to the width of the character.
    pub char_margin: f64,

    /// If two lines are close together they are considered to be part of the
    /// same paragraph. Specified relative to the height of a line.
    pub line_margin: f64,

    /// If two characters on the same line are further apart than this margin then
    /// they are considered to be two separate words.
    pub word_margin: f64,

    /// How much horizontal and vertical position of text matters when
    /// determining order. None disables advanced layout analysis.
    pub boxes_flow: Option<f64>,

    /// If vertical text should be considered during layout analysis.
    pub detect_vertical: bool,

    /// If layout analysis should be performed on text in figures.
    pub all_texts: bool,
}

impl Default for LAParams {
    fn default() -> Self {
        Self {
            line_overlap: 0.5,
            char_margin: 2.0,
            line_margin: 0.5,
            word_margin: 0.1,
            boxes_flow: Some(0.5),
            detect_vertical: false,
            all_texts: false,
        }
    }
}

impl LAParams {
    /// Parameters used by document conversion when the caller has not
    /// configured any: vertical text detection on, text inside figures analysed.
    pub fn for_document() -> Self {
        Self {
            detect_vertical: true,
            all_texts: true,
            ..Self::default()
        }
    }

    /// Overrides whichever margins are given, keeping the rest.
    pub fn with_margins(
        mut self,
        line_margin: Option<f64>,
        char_margin: Option<f64>,
        word_margin: Option<f64>,
    ) -> Self {
        if let Some(m) = line_margin {
            self.line_margin = m;
        }
        if let Some(m) = char_margin {
            self.char_margin = m;
        }
        if let Some(m) = word_margin {
            self.word_margin = m;
        }
        self
    }
}
