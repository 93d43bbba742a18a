//! Layout tree produced by the upstream content-stream interpreter.
//!
//! This module contains:
//! - Layout node types (LTPage, LTFigure, LTTextBox, LTChar, etc.)
//! - Layout analysis parameters (LAParams)
//! - The `LayoutSource` seam that yields one LTPage per analysed page

pub mod elements;
pub mod params;
pub mod source;

pub use elements::*;
pub use params::*;
pub use source::*;
