//! Layout element types emitted by the upstream content-stream interpreter.
//!
//! Contains the LT* node definitions that make up one page's layout tree:
//! - LTComponent: Base type for objects with bounding boxes
//! - LTChar / LTAnno: Real and virtual characters
//! - LTTextLine / LTTextBox: Lines and boxes of text
//! - LTCurve, LTLine, LTRect: Graphical elements
//! - LTImage: Image placement
//! - LTFigure / LTPage: Containers
//! - LTItem: Closed enum over every node kind, including unknown ones

pub mod character;
pub mod component;
pub mod container;
pub mod graphics;
pub mod item;
pub mod textbox;
pub mod textline;

pub use character::{LTAnno, LTChar};
pub use component::LTComponent;
pub use container::{LTFigure, LTPage};
pub use graphics::{LTCurve, LTImage, LTLine, LTRect};
pub use item::{LTItem, LTOther};
pub use textbox::LTTextBox;
pub use textline::{LTTextLine, TextLineElement};
