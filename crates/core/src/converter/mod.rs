//! Conversion of layout trees into the document model.
//!
//! - `walker`: depth-first Converter populating one Page per layout tree
//! - `xml`: XML trace accumulator written during the walk

pub mod walker;
pub mod xml;

pub use walker::{Converter, FigureKey};
pub use xml::XmlDump;
