//! Low-level PDF object graph access.
//!
//! This module contains:
//! - `xref` - cross-reference tables and the whole-file fallback scan
//! - `reader` - object resolution over the xref chain (ObjectReader)
//! - `repair` - recovery of objects whose xref offset is wrong
//! - `filters` - stream decoding
//! - `writer` - full rewrite of a modified object graph (ObjectStore)

pub mod filters;
pub mod reader;
pub mod repair;
pub mod writer;
pub mod xref;

pub use reader::ObjectReader;
pub use writer::ObjectStore;
pub use xref::{XRef, XRefEntry};
