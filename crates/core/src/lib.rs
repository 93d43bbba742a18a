//! pdfscope - structured text, figure and form access for PDF documents.
//!
//! Layout trees from an upstream interpreter are converted into pages of
//! text boxes and figures. On top of that the crate offers anchor-relative
//! text lookup and AcroForm field reading and writing.

pub mod converter;
pub mod document;
pub mod dom;
pub mod error;
pub mod finder;
pub mod forms;
pub mod geometry;
pub mod layout;
pub mod model;
pub mod parser;
pub mod session;
pub mod utils;

pub use dom::{Document, Figure, Page, PageContent, TextBox};
pub use error::{PdfError, Result};
pub use finder::{Anchor, Direction, FindOptions, Locator};
pub use forms::{FieldOptions, FieldRecord, SaveOptions};
pub use geometry::BoundingBox;
pub use layout::{LAParams, LayoutSource, MemoryLayoutSource};
pub use session::PdfSession;
