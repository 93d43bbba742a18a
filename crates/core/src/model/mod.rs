//! PDF model types.
//!
//! - `objects` - PDF object types (PDFObject, PDFStream, PDFObjRef)

pub mod objects;

pub use objects::{PDFDict, PDFObjRef, PDFObject, PDFStream};
