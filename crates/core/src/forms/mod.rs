//! AcroForm field access.
//!
//! - `fields`: reading, setting and saving field values on a `Document`
//! - `text`: PDF text string decoding with legacy fallback

mod fields;
pub mod text;

pub use fields::{FieldOptions, FieldRecord, SaveOptions};
