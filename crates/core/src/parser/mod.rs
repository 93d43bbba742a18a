//! PDF file syntax.
//!
//! - `lexer`: tokenizer over raw file bytes
//! - `pdf_parser`: object parser building `PDFObject` values

pub mod lexer;
pub mod pdf_parser;

pub use lexer::{Keyword, Lexer, Token};
pub use pdf_parser::PDFParser;
