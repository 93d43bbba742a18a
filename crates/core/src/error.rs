//! Error types for the pdfscope document model.

use thiserror::Error;

/// Primary error type for document, form and lookup operations.
#[derive(Error, Debug)]
pub enum PdfError {
    #[error("invalid token at position {pos}: {msg}")]
    TokenError { pos: usize, msg: String },

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("type error: expected {expected}, got {got}")]
    TypeError {
        expected: &'static str,
        got: &'static str,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("PDF object not found: {0}")]
    ObjectNotFound(u32),

    #[error("PDF object {objid} {genno} could not be recovered from the raw bytes")]
    ObjectRecovery { objid: u32, genno: u32 },

    #[error("no valid xref table found")]
    NoValidXRef,

    #[error("PDF syntax error: {0}")]
    SyntaxError(String),

    #[error("encrypted documents are not supported")]
    Encrypted,

    #[error("bounding box needs exactly 4 values, got {0}")]
    InvalidGeometry(usize),

    #[error("page {0} has not been converted")]
    PageNotFound(usize),

    #[error("document has no interactive form")]
    NoInputFields,

    #[error("no form field named or labelled '{0}'")]
    FieldNotFound(String),

    #[error("label '{label}' matches several fields: {}", candidates.join(", "))]
    AmbiguousField {
        label: String,
        candidates: Vec<String>,
    },

    #[error("coordinates need 2 or 4 values: '{0}'")]
    InvalidCoordinates(String),

    #[error("unknown search direction: '{0}'")]
    InvalidDirection(String),

    #[error("invalid regular expression: {0}")]
    InvalidRegex(#[from] regex::Error),

    #[error("unknown text encoding: {0}")]
    UnknownEncoding(String),

    #[error("layout analysis failed: {0}")]
    Layout(String),

    #[error("document has been closed")]
    DocumentClosed,

    #[error("no document is open")]
    NoDocument,
}

/// Convenience Result type alias for PdfError.
pub type Result<T> = std::result::Result<T, PdfError>;
