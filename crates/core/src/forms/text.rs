//! PDF text string decoding and encoding for form values.

use encoding_rs::{Encoding, UTF_8, UTF_16BE};
use tracing::info;

use crate::error::{PdfError, Result};
use crate::utils::latin1_decode;

/// Looks up an encoding by its WHATWG label (`utf-8`, `windows-1252`, ...).
pub fn lookup_encoding(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| PdfError::UnknownEncoding(label.to_string()))
}

/// Decodes a PDF text string.
///
/// A UTF-16BE or UTF-8 byte order mark wins; otherwise `encoding` is tried
/// strictly and ISO-8859-1 is the fallback, which never fails.
pub fn decode_text(data: &[u8], encoding: &'static Encoding) -> String {
    if let Some(rest) = data.strip_prefix(b"\xfe\xff") {
        let (text, _) = UTF_16BE.decode_without_bom_handling(rest);
        return text.into_owned();
    }
    if let Some(rest) = data.strip_prefix(b"\xef\xbb\xbf") {
        let (text, _) = UTF_8.decode_without_bom_handling(rest);
        return text.into_owned();
    }
    match encoding.decode_without_bom_handling_and_without_replacement(data) {
        Some(text) => text.into_owned(),
        None => {
            info!(
                encoding = encoding.name(),
                len = data.len(),
                "text string falls back to iso-8859-1"
            );
            latin1_decode(data)
        }
    }
}

/// Encodes `text` as a PDF text string: Latin-1 when every char fits,
/// UTF-16BE with a byte order mark otherwise.
pub fn encode_text(text: &str) -> Vec<u8> {
    let latin1: Option<Vec<u8>> = text.chars().map(|ch| u8::try_from(ch).ok()).collect();
    match latin1 {
        Some(bytes) => bytes,
        None => {
            let mut out = vec![0xfe, 0xff];
            for unit in text.encode_utf16() {
                out.extend_from_slice(&unit.to_be_bytes());
            }
            out
        }
    }
}
