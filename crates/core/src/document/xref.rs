//! Cross-reference tables.
//!
//! Traditional `xref` sections are parsed here directly. Xref streams need
//! object parsing and stream decoding and are loaded by the reader, which
//! also drives the `/Prev` chain.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::bytes::Regex;

use crate::error::{PdfError, Result};
use crate::model::objects::PDFDict;
use crate::parser::PDFParser;

/// Matches an indirect object header anywhere in the file.
static OBJ_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s+(\d+)\s+obj\b").expect("valid object header regex"));

/// Location of an object in the PDF file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XRefEntry {
    /// Uncompressed object at a byte offset.
    Offset { offset: usize, genno: u32 },
    /// Object `index` inside the object stream `stream_objid`.
    Compressed { stream_objid: u32, index: usize },
}

impl XRefEntry {
    pub const fn genno(&self) -> u32 {
        match self {
            XRefEntry::Offset { genno, .. } => *genno,
            XRefEntry::Compressed { .. } => 0,
        }
    }
}

/// One cross-reference section with its trailer.
#[derive(Debug, Default, Clone)]
pub struct XRef {
    pub offsets: HashMap<u32, XRefEntry>,
    pub trailer: PDFDict,
    /// Built by scanning the file for object headers
    pub is_fallback: bool,
}

impl XRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, objid: u32) -> Option<&XRefEntry> {
        self.offsets.get(&objid)
    }

    pub fn objids(&self) -> impl Iterator<Item = u32> + '_ {
        self.offsets.keys().copied()
    }
}

fn is_eol_or_space(b: u8) -> bool {
    matches!(b, b' ' | b'\n' | b'\r' | b'\t')
}

fn skip_space(data: &[u8], mut cursor: usize) -> usize {
    while cursor < data.len() && is_eol_or_space(data[cursor]) {
        cursor += 1;
    }
    cursor
}

/// Reads an unsigned decimal number, returning (value, bytes consumed).
pub fn read_number(data: &[u8]) -> Result<(u64, usize)> {
    let len = data.iter().take_while(|b| b.is_ascii_digit()).count();
    if len == 0 {
        return Err(PdfError::SyntaxError("expected number".into()));
    }
    let value = std::str::from_utf8(&data[..len])
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| PdfError::SyntaxError("invalid number".into()))?;
    Ok((value, len))
}

/// Finds the offset named by the last `startxref` in the file.
pub fn find_startxref(data: &[u8]) -> Result<usize> {
    let needle = b"startxref";
    let search_start = data.len().saturating_sub(1024);
    let found = data[search_start..]
        .windows(needle.len())
        .rposition(|w| w == needle)
        .ok_or(PdfError::NoValidXRef)?;
    let rest = &data[search_start + found + needle.len()..];
    let start = skip_space(rest, 0);
    let (pos, _) = read_number(&rest[start..]).map_err(|_| PdfError::NoValidXRef)?;
    usize::try_from(pos).map_err(|_| PdfError::NoValidXRef)
}

/// Parses the trailer dictionary that starts at `pos` (after `trailer`).
fn parse_trailer_dict(data: &[u8], pos: usize) -> Option<PDFDict> {
    let cursor = skip_space(data, pos);
    if !data[cursor..].starts_with(b"<<") {
        return None;
    }
    let mut parser = PDFParser::new(&data[cursor..]);
    parser
        .parse_object()
        .ok()
        .and_then(|obj| obj.as_dict().ok().cloned())
}

/// Loads a traditional `xref` table and its trailer at `pos`.
pub fn load_traditional_xref(data: &[u8], pos: usize) -> Result<XRef> {
    let mut xref = XRef::new();
    let mut cursor = pos + 4; // "xref"

    loop {
        cursor = skip_space(data, cursor);
        if cursor >= data.len() {
            break;
        }
        if data[cursor..].starts_with(b"trailer") {
            cursor += 7;
            break;
        }

        let (start_objid, consumed) = read_number(&data[cursor..])?;
        cursor += consumed;
        cursor = skip_space(data, cursor);
        let (count, consumed) = read_number(&data[cursor..])?;
        cursor += consumed;

        let mut base_objid = start_objid;
        for i in 0..count {
            cursor = skip_space(data, cursor);
            let (offset, consumed) = read_number(&data[cursor..])?;
            cursor += consumed;
            cursor = skip_space(data, cursor);
            let (genno, consumed) = read_number(&data[cursor..])?;
            cursor += consumed;
            cursor = skip_space(data, cursor);
            let marker = data.get(cursor).copied().unwrap_or(b'f');
            cursor += 1;

            // Some writers start a subsection at 1 but still include the
            // object 0 free entry.
            if i == 0 && base_objid > 0 && marker == b'f' && offset == 0 && genno == 65535 {
                base_objid -= 1;
            }

            if marker == b'n'
                && let (Ok(objid), Ok(offset), Ok(genno)) = (
                    u32::try_from(base_objid + i),
                    usize::try_from(offset),
                    u32::try_from(genno),
                )
            {
                xref.offsets
                    .insert(objid, XRefEntry::Offset { offset, genno });
            }
        }
    }

    if let Some(trailer) = parse_trailer_dict(data, cursor) {
        xref.trailer = trailer;
    }

    Ok(xref)
}

/// Builds an xref by scanning the whole file for `N G obj` headers.
///
/// Later headers override earlier ones, matching incremental updates.
pub fn load_xref_fallback(data: &[u8]) -> Result<XRef> {
    let mut xref = XRef::new();
    xref.is_fallback = true;

    for cap in OBJ_HEADER.captures_iter(data) {
        let parse = |i: usize| {
            cap.get(i)
                .and_then(|m| std::str::from_utf8(m.as_bytes()).ok())
                .and_then(|s| s.parse::<u32>().ok())
        };
        let (Some(objid), Some(genno), Some(whole)) = (parse(1), parse(2), cap.get(0)) else {
            continue;
        };
        xref.offsets.insert(
            objid,
            XRefEntry::Offset {
                offset: whole.start(),
                genno,
            },
        );
    }

    if let Some(trailer_pos) = find_trailer(data)
        && let Some(trailer) = parse_trailer_dict(data, trailer_pos + 7)
    {
        xref.trailer = trailer;
    }

    if xref.offsets.is_empty() {
        return Err(PdfError::NoValidXRef);
    }

    Ok(xref)
}

/// Position of the last `trailer` keyword.
fn find_trailer(data: &[u8]) -> Option<usize> {
    data.windows(7).rposition(|w| w == b"trailer")
}
