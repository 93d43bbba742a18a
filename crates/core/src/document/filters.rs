//! Stream decoding: FlateDecode and PNG predictors.
//!
//! Other filters are passed through untouched; nothing in this crate needs
//! the decoded bytes of image or font streams.

use std::io::Read;

use flate2::read::ZlibDecoder;
use flate2::{Decompress, FlushDecompress, Status};

use crate::model::objects::{PDFDict, PDFObject};

/// Name of the first filter in a `/Filter` entry.
pub fn first_filter(filter: &PDFObject) -> Option<&str> {
    match filter {
        PDFObject::Name(name) => Some(name.as_str()),
        PDFObject::Array(arr) => arr.first().and_then(|f| f.as_name().ok()),
        _ => None,
    }
}

/// First decode parameter dictionary in a `/DecodeParms` entry.
pub fn first_parms(parms: &PDFObject) -> Option<&PDFDict> {
    match parms {
        PDFObject::Dict(d) => Some(d),
        PDFObject::Array(arr) => arr.first().and_then(|p| p.as_dict().ok()),
        _ => None,
    }
}

/// Decodes `data` given an already resolved filter and decode parameters.
pub fn apply_filters(
    data: &[u8],
    filter: Option<&PDFObject>,
    parms: Option<&PDFObject>,
) -> Vec<u8> {
    let mut output = data.to_vec();

    if filter.and_then(first_filter) == Some("FlateDecode") {
        let mut decoder = ZlibDecoder::new(data);
        let mut decompressed = Vec::new();
        if decoder.read_to_end(&mut decompressed).is_err() {
            decompressed = decompress_corrupted(data);
        }
        output = decompressed;
    }

    if let Some(parms) = parms.and_then(first_parms) {
        let int = |key: &str, default: i64| {
            parms
                .get(key)
                .and_then(|p| p.as_int().ok())
                .unwrap_or(default)
                .max(0) as usize
        };
        if int("Predictor", 1) >= 10 {
            output = apply_png_predictor(
                &output,
                int("Columns", 1),
                int("Colors", 1),
                int("BitsPerComponent", 8),
            );
        }
    }

    output
}

/// Best-effort zlib decompression for corrupted streams.
///
/// Returns the output produced up to the point the decoder fails.
pub fn decompress_corrupted(data: &[u8]) -> Vec<u8> {
    let mut decoder = Decompress::new(true);
    let mut out = Vec::with_capacity(data.len() * 2);
    let mut buf = [0u8; 4096];
    let mut i = 0usize;
    while i < data.len() {
        let before_out = decoder.total_out();
        let before_in = decoder.total_in();
        let res = decoder.decompress(&data[i..i + 1], &mut buf, FlushDecompress::None);
        let produced = (decoder.total_out() - before_out) as usize;
        out.extend_from_slice(&buf[..produced]);
        let consumed = (decoder.total_in() - before_in) as usize;
        i += consumed.max(1);
        match res {
            Ok(Status::StreamEnd) | Err(_) => break,
            Ok(_) => {}
        }
    }
    out
}

/// Reverses PNG row filters (one filter byte per row).
pub fn apply_png_predictor(
    data: &[u8],
    columns: usize,
    colors: usize,
    bits_per_component: usize,
) -> Vec<u8> {
    let row_bytes = (colors * columns * bits_per_component).div_ceil(8);
    let bpp = std::cmp::max(1, colors * bits_per_component / 8);
    let row_size = row_bytes + 1;

    let mut result = Vec::with_capacity(data.len());
    let mut prev_row = vec![0u8; row_bytes];

    for row in data.chunks_exact(row_size) {
        let filter_type = row[0];
        let row_data = &row[1..];
        let mut current = vec![0u8; row_bytes];

        for i in 0..row_bytes {
            let left = if i >= bpp { current[i - bpp] } else { 0 };
            let above = prev_row[i];
            let upper_left = if i >= bpp { prev_row[i - bpp] } else { 0 };
            let predicted = match filter_type {
                1 => left,
                2 => above,
                3 => ((left as u16 + above as u16) / 2) as u8,
                4 => paeth_predictor(left, above, upper_left),
                _ => 0,
            };
            current[i] = row_data[i].wrapping_add(predicted);
        }

        result.extend_from_slice(&current);
        prev_row = current;
    }

    result
}

const fn paeth_predictor(left: u8, above: u8, upper_left: u8) -> u8 {
    let a = left as i32;
    let b = above as i32;
    let c = upper_left as i32;
    let p = a + b - c;
    let pa = (p - a).abs();
    let pb = (p - b).abs();
    let pc = (p - c).abs();

    if pa <= pb && pa <= pc {
        left
    } else if pb <= pc {
        above
    } else {
        upper_left
    }
}
