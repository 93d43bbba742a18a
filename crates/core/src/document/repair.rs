//! Object position recovery.
//!
//! When an xref offset does not point at the expected `N G obj` header the
//! raw file bytes are scanned once for that header. The last occurrence
//! wins so that incremental updates take precedence over older revisions.

use regex::bytes::Regex;
use tracing::{debug, info};

/// Scans `data` for the header of object `(objid, genno)`.
///
/// Returns the byte offset of the object number.
pub fn locate_object(data: &[u8], objid: u32, genno: u32) -> Option<usize> {
    // The leading class keeps "12 0 obj" from matching inside "112 0 obj".
    let pattern = format!(r"(?-u)(?:^|[^0-9])({}\s+{}\s+obj)\b", objid, genno);
    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(err) => {
            debug!(objid, genno, %err, "could not build recovery pattern");
            return None;
        }
    };
    let found = re
        .captures_iter(data)
        .filter_map(|cap| cap.get(1))
        .last()
        .map(|m| m.start());
    match found {
        Some(pos) => info!(objid, genno, pos, "recovered object position by scanning"),
        None => info!(objid, genno, "object header not found by scanning"),
    }
    found
}
