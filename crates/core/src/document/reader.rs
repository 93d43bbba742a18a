//! Object graph reader.
//!
//! Loads the cross-reference chain of a PDF held in memory and resolves
//! indirect objects on demand. Offsets that do not lead to the expected
//! object header are recovered by a single raw-byte scan.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::rc::Rc;

use bytes::Bytes;
use tracing::{debug, info, warn};

use crate::error::{PdfError, Result};
use crate::model::objects::{PDFDict, PDFObjRef, PDFObject, PDFStream};
use crate::parser::PDFParser;

use super::filters;
use super::repair;
use super::xref::{self, XRef, XRefEntry};

/// Decoded object stream: (data, offsets of each object).
type ObjStmData = Rc<(Vec<u8>, Vec<usize>)>;

/// Random-access reader over the objects of one PDF file.
pub struct ObjectReader {
    data: Bytes,
    /// Newest section first
    xrefs: Vec<XRef>,
    trailer: PDFDict,
    catalog: PDFDict,
    root: Option<PDFObjRef>,
    cache: RefCell<HashMap<u32, PDFObject>>,
    resolving: RefCell<HashSet<u32>>,
    recovered: RefCell<HashMap<(u32, u32), Option<usize>>>,
    objstm_cache: RefCell<HashMap<u32, ObjStmData>>,
    objstm_index: RefCell<Option<HashMap<u32, (u32, usize)>>>,
}

impl ObjectReader {
    /// Parses the cross-reference data of `data`.
    ///
    /// Fails with [`PdfError::Encrypted`] for encrypted documents.
    pub fn new(data: impl Into<Bytes>) -> Result<Self> {
        let mut reader = Self {
            data: data.into(),
            xrefs: Vec::new(),
            trailer: PDFDict::new(),
            catalog: PDFDict::new(),
            root: None,
            cache: RefCell::new(HashMap::new()),
            resolving: RefCell::new(HashSet::new()),
            recovered: RefCell::new(HashMap::new()),
            objstm_cache: RefCell::new(HashMap::new()),
            objstm_index: RefCell::new(None),
        };
        reader.parse()?;
        Ok(reader)
    }

    fn parse(&mut self) -> Result<()> {
        let loaded = match xref::find_startxref(&self.data) {
            Ok(pos) => match self.load_xrefs(pos) {
                Ok(()) => !self.xrefs.is_empty(),
                Err(err) => {
                    info!(%err, "xref chain unreadable, scanning for objects");
                    false
                }
            },
            Err(_) => false,
        };
        if !loaded {
            self.xrefs.clear();
            self.xrefs.push(xref::load_xref_fallback(&self.data)?);
        }

        for xref in &self.xrefs {
            for (key, value) in &xref.trailer {
                if !self.trailer.contains_key(key) {
                    self.trailer.insert(key.clone(), value.clone());
                }
            }
        }

        if self.trailer.contains_key("Encrypt") {
            return Err(PdfError::Encrypted);
        }

        self.root = match self.trailer.get("Root") {
            Some(PDFObject::Ref(r)) => Some(*r),
            _ => self.find_catalog(),
        };
        if let Some(root) = self.root
            && let Ok(obj) = self.getobj(root.objid)
            && let Ok(dict) = obj.as_dict()
        {
            self.catalog = dict.clone();
        }

        Ok(())
    }

    /// Looks for a `/Type /Catalog` object when the trailer has no `/Root`.
    fn find_catalog(&self) -> Option<PDFObjRef> {
        self.objids().into_iter().find_map(|objid| {
            let obj = self.getobj(objid).ok()?;
            let is_catalog = matches!(obj.get("Type"), Some(PDFObject::Name(n)) if n == "Catalog");
            is_catalog.then(|| PDFObjRef::new(objid, self.genno(objid)))
        })
    }

    /// Loads xref sections following `/Prev` and `/XRefStm`.
    fn load_xrefs(&mut self, mut pos: usize) -> Result<()> {
        let mut visited = HashSet::new();

        while visited.insert(pos) {
            let xref = self.load_xref_at(pos)?;
            let offset_of = |key: &str| {
                xref.trailer
                    .get(key)
                    .and_then(|p| p.as_int().ok())
                    .and_then(|n| usize::try_from(n).ok())
            };
            let xref_stm = offset_of("XRefStm");
            let prev = offset_of("Prev");

            self.xrefs.push(xref);

            if let Some(stm_pos) = xref_stm
                && visited.insert(stm_pos)
                && let Ok(stm) = self.load_xref_stream(stm_pos)
            {
                self.xrefs.push(stm);
            }

            match prev {
                Some(prev_pos) => pos = prev_pos,
                None => break,
            }
        }

        Ok(())
    }

    fn load_xref_at(&self, pos: usize) -> Result<XRef> {
        let rest = self.data.get(pos..).ok_or(PdfError::NoValidXRef)?;
        if rest.starts_with(b"xref") {
            xref::load_traditional_xref(&self.data, pos)
        } else {
            self.load_xref_stream(pos)
        }
    }

    /// Loads a cross-reference stream (PDF 1.5+).
    fn load_xref_stream(&self, pos: usize) -> Result<XRef> {
        let obj = self.parse_object_at(pos, None)?;
        let stream = obj.as_stream()?;

        let widths = stream
            .get("W")
            .ok_or_else(|| PdfError::SyntaxError("missing W in xref stream".into()))?
            .as_array()?
            .iter()
            .map(|w| w.as_int().map(|n| n.max(0) as usize))
            .collect::<Result<Vec<_>>>()?;
        let &[w0, w1, w2] = widths.as_slice() else {
            return Err(PdfError::SyntaxError("W must have 3 elements".into()));
        };
        let entry_size = w0 + w1 + w2;
        if entry_size == 0 {
            return Err(PdfError::SyntaxError("empty xref stream entries".into()));
        }

        let size = stream
            .get("Size")
            .ok_or_else(|| PdfError::SyntaxError("missing Size in xref stream".into()))?
            .as_int()?
            .max(0) as u64;

        let index = match stream.get("Index") {
            Some(idx) => idx
                .as_array()?
                .chunks_exact(2)
                .map(|pair| -> Result<(u64, u64)> {
                    Ok((
                        pair[0].as_int()?.max(0) as u64,
                        pair[1].as_int()?.max(0) as u64,
                    ))
                })
                .collect::<Result<Vec<_>>>()?,
            None => vec![(0, size)],
        };

        let data = self.decode_stream(stream);
        let mut entries = data.chunks_exact(entry_size);
        let mut xref = XRef::new();

        for (start, count) in index {
            for objid in start..start + count {
                let Some(entry) = entries.next() else {
                    break;
                };
                let Ok(objid) = u32::try_from(objid) else {
                    continue;
                };
                let obj_type = if w0 > 0 {
                    crate::utils::nunpack(&entry[..w0], 1)
                } else {
                    1
                };
                let field1 = crate::utils::nunpack(&entry[w0..w0 + w1], 0);
                let field2 = crate::utils::nunpack(&entry[w0 + w1..], 0);
                match obj_type {
                    1 => {
                        xref.offsets.insert(
                            objid,
                            XRefEntry::Offset {
                                offset: field1 as usize,
                                genno: field2 as u32,
                            },
                        );
                    }
                    2 => {
                        xref.offsets.insert(
                            objid,
                            XRefEntry::Compressed {
                                stream_objid: field1 as u32,
                                index: field2 as usize,
                            },
                        );
                    }
                    _ => {}
                }
            }
        }

        for (key, value) in &stream.attrs {
            if !matches!(
                key.as_str(),
                "Length" | "Filter" | "DecodeParms" | "W" | "Index" | "Type"
            ) {
                xref.trailer.insert(key.clone(), value.clone());
            }
        }

        Ok(xref)
    }

    /// Raw file bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Trailer entries merged across all sections, newest first.
    pub fn trailer(&self) -> &PDFDict {
        &self.trailer
    }

    pub fn catalog(&self) -> &PDFDict {
        &self.catalog
    }

    /// Reference to the document catalog.
    pub fn root(&self) -> Option<PDFObjRef> {
        self.root
    }

    /// True if no xref section could be read and objects were located by scanning.
    pub fn is_fallback(&self) -> bool {
        self.xrefs.iter().all(|x| x.is_fallback)
    }

    /// All object ids listed by any xref section, ascending.
    pub fn objids(&self) -> Vec<u32> {
        let ids: BTreeSet<u32> = self.xrefs.iter().flat_map(XRef::objids).collect();
        ids.into_iter().collect()
    }

    /// Generation number recorded for `objid` (0 if unknown).
    pub fn genno(&self, objid: u32) -> u32 {
        self.xrefs
            .iter()
            .find_map(|x| x.get(objid))
            .map(XRefEntry::genno)
            .unwrap_or(0)
    }

    /// Returns object `objid`, resolving its location through the xref chain.
    pub fn getobj(&self, objid: u32) -> Result<PDFObject> {
        if objid == 0 {
            return Err(PdfError::ObjectNotFound(0));
        }
        if let Some(obj) = self.cache.borrow().get(&objid) {
            return Ok(obj.clone());
        }
        if !self.resolving.borrow_mut().insert(objid) {
            return Err(PdfError::SyntaxError(format!(
                "circular reference detected for obj {}",
                objid
            )));
        }

        let result = self.load_object(objid);
        self.resolving.borrow_mut().remove(&objid);

        let obj = result?;
        self.cache.borrow_mut().insert(objid, obj.clone());
        Ok(obj)
    }

    fn load_object(&self, objid: u32) -> Result<PDFObject> {
        for xref in &self.xrefs {
            let Some(entry) = xref.get(objid) else {
                continue;
            };
            match *entry {
                XRefEntry::Compressed {
                    stream_objid,
                    index,
                } => match self.parse_object_from_stream(stream_objid, index) {
                    Ok(obj) => return Ok(obj),
                    Err(err) => {
                        debug!(objid, stream_objid, %err, "compressed object unreadable");
                        continue;
                    }
                },
                XRefEntry::Offset { offset, genno } => {
                    let expected = PDFObjRef::new(objid, genno);
                    return match self.parse_object_at(offset, Some(expected)) {
                        Ok(obj) => Ok(obj),
                        Err(err) => {
                            info!(objid, genno, offset, %err, "xref offset is wrong, recovering");
                            self.recover(expected)
                        }
                    };
                }
            }
        }

        if let Some((stream_objid, index)) = self.objstm_lookup(objid) {
            return self.parse_object_from_stream(stream_objid, index);
        }

        Err(PdfError::ObjectNotFound(objid))
    }

    /// Re-reads an object whose indexed offset failed, scanning the file once.
    fn recover(&self, expected: PDFObjRef) -> Result<PDFObject> {
        let key = (expected.objid, expected.genno);
        let cached = self.recovered.borrow().get(&key).copied();
        let pos = match cached {
            Some(pos) => pos,
            None => {
                let pos = repair::locate_object(&self.data, expected.objid, expected.genno);
                self.recovered.borrow_mut().insert(key, pos);
                pos
            }
        };
        pos.and_then(|pos| self.parse_object_at(pos, Some(expected)).ok())
            .ok_or(PdfError::ObjectRecovery {
                objid: expected.objid,
                genno: expected.genno,
            })
    }

    /// Parses the indirect object whose header starts at `offset`.
    ///
    /// When `expected` is given the header must name that object.
    fn parse_object_at(&self, offset: usize, expected: Option<PDFObjRef>) -> Result<PDFObject> {
        if offset >= self.data.len() {
            return Err(PdfError::SyntaxError(format!(
                "object offset {} exceeds file size {}",
                offset,
                self.data.len()
            )));
        }
        let mut parser = PDFParser::new(&self.data);
        parser.set_pos(offset);
        let header = parser.parse_indirect_header()?;
        if let Some(expected) = expected
            && header != expected
        {
            return Err(PdfError::SyntaxError(format!(
                "expected object {} {} at offset {}, found {} {}",
                expected.objid, expected.genno, offset, header.objid, header.genno
            )));
        }

        match parser.parse_object()? {
            PDFObject::Dict(dict) => {
                if !parser.consume_stream_keyword() {
                    return Ok(PDFObject::Dict(dict));
                }
                let start = parser.tell();
                let end = self.stream_end(&dict, start);
                let rawdata = self.data.slice(start..end);
                Ok(PDFObject::Stream(Box::new(PDFStream::new(dict, rawdata))))
            }
            obj => Ok(obj),
        }
    }

    /// End of stream data starting at `start`.
    ///
    /// The declared `/Length` is trusted only when `endstream` follows it.
    fn stream_end(&self, dict: &PDFDict, start: usize) -> usize {
        let declared = dict
            .get("Length")
            .and_then(|len| self.resolve(len).ok())
            .and_then(|len| len.as_int().ok())
            .and_then(|len| usize::try_from(len).ok());
        if let Some(end) = declared.and_then(|len| start.checked_add(len))
            && let Some(rest) = self.data.get(end..)
        {
            let ws = rest.iter().take_while(|b| b.is_ascii_whitespace()).count();
            if rest[ws..].starts_with(b"endstream") {
                return end;
            }
        }
        find_endstream(&self.data[start..])
            .map(|off| start + off)
            .unwrap_or(self.data.len())
    }

    /// Decoded contents and object offsets of object stream `stream_objid`.
    fn objstm(&self, stream_objid: u32) -> Result<ObjStmData> {
        if let Some(cached) = self.objstm_cache.borrow().get(&stream_objid) {
            return Ok(Rc::clone(cached));
        }
        let obj = self.getobj(stream_objid)?;
        let stream = obj.as_stream()?;
        let data = self.decode_stream(stream);
        let int = |key: &str| -> Result<usize> {
            let n = stream
                .get(key)
                .ok_or_else(|| PdfError::SyntaxError(format!("missing {} in ObjStm", key)))?
                .as_int()?;
            usize::try_from(n).map_err(|_| PdfError::SyntaxError(format!("bad {} in ObjStm", key)))
        };
        let n = int("N")?;
        let first = int("First")?;
        let header = data
            .get(..first)
            .ok_or_else(|| PdfError::SyntaxError("ObjStm First beyond data".into()))?;

        let mut parser = PDFParser::new(header);
        let mut offsets = Vec::with_capacity(n);
        for _ in 0..n {
            let _objid = parser.parse_object()?.as_int()?;
            let offset = parser.parse_object()?.as_int()?;
            offsets.push(first + offset.max(0) as usize);
        }

        let parsed = Rc::new((data, offsets));
        self.objstm_cache
            .borrow_mut()
            .insert(stream_objid, Rc::clone(&parsed));
        Ok(parsed)
    }

    fn parse_object_from_stream(&self, stream_objid: u32, index: usize) -> Result<PDFObject> {
        let objstm = self.objstm(stream_objid)?;
        let (data, offsets) = objstm.as_ref();
        let offset = *offsets.get(index).ok_or_else(|| {
            PdfError::SyntaxError(format!(
                "index {} out of range in ObjStm {}",
                index, stream_objid
            ))
        })?;
        let body = data
            .get(offset..)
            .ok_or_else(|| PdfError::SyntaxError("ObjStm offset beyond data".into()))?;
        PDFParser::new(body).parse_object()
    }

    /// Finds an object missing from every xref inside the object streams
    /// the xrefs do list.
    fn objstm_lookup(&self, objid: u32) -> Option<(u32, usize)> {
        if self.objstm_index.borrow().is_none() {
            // placeholder so lookups made while indexing find nothing
            *self.objstm_index.borrow_mut() = Some(HashMap::new());
            let mut index = HashMap::new();
            for candidate in self.objids() {
                let Ok(obj) = self.getobj(candidate) else {
                    continue;
                };
                if !matches!(obj.get("Type"), Some(PDFObject::Name(n)) if n == "ObjStm") {
                    continue;
                }
                if let Ok(ids) = self.objstm_ids(candidate) {
                    for (i, id) in ids.into_iter().enumerate() {
                        index.entry(id).or_insert((candidate, i));
                    }
                }
            }
            *self.objstm_index.borrow_mut() = Some(index);
        }
        self.objstm_index
            .borrow()
            .as_ref()
            .and_then(|index| index.get(&objid).copied())
    }

    /// Object numbers stored in an object stream, in order.
    fn objstm_ids(&self, stream_objid: u32) -> Result<Vec<u32>> {
        let obj = self.getobj(stream_objid)?;
        let stream = obj.as_stream()?;
        let data = self.decode_stream(stream);
        let n = stream.get("N").map(PDFObject::as_int).transpose()?.unwrap_or(0);
        let mut parser = PDFParser::new(&data);
        let mut ids = Vec::new();
        for _ in 0..n {
            let id = parser.parse_object()?.as_int()?;
            let _offset = parser.parse_object()?;
            ids.push(u32::try_from(id).unwrap_or(0));
        }
        Ok(ids)
    }

    /// Follows references until a direct object is reached.
    pub fn resolve(&self, obj: &PDFObject) -> Result<PDFObject> {
        let mut seen = HashSet::new();
        let mut current = obj.clone();
        while let PDFObject::Ref(r) = current {
            if !seen.insert(r.objid) {
                return Err(PdfError::SyntaxError(format!(
                    "circular reference detected for obj {}",
                    r.objid
                )));
            }
            current = self.getobj(r.objid)?;
        }
        Ok(current)
    }

    /// Decoded stream data. Undecodable filters leave the data as stored.
    pub fn decode_stream(&self, stream: &PDFStream) -> Vec<u8> {
        let filter = stream.get("Filter").map(|f| self.resolve_all(f));
        let parms = stream.get("DecodeParms").map(|p| self.resolve_all(p));
        filters::apply_filters(stream.get_rawdata(), filter.as_ref(), parms.as_ref())
    }

    /// Resolves an object and, if it is an array, each of its items.
    fn resolve_all(&self, obj: &PDFObject) -> PDFObject {
        match self.resolve(obj) {
            Ok(PDFObject::Array(items)) => PDFObject::Array(
                items
                    .iter()
                    .map(|item| self.resolve(item).unwrap_or_else(|_| item.clone()))
                    .collect(),
            ),
            Ok(obj) => obj,
            Err(_) => obj.clone(),
        }
    }

    /// Page object references in document order.
    pub fn page_refs(&self) -> Result<Vec<PDFObjRef>> {
        let mut pages = Vec::new();
        if let Some(root) = self.catalog.get("Pages") {
            let mut visited = HashSet::new();
            self.walk_page_tree(root, &mut visited, &mut pages)?;
        }
        Ok(pages)
    }

    fn walk_page_tree(
        &self,
        node: &PDFObject,
        visited: &mut HashSet<u32>,
        pages: &mut Vec<PDFObjRef>,
    ) -> Result<()> {
        let PDFObject::Ref(r) = node else {
            warn!("direct page tree node skipped");
            return Ok(());
        };
        if !visited.insert(r.objid) {
            return Ok(());
        }
        let obj = self.getobj(r.objid)?;
        let dict = obj.as_dict()?;
        let is_tree = match dict.get("Type") {
            Some(PDFObject::Name(t)) => t == "Pages",
            _ => dict.contains_key("Kids"),
        };
        if is_tree {
            if let Some(kids) = dict.get("Kids") {
                for kid in self.resolve(kids)?.as_array()? {
                    self.walk_page_tree(kid, visited, pages)?;
                }
            }
        } else {
            pages.push(*r);
        }
        Ok(())
    }

    /// Number of pages, from the page tree's `/Count` when present.
    pub fn page_count(&self) -> Result<usize> {
        if let Some(pages) = self.catalog.get("Pages")
            && let Ok(pages) = self.resolve(pages)
            && let Some(PDFObject::Int(n)) = pages.get("Count")
            && let Ok(n) = usize::try_from(*n)
        {
            return Ok(n);
        }
        Ok(self.page_refs()?.len())
    }
}

/// Offset of `endstream`, excluding the end-of-line that precedes it.
fn find_endstream(data: &[u8]) -> Option<usize> {
    let pos = data.windows(9).position(|w| w == b"endstream")?;
    let body = &data[..pos];
    let trimmed = body
        .strip_suffix(b"\r\n")
        .or_else(|| body.strip_suffix(b"\n"))
        .or_else(|| body.strip_suffix(b"\r"))
        .unwrap_or(body);
    Some(trimmed.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a PDF with a correct classic xref table from object bodies.
    fn build_pdf(bodies: &[&str], trailer_extra: &str) -> Vec<u8> {
        let mut out = b"%PDF-1.7\n".to_vec();
        let mut offsets = Vec::new();
        for (i, body) in bodies.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
        }
        let xref_pos = out.len();
        out.extend_from_slice(
            format!("xref\n0 {}\n0000000000 65535 f \n", bodies.len() + 1).as_bytes(),
        );
        for offset in offsets {
            out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R {} >>\nstartxref\n{}\n%%EOF\n",
                bodies.len() + 1,
                trailer_extra,
                xref_pos
            )
            .as_bytes(),
        );
        out
    }

    #[test]
    fn test_page_tree_order() {
        let pdf = build_pdf(
            &[
                "<< /Type /Catalog /Pages 2 0 R >>",
                "<< /Type /Pages /Kids [3 0 R 4 0 R] /Count 3 >>",
                "<< /Type /Page /Parent 2 0 R >>",
                "<< /Type /Pages /Kids [5 0 R] /Count 1 >>",
                "<< /Type /Page /Parent 4 0 R >>",
            ],
            "",
        );
        let reader = ObjectReader::new(pdf).unwrap();
        assert_eq!(
            reader.page_refs().unwrap(),
            vec![PDFObjRef::new(3, 0), PDFObjRef::new(5, 0)]
        );
        // /Count is trusted as written
        assert_eq!(reader.page_count().unwrap(), 3);
    }

    #[test]
    fn test_indirect_stream_length() {
        let pdf = build_pdf(
            &[
                "<< /Type /Catalog >>",
                "<< /Length 3 0 R >>\nstream\nabcdef\nendstream",
                "6",
            ],
            "",
        );
        let reader = ObjectReader::new(pdf).unwrap();
        let obj = reader.getobj(2).unwrap();
        assert_eq!(obj.as_stream().unwrap().get_rawdata(), b"abcdef");
    }

    #[test]
    fn test_wrong_stream_length_scans_for_endstream() {
        let pdf = build_pdf(
            &[
                "<< /Type /Catalog >>",
                "<< /Length 2 >>\nstream\nabcdef\nendstream",
            ],
            "",
        );
        let reader = ObjectReader::new(pdf).unwrap();
        let obj = reader.getobj(2).unwrap();
        assert_eq!(obj.as_stream().unwrap().get_rawdata(), b"abcdef");
    }

    #[test]
    fn test_bad_offset_is_recovered() {
        let mut pdf = build_pdf(
            &["<< /Type /Catalog >>", "(second)", "(third)"],
            "",
        );
        // point object 2 at object 3's header
        let text = String::from_utf8_lossy(&pdf).to_string();
        let third = text.find("3 0 obj").unwrap();
        let second = text.find("2 0 obj").unwrap();
        let wrong = format!("{:010} 00000 n ", third);
        let right = format!("{:010} 00000 n ", second);
        let at = text.find(&right).unwrap();
        pdf[at..at + wrong.len()].copy_from_slice(wrong.as_bytes());

        let reader = ObjectReader::new(pdf).unwrap();
        assert_eq!(
            reader.getobj(2).unwrap(),
            PDFObject::String(b"second".to_vec())
        );
    }

    #[test]
    fn test_unrecoverable_object() {
        let mut pdf = build_pdf(&["<< /Type /Catalog >>", "(second)"], "");
        let text = String::from_utf8_lossy(&pdf).to_string();
        let header = text.find("2 0 obj").unwrap();
        pdf[header..header + 7].copy_from_slice(b"9 9 obj");

        let reader = ObjectReader::new(pdf).unwrap();
        assert!(matches!(
            reader.getobj(2),
            Err(PdfError::ObjectRecovery { objid: 2, genno: 0 })
        ));
    }

    #[test]
    fn test_encrypted_is_refused() {
        let pdf = build_pdf(
            &["<< /Type /Catalog >>", "<< /Filter /Standard >>"],
            "/Encrypt 2 0 R",
        );
        assert!(matches!(ObjectReader::new(pdf), Err(PdfError::Encrypted)));
    }

    #[test]
    fn test_xref_stream_with_object_stream() {
        // object 1: catalog, object 2: object stream holding object 3
        let objstm_body = "3 0 (packed)";
        let mut out = b"%PDF-1.7\n".to_vec();
        let off1 = out.len();
        out.extend_from_slice(b"1 0 obj\n<< /Type /Catalog >>\nendobj\n");
        let off2 = out.len();
        out.extend_from_slice(
            format!(
                concat!(
                    "2 0 obj\n<< /Type /ObjStm /N 1 /First 4 /Length {} >>\n",
                    "stream\n{}\nendstream\nendobj\n"
                ),
                objstm_body.len(),
                objstm_body
            )
            .as_bytes(),
        );
        let off4 = out.len();
        let mut entries = Vec::new();
        entries.extend_from_slice(&[0, 0, 0, 0]);
        entries.extend_from_slice(&[1, (off1 >> 8) as u8, off1 as u8, 0]);
        entries.extend_from_slice(&[1, (off2 >> 8) as u8, off2 as u8, 0]);
        entries.extend_from_slice(&[2, 0, 2, 0]);
        entries.extend_from_slice(&[1, (off4 >> 8) as u8, off4 as u8, 0]);
        out.extend_from_slice(
            format!(
                "4 0 obj\n<< /Type /XRef /Size 5 /W [1 2 1] /Root 1 0 R /Length {} >>\nstream\n",
                entries.len()
            )
            .as_bytes(),
        );
        out.extend_from_slice(&entries);
        out.extend_from_slice(
            format!("\nendstream\nendobj\nstartxref\n{}\n%%EOF\n", off4).as_bytes(),
        );

        let reader = ObjectReader::new(out).unwrap();
        assert!(!reader.is_fallback());
        assert_eq!(reader.root(), Some(PDFObjRef::new(1, 0)));
        assert_eq!(
            reader.getobj(3).unwrap(),
            PDFObject::String(b"packed".to_vec())
        );
    }
}
