//! Object graph writer.
//!
//! Saving rewrites the whole file: every live object is serialized once,
//! object streams are flattened and a fresh classic xref table is emitted.
//! The output never depends on the offsets of the input file.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::Result;
use crate::model::objects::{PDFDict, PDFObjRef, PDFObject};

use super::reader::ObjectReader;

/// Mutable in-memory copy of a document's objects.
#[derive(Debug, Clone, Default)]
pub struct ObjectStore {
    objects: BTreeMap<u32, (u32, PDFObject)>,
    trailer: PDFDict,
    version: String,
}

impl ObjectStore {
    /// Loads every object listed in the xref of `reader`.
    ///
    /// An object that cannot be read, even after recovery, fails the load.
    /// Xref and object stream containers are dropped since their contents
    /// are written out as plain objects.
    pub fn from_reader(reader: &ObjectReader) -> Result<Self> {
        let mut objects = BTreeMap::new();
        for objid in reader.objids() {
            let obj = reader.getobj(objid).inspect_err(|err| {
                warn!(objid, %err, "object unreadable, rewrite aborted");
            })?;
            if let PDFObject::Stream(stream) = &obj
                && matches!(
                    stream.get("Type"),
                    Some(PDFObject::Name(t)) if t == "XRef" || t == "ObjStm"
                )
            {
                continue;
            }
            objects.insert(objid, (reader.genno(objid), obj));
        }

        let mut trailer = PDFDict::new();
        if let Some(root) = reader.root() {
            trailer.insert("Root".into(), PDFObject::Ref(root));
        }
        for key in ["Info", "ID"] {
            if let Some(value) = reader.trailer().get(key) {
                trailer.insert(key.into(), value.clone());
            }
        }

        debug!(objects = objects.len(), "loaded object graph for rewrite");
        Ok(Self {
            objects,
            trailer,
            version: header_version(reader.bytes()),
        })
    }

    pub fn get(&self, objid: u32) -> Option<&PDFObject> {
        self.objects.get(&objid).map(|(_, obj)| obj)
    }

    pub fn get_mut(&mut self, objid: u32) -> Option<&mut PDFObject> {
        self.objects.get_mut(&objid).map(|(_, obj)| obj)
    }

    /// Follows references within the store.
    pub fn resolve<'a>(&'a self, obj: &'a PDFObject) -> Option<&'a PDFObject> {
        let mut current = obj;
        for _ in 0..=self.objects.len() {
            match current {
                PDFObject::Ref(r) => current = self.get(r.objid)?,
                other => return Some(other),
            }
        }
        None
    }

    pub fn root(&self) -> Option<PDFObjRef> {
        match self.trailer.get("Root") {
            Some(PDFObject::Ref(r)) => Some(*r),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Serializes the document.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(format!("%PDF-{}\n", self.version).as_bytes());
        out.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

        let mut offsets = BTreeMap::new();
        for (objid, (genno, obj)) in &self.objects {
            offsets.insert(*objid, (out.len(), *genno));
            out.extend_from_slice(format!("{} {} obj\n", objid, genno).as_bytes());
            write_object(&mut out, obj);
            out.extend_from_slice(b"\nendobj\n");
        }

        let size = self.objects.keys().next_back().map_or(1, |id| id + 1);
        let startxref = out.len();
        out.extend_from_slice(format!("xref\n0 {}\n", size).as_bytes());
        out.extend_from_slice(b"0000000000 65535 f \n");
        for objid in 1..size {
            let line = match offsets.get(&objid) {
                Some((offset, genno)) => format!("{:010} {:05} n \n", offset, genno),
                None => "0000000000 00001 f \n".to_string(),
            };
            out.extend_from_slice(line.as_bytes());
        }

        let mut trailer = PDFDict::new();
        trailer.insert("Size".into(), PDFObject::Int(size as i64));
        for (key, value) in &self.trailer {
            trailer.insert(key.clone(), value.clone());
        }
        out.extend_from_slice(b"trailer\n");
        write_object(&mut out, &PDFObject::Dict(trailer));
        out.extend_from_slice(format!("\nstartxref\n{}\n%%EOF\n", startxref).as_bytes());
        out
    }

    /// Writes the document to `path`, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)?;
        file.write_all(&self.to_bytes())?;
        file.flush()?;
        Ok(())
    }
}

/// Version from the `%PDF-x.y` header, 1.7 when absent.
fn header_version(data: &[u8]) -> String {
    data.strip_prefix(b"%PDF-")
        .map(|rest| {
            rest.iter()
                .take_while(|b| b.is_ascii_digit() || **b == b'.')
                .map(|&b| b as char)
                .collect::<String>()
        })
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "1.7".to_string())
}

/// Appends the PDF syntax for `obj`.
pub fn write_object(out: &mut Vec<u8>, obj: &PDFObject) {
    match obj {
        PDFObject::Null => out.extend_from_slice(b"null"),
        PDFObject::Bool(b) => out.extend_from_slice(if *b { b"true" } else { b"false" }),
        PDFObject::Int(n) => out.extend_from_slice(n.to_string().as_bytes()),
        PDFObject::Real(r) => {
            let r = if r.is_finite() { *r } else { 0.0 };
            out.extend_from_slice(r.to_string().as_bytes());
        }
        PDFObject::Name(name) => write_name(out, name),
        PDFObject::String(s) => write_string(out, s),
        PDFObject::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b' ');
                }
                write_object(out, item);
            }
            out.push(b']');
        }
        PDFObject::Dict(dict) => write_dict(out, dict),
        PDFObject::Stream(stream) => {
            let mut attrs = stream.attrs.clone();
            attrs.insert(
                "Length".into(),
                PDFObject::Int(stream.get_rawdata().len() as i64),
            );
            write_dict(out, &attrs);
            out.extend_from_slice(b"\nstream\n");
            out.extend_from_slice(stream.get_rawdata());
            out.extend_from_slice(b"\nendstream");
        }
        PDFObject::Ref(r) => out.extend_from_slice(format!("{} {} R", r.objid, r.genno).as_bytes()),
    }
}

fn write_dict(out: &mut Vec<u8>, dict: &PDFDict) {
    out.extend_from_slice(b"<<");
    for (key, value) in dict {
        write_name(out, key);
        out.push(b' ');
        write_object(out, value);
        out.push(b' ');
    }
    out.extend_from_slice(b">>");
}

/// Writes a name, escaping bytes outside the regular character set as `#xx`.
fn write_name(out: &mut Vec<u8>, name: &str) {
    out.push(b'/');
    // names read from a file hold one char per byte
    let bytes = name.chars().flat_map(|ch| match u8::try_from(ch) {
        Ok(b) => vec![b],
        Err(_) => ch.to_string().into_bytes(),
    });
    for b in bytes {
        let regular = (0x21..=0x7e).contains(&b)
            && b != b'#'
            && !matches!(
                b,
                b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
            );
        if regular {
            out.push(b);
        } else {
            out.extend_from_slice(format!("#{:02X}", b).as_bytes());
        }
    }
}

/// Writes a literal string, escaping delimiters and carriage returns.
fn write_string(out: &mut Vec<u8>, s: &[u8]) {
    out.push(b'(');
    for &b in s {
        match b {
            b'(' | b')' | b'\\' => {
                out.push(b'\\');
                out.push(b);
            }
            b'\r' => out.extend_from_slice(b"\\r"),
            _ => out.push(b),
        }
    }
    out.push(b')');
}
