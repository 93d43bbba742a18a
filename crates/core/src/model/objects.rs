//! PDF object types.
//!
//! Dictionaries keep insertion order so a rewritten file lists keys the
//! way they were read.

use bytes::Bytes;
use indexmap::IndexMap;

use crate::error::{PdfError, Result};

/// A PDF dictionary.
pub type PDFDict = IndexMap<String, PDFObject>;

/// PDF Object types - the fundamental value type in PDF.
#[derive(Debug, Clone, PartialEq)]
pub enum PDFObject {
    Null,
    Bool(bool),
    Int(i64),
    Real(f64),
    /// Name object without the leading slash (e.g., `Type`, `Font`)
    Name(String),
    /// String (byte array)
    String(Vec<u8>),
    Array(Vec<Self>),
    Dict(PDFDict),
    /// Stream (dictionary + binary data)
    Stream(Box<PDFStream>),
    /// Indirect object reference
    Ref(PDFObjRef),
}

impl PDFObject {
    pub const fn as_int(&self) -> Result<i64> {
        match self {
            Self::Int(n) => Ok(*n),
            _ => Err(PdfError::TypeError {
                expected: "int",
                got: self.type_name(),
            }),
        }
    }

    /// Get numeric value (int or real coerced to f64)
    pub const fn as_num(&self) -> Result<f64> {
        match self {
            Self::Int(n) => Ok(*n as f64),
            Self::Real(n) => Ok(*n),
            _ => Err(PdfError::TypeError {
                expected: "number",
                got: self.type_name(),
            }),
        }
    }

    pub fn as_name(&self) -> Result<&str> {
        match self {
            Self::Name(s) => Ok(s),
            _ => Err(PdfError::TypeError {
                expected: "name",
                got: self.type_name(),
            }),
        }
    }

    pub fn as_string(&self) -> Result<&[u8]> {
        match self {
            Self::String(s) => Ok(s),
            _ => Err(PdfError::TypeError {
                expected: "string",
                got: self.type_name(),
            }),
        }
    }

    pub const fn as_array(&self) -> Result<&Vec<Self>> {
        match self {
            Self::Array(arr) => Ok(arr),
            _ => Err(PdfError::TypeError {
                expected: "array",
                got: self.type_name(),
            }),
        }
    }

    /// Get as dictionary. Streams expose their attribute dictionary.
    pub fn as_dict(&self) -> Result<&PDFDict> {
        match self {
            Self::Dict(d) => Ok(d),
            Self::Stream(s) => Ok(&s.attrs),
            _ => Err(PdfError::TypeError {
                expected: "dict",
                got: self.type_name(),
            }),
        }
    }

    pub fn as_dict_mut(&mut self) -> Result<&mut PDFDict> {
        match self {
            Self::Dict(d) => Ok(d),
            Self::Stream(s) => Ok(&mut s.attrs),
            other => Err(PdfError::TypeError {
                expected: "dict",
                got: other.type_name(),
            }),
        }
    }

    pub fn as_stream(&self) -> Result<&PDFStream> {
        match self {
            Self::Stream(s) => Ok(s),
            _ => Err(PdfError::TypeError {
                expected: "stream",
                got: self.type_name(),
            }),
        }
    }

    /// Looks up `key` if this is a dictionary or stream.
    pub fn get(&self, key: &str) -> Option<&PDFObject> {
        self.as_dict().ok().and_then(|d| d.get(key))
    }

    /// Type name for error messages
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Real(_) => "real",
            Self::Name(_) => "name",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Dict(_) => "dict",
            Self::Stream(_) => "stream",
            Self::Ref(_) => "ref",
        }
    }
}

impl From<PDFObjRef> for PDFObject {
    fn from(r: PDFObjRef) -> Self {
        Self::Ref(r)
    }
}

impl From<PDFDict> for PDFObject {
    fn from(d: PDFDict) -> Self {
        Self::Dict(d)
    }
}

/// PDF indirect object reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PDFObjRef {
    pub objid: u32,
    pub genno: u32,
}

impl PDFObjRef {
    pub const fn new(objid: u32, genno: u32) -> Self {
        Self { objid, genno }
    }
}

/// PDF Stream - dictionary attributes + binary data.
#[derive(Debug, Clone, PartialEq)]
pub struct PDFStream {
    pub attrs: PDFDict,
    /// Raw (possibly encoded) data
    rawdata: Bytes,
}

impl PDFStream {
    pub fn new(attrs: PDFDict, rawdata: impl Into<Bytes>) -> Self {
        Self {
            attrs,
            rawdata: rawdata.into(),
        }
    }

    pub fn get_rawdata(&self) -> &[u8] {
        self.rawdata.as_ref()
    }

    pub fn get(&self, name: &str) -> Option<&PDFObject> {
        self.attrs.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_errors_name_both_sides() {
        let err = PDFObject::Int(3).as_name().unwrap_err();
        assert!(matches!(
            err,
            PdfError::TypeError {
                expected: "name",
                got: "int"
            }
        ));
    }

    #[test]
    fn test_stream_exposes_attrs_as_dict() {
        let mut attrs = PDFDict::new();
        attrs.insert("Type".into(), PDFObject::Name("XObject".into()));
        let obj = PDFObject::Stream(Box::new(PDFStream::new(attrs, b"abc".to_vec())));
        assert_eq!(obj.get("Type"), Some(&PDFObject::Name("XObject".into())));
    }

    #[test]
    fn test_num_coercion() {
        assert_eq!(PDFObject::Int(2).as_num().unwrap(), 2.0);
        assert_eq!(PDFObject::Real(2.5).as_num().unwrap(), 2.5);
        assert!(PDFObject::Null.as_num().is_err());
    }
}
