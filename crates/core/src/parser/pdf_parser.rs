//! PDF object parser.
//!
//! Builds [`PDFObject`] values from lexer tokens. Streams are not handled
//! here: the object reader looks for the `stream` keyword after a
//! dictionary because stream length may need indirect resolution.

use crate::error::{PdfError, Result};
use crate::model::objects::{PDFDict, PDFObjRef, PDFObject};

use super::lexer::{Keyword, Lexer, Token};

/// Nesting limit for arrays and dictionaries.
const MAX_DEPTH: usize = 256;

pub struct PDFParser<'a> {
    lexer: Lexer<'a>,
}

impl<'a> PDFParser<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            lexer: Lexer::new(data),
        }
    }

    pub fn tell(&self) -> usize {
        self.lexer.tell()
    }

    pub fn set_pos(&mut self, pos: usize) {
        self.lexer.set_pos(pos);
    }

    pub fn remaining(&self) -> &'a [u8] {
        self.lexer.remaining()
    }

    /// Reads the next token, failing at end of input.
    fn next(&mut self) -> Result<(usize, Token)> {
        self.lexer.next_token().unwrap_or(Err(PdfError::UnexpectedEof))
    }

    /// Parses the next complete object.
    pub fn parse_object(&mut self) -> Result<PDFObject> {
        self.parse_depth(0)
    }

    fn parse_depth(&mut self, depth: usize) -> Result<PDFObject> {
        if depth > MAX_DEPTH {
            return Err(PdfError::SyntaxError("objects nested too deeply".into()));
        }
        let (pos, token) = self.next()?;
        match token {
            Token::Int(n) => Ok(self.try_reference(n).unwrap_or(PDFObject::Int(n))),
            Token::Real(n) => Ok(PDFObject::Real(n)),
            Token::Bool(b) => Ok(PDFObject::Bool(b)),
            Token::Name(name) => Ok(PDFObject::Name(name)),
            Token::String(s) => Ok(PDFObject::String(s)),
            Token::Keyword(Keyword::Null) => Ok(PDFObject::Null),
            Token::Keyword(Keyword::ArrayStart) => {
                let mut items = Vec::new();
                loop {
                    self.lexer.skip_whitespace();
                    if self.lexer.remaining().first() == Some(&b']') {
                        self.next()?;
                        return Ok(PDFObject::Array(items));
                    }
                    items.push(self.parse_depth(depth + 1)?);
                }
            }
            Token::Keyword(Keyword::DictStart) => {
                let mut dict = PDFDict::new();
                loop {
                    let (key_pos, key) = self.next()?;
                    match key {
                        Token::Keyword(Keyword::DictEnd) => return Ok(PDFObject::Dict(dict)),
                        Token::Name(name) => {
                            self.lexer.skip_whitespace();
                            if self.lexer.remaining().starts_with(b">>") {
                                // key without value
                                dict.insert(name, PDFObject::Null);
                                continue;
                            }
                            let value = self.parse_depth(depth + 1)?;
                            dict.insert(name, value);
                        }
                        other => {
                            return Err(PdfError::TokenError {
                                pos: key_pos,
                                msg: format!("expected name as dict key, got {:?}", other),
                            });
                        }
                    }
                }
            }
            Token::Keyword(kw) => Err(PdfError::TokenError {
                pos,
                msg: format!(
                    "unexpected keyword {}",
                    String::from_utf8_lossy(kw.as_bytes())
                ),
            }),
        }
    }

    /// Completes `objid genno R` after an integer, restoring the position
    /// when the next tokens do not form a reference.
    fn try_reference(&mut self, objid: i64) -> Option<PDFObject> {
        let save = self.lexer.tell();
        let restore = |parser: &mut Self| {
            parser.lexer.set_pos(save);
            None
        };
        let Some(Ok((_, Token::Int(genno)))) = self.lexer.next_token() else {
            return restore(self);
        };
        let Some(Ok((_, Token::Keyword(Keyword::R)))) = self.lexer.next_token() else {
            return restore(self);
        };
        match (u32::try_from(objid), u32::try_from(genno)) {
            (Ok(objid), Ok(genno)) => Some(PDFObject::Ref(PDFObjRef::new(objid, genno))),
            _ => restore(self),
        }
    }

    /// Parses an `objid genno obj` header.
    pub fn parse_indirect_header(&mut self) -> Result<PDFObjRef> {
        let (pos, first) = self.next()?;
        let (_, second) = self.next()?;
        let (_, third) = self.next()?;
        match (first, second, third) {
            (Token::Int(objid), Token::Int(genno), Token::Keyword(Keyword::Obj)) => {
                let objid = u32::try_from(objid).map_err(|_| PdfError::TokenError {
                    pos,
                    msg: format!("invalid object id {}", objid),
                })?;
                let genno = u32::try_from(genno).map_err(|_| PdfError::TokenError {
                    pos,
                    msg: format!("invalid generation {}", genno),
                })?;
                Ok(PDFObjRef::new(objid, genno))
            }
            _ => Err(PdfError::SyntaxError(format!(
                "expected 'N G obj' at offset {}",
                pos
            ))),
        }
    }

    /// Consumes the `stream` keyword and its end-of-line if it comes next.
    pub fn consume_stream_keyword(&mut self) -> bool {
        let save = self.lexer.tell();
        self.lexer.skip_whitespace();
        if self.lexer.remaining().starts_with(b"stream") {
            self.lexer.set_pos(self.lexer.tell() + 6);
            self.lexer.skip_stream_eol();
            true
        } else {
            self.lexer.set_pos(save);
            false
        }
    }
}
