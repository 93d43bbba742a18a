//! Several open documents with one of them active.
//!
//! Operations take an optional `source_path`: a path opens that document,
//! or switches to it if it is already open; `None` targets the active one.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use indexmap::IndexMap;
use tracing::debug;

use crate::dom::{Document, Page, TextBox};
use crate::error::{PdfError, Result};
use crate::finder::FindOptions;
use crate::forms::{FieldOptions, FieldRecord, SaveOptions};
use crate::layout::LayoutSource;

pub struct PdfSession {
    documents: IndexMap<PathBuf, Document>,
    active: Option<PathBuf>,
    source: Rc<dyn LayoutSource>,
}

impl PdfSession {
    pub fn new(source: Rc<dyn LayoutSource>) -> Self {
        Self {
            documents: IndexMap::new(),
            active: None,
            source,
        }
    }

    /// Opens `path`, or reactivates it if already open.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<&mut Document> {
        let path = path.as_ref().to_path_buf();
        let reopen = self.documents.get(&path).is_none_or(Document::is_closed);
        if reopen {
            let document = Document::open(&path, Rc::clone(&self.source))?;
            self.documents.insert(path.clone(), document);
        }
        debug!(path = %path.display(), "active document");
        self.active = Some(path.clone());
        self.documents.get_mut(&path).ok_or(PdfError::NoDocument)
    }

    pub fn active_path(&self) -> Option<&Path> {
        self.active.as_deref()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// The document at `source_path`, or the active one.
    pub fn document(&mut self, source_path: Option<&Path>) -> Result<&mut Document> {
        match source_path {
            Some(path) => self.open(path),
            None => {
                let path = self.active.as_ref().ok_or(PdfError::NoDocument)?;
                self.documents.get_mut(path).ok_or(PdfError::NoDocument)
            }
        }
    }

    /// Closes and forgets a document; the active one when `None`.
    pub fn close(&mut self, source_path: Option<&Path>) -> Result<()> {
        let path = match source_path {
            Some(path) => path.to_path_buf(),
            None => self.active.clone().ok_or(PdfError::NoDocument)?,
        };
        let mut document = self.documents.shift_remove(&path).ok_or(PdfError::NoDocument)?;
        document.close();
        if self.active.as_ref() == Some(&path) {
            self.active = self.documents.keys().last().cloned();
        }
        Ok(())
    }

    pub fn convert(
        &mut self,
        source_path: Option<&Path>,
        trim: bool,
        pagenum: Option<usize>,
    ) -> Result<()> {
        self.document(source_path)?.convert(trim, pagenum)
    }

    pub fn get_pages(&mut self, source_path: Option<&Path>) -> Result<&BTreeMap<usize, Page>> {
        self.document(source_path)?.get_pages()
    }

    pub fn get_page(&mut self, source_path: Option<&Path>, pagenum: usize) -> Result<&Page> {
        self.document(source_path)?.get_page(pagenum)
    }

    pub fn get_input_fields(
        &mut self,
        source_path: Option<&Path>,
        options: &FieldOptions,
    ) -> Result<&IndexMap<String, FieldRecord>> {
        self.document(source_path)?.get_input_fields(options)
    }

    pub fn set_field_value(
        &mut self,
        name: &str,
        value: &str,
        source_path: Option<&Path>,
    ) -> Result<()> {
        self.document(source_path)?.set_field_value(name, value)
    }

    pub fn save_field_values(
        &mut self,
        source_path: Option<&Path>,
        options: &SaveOptions,
    ) -> Result<()> {
        self.document(source_path)?.save_field_values(options)
    }

    pub fn set_anchor_to_element(&mut self, locator: &str) -> Result<bool> {
        self.document(None)?.set_anchor_to_element(locator)
    }

    pub fn find_text(&mut self, locator: &str, options: &FindOptions) -> Result<Vec<TextBox>> {
        self.document(None)?.find_text(locator, options)
    }

    pub fn get_text(
        &mut self,
        source_path: Option<&Path>,
        pagenum: Option<usize>,
    ) -> Result<String> {
        self.document(source_path)?.get_text(pagenum)
    }

    pub fn dump_xml(&mut self, source_path: Option<&Path>) -> Result<String> {
        self.document(source_path)?.dump_xml()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::MemoryLayoutSource;

    fn session() -> PdfSession {
        PdfSession::new(Rc::new(MemoryLayoutSource::new(Vec::new())))
    }

    #[test]
    fn test_no_active_document() {
        let mut session = session();
        assert!(matches!(session.document(None), Err(PdfError::NoDocument)));
        assert!(matches!(session.close(None), Err(PdfError::NoDocument)));
    }

    #[test]
    fn test_open_switches_active_document() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.pdf");
        let b = dir.path().join("b.pdf");
        std::fs::write(&a, b"%PDF-1.4\n").unwrap();
        std::fs::write(&b, b"%PDF-1.4\n").unwrap();

        let mut session = session();
        session.open(&a).unwrap();
        session.open(&b).unwrap();
        assert_eq!(session.active_path(), Some(b.as_path()));
        assert_eq!(session.len(), 2);

        session.document(Some(&a)).unwrap();
        assert_eq!(session.active_path(), Some(a.as_path()));

        session.close(None).unwrap();
        assert_eq!(session.active_path(), Some(b.as_path()));
        assert_eq!(session.len(), 1);
    }

    #[test]
    fn test_open_missing_file() {
        let mut session = session();
        assert!(matches!(
            session.open("/nonexistent/file.pdf"),
            Err(PdfError::Io(_))
        ));
    }
}
