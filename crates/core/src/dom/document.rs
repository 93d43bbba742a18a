use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::converter::{Converter, XmlDump};
use crate::error::{PdfError, Result};
use crate::finder::Anchor;
use crate::forms::FieldRecord;
use crate::layout::{LAParams, LayoutSource};

use super::page::Page;

/// An open PDF and everything derived from it.
///
/// Pages are converted on demand and never reconverted; the set of
/// converted page numbers is the guard. Closing drops the file handle and
/// all derived state.
pub struct Document {
    path: PathBuf,
    file: Option<File>,
    closed: bool,
    source: Rc<dyn LayoutSource>,
    pages: BTreeMap<usize, Page>,
    converted: HashSet<usize>,
    xml: XmlDump,
    laparams: Option<LAParams>,
    pub(crate) fields: Option<IndexMap<String, FieldRecord>>,
    pub(crate) anchor: Option<Anchor>,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("path", &self.path)
            .field("closed", &self.closed)
            .field("pages", &self.pages.len())
            .field("converted", &self.converted)
            .finish_non_exhaustive()
    }
}

impl Document {
    /// Opens `path`, taking ownership of the file handle.
    pub fn open(path: impl AsRef<Path>, source: Rc<dyn LayoutSource>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        debug!(path = %path.display(), "document opened");
        Ok(Self {
            path,
            file: Some(file),
            closed: false,
            source,
            pages: BTreeMap::new(),
            converted: HashSet::new(),
            xml: XmlDump::new(),
            laparams: None,
            fields: None,
            anchor: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Releases the file handle and discards every cached result.
    pub fn close(&mut self) {
        self.file = None;
        self.closed = true;
        self.pages.clear();
        self.converted.clear();
        self.xml.clear();
        self.fields = None;
        self.anchor = None;
        debug!(path = %self.path.display(), "document closed");
    }

    /// Drops only the file handle; the next access reopens it.
    pub fn release_handle(&mut self) {
        self.file = None;
    }

    pub(crate) fn ensure_open(&self) -> Result<()> {
        if self.closed {
            Err(PdfError::DocumentClosed)
        } else {
            Ok(())
        }
    }

    /// The underlying file, reopened if it was released, positioned at byte 0.
    pub fn fileobject(&mut self) -> Result<&mut File> {
        self.ensure_open()?;
        let file = match self.file.take() {
            Some(file) => file,
            None => {
                debug!(path = %self.path.display(), "reopening file handle");
                File::open(&self.path)?
            }
        };
        let file = self.file.insert(file);
        file.seek(SeekFrom::Start(0))?;
        Ok(file)
    }

    /// Whole file contents.
    pub(crate) fn read_bytes(&mut self) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        self.fileobject()?.read_to_end(&mut data)?;
        Ok(data)
    }

    /// Uses custom margins for pages converted from now on.
    pub fn set_layout_params(
        &mut self,
        line_margin: Option<f64>,
        char_margin: Option<f64>,
        word_margin: Option<f64>,
    ) {
        self.laparams =
            Some(LAParams::for_document().with_margins(line_margin, char_margin, word_margin));
    }

    pub fn layout_params(&self) -> Option<&LAParams> {
        self.laparams.as_ref()
    }

    /// Converts page `pagenum` (1-based), or every page when `None`.
    ///
    /// Pages already converted are skipped, so repeated calls only add
    /// pages that were missing.
    pub fn convert(&mut self, trim: bool, pagenum: Option<usize>) -> Result<()> {
        self.ensure_open()?;
        if let Some(n) = pagenum
            && self.converted.contains(&n)
        {
            debug!(page = n, "page already converted");
            return Ok(());
        }

        let data = self.read_bytes()?;
        let page_count = self.source.page_count(&data)?;
        match pagenum {
            Some(n) if n == 0 || n > page_count => return Err(PdfError::PageNotFound(n)),
            None if self.converted.len() >= page_count => {
                debug!("all pages already converted");
                return Ok(());
            }
            _ => {}
        }

        let laparams = self.laparams.clone().unwrap_or_else(LAParams::for_document);
        let mut seen = HashSet::new();
        for pageno in 1..=page_count {
            if pagenum.is_some_and(|n| n != pageno) || self.converted.contains(&pageno) {
                continue;
            }
            let ltpage = self.source.analyze_page(&data, pageno, &laparams)?;
            let page = Converter::new(trim, &mut seen, &mut self.xml).convert_page(&ltpage);
            self.pages.insert(pageno, page);
            self.converted.insert(pageno);
        }
        info!(
            path = %self.path.display(),
            converted = self.converted.len(),
            page_count,
            "conversion finished"
        );
        Ok(())
    }

    /// True once at least one page has been converted.
    pub fn is_converted(&self) -> bool {
        !self.converted.is_empty()
    }

    pub fn is_page_converted(&self, pagenum: usize) -> bool {
        self.converted.contains(&pagenum)
    }

    /// Converted pages by page number.
    pub fn get_pages(&self) -> Result<&BTreeMap<usize, Page>> {
        self.ensure_open()?;
        Ok(&self.pages)
    }

    pub fn get_page(&self, pagenum: usize) -> Result<&Page> {
        self.ensure_open()?;
        self.pages
            .get(&pagenum)
            .ok_or(PdfError::PageNotFound(pagenum))
    }

    /// Replaces the text of the first text box whose text equals `old`.
    ///
    /// Returns false if no text box matched.
    pub fn replace_text(&mut self, old: &str, new: &str) -> Result<bool> {
        self.ensure_open()?;
        for page in self.pages.values_mut() {
            if let Some(textbox) = page.textboxes_mut().find(|t| t.text() == old) {
                textbox.set_text(new);
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Text of one page, or of all pages separated by blank lines,
    /// converting as needed.
    pub fn get_text(&mut self, pagenum: Option<usize>) -> Result<String> {
        self.convert(true, pagenum)?;
        match pagenum {
            Some(n) => Ok(self.get_page(n)?.get_text()),
            None => Ok(self
                .pages
                .values()
                .map(Page::get_text)
                .collect::<Vec<_>>()
                .join("\n\n")),
        }
    }

    /// XML trace of everything converted so far.
    pub fn dump_xml(&self) -> Result<String> {
        self.ensure_open()?;
        Ok(self.xml.to_document())
    }
}
