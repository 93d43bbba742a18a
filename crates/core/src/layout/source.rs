//! The seam between raw PDF bytes and layout trees.
//!
//! Content-stream interpretation happens upstream; conversion only needs
//! a page count and one analysed [`LTPage`] per page number.

use std::io::Read;

use serde::Deserialize;

use crate::document::ObjectReader;
use crate::error::{PdfError, Result};

use super::elements::LTPage;
use super::params::LAParams;

/// Produces layout trees for the pages of a PDF.
pub trait LayoutSource {
    /// Number of pages in `data`.
    ///
    /// The default walks the document's page tree.
    fn page_count(&self, data: &[u8]) -> Result<usize> {
        ObjectReader::new(data.to_vec())?.page_count()
    }

    /// Analyses page `pageno` (1-based) of `data`.
    fn analyze_page(&self, data: &[u8], pageno: usize, laparams: &LAParams) -> Result<LTPage>;
}

/// Layout trees computed ahead of time and held in memory.
///
/// The page count is the number of stored trees; the PDF bytes are not
/// consulted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct MemoryLayoutSource {
    pages: Vec<LTPage>,
}

impl MemoryLayoutSource {
    pub fn new(pages: Vec<LTPage>) -> Self {
        Self { pages }
    }

    /// Loads a JSON array of page trees.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn pages(&self) -> &[LTPage] {
        &self.pages
    }
}

impl LayoutSource for MemoryLayoutSource {
    fn page_count(&self, _data: &[u8]) -> Result<usize> {
        Ok(self.pages.len())
    }

    fn analyze_page(&self, _data: &[u8], pageno: usize, _laparams: &LAParams) -> Result<LTPage> {
        pageno
            .checked_sub(1)
            .and_then(|i| self.pages.get(i))
            .cloned()
            .ok_or_else(|| PdfError::Layout(format!("no layout for page {}", pageno)))
    }
}
