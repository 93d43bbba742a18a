use indexmap::IndexMap;

use crate::geometry::{BoundingBox, Coordinate};
use crate::layout::LTPage;

use super::figure::Figure;
use super::textbox::TextBox;

/// One content element of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageContent {
    Figure(Figure),
    TextBox(TextBox),
}

impl From<Figure> for PageContent {
    fn from(figure: Figure) -> Self {
        PageContent::Figure(figure)
    }
}

impl From<TextBox> for PageContent {
    fn from(textbox: TextBox) -> Self {
        PageContent::TextBox(textbox)
    }
}

/// A converted page.
///
/// Content is kept in encounter order under page-local ids taken from one
/// counter shared by figures and text boxes.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pageid: i32,
    bbox: BoundingBox,
    rotate: i64,
    content: IndexMap<usize, PageContent>,
    figure_ids: Vec<usize>,
    textbox_ids: Vec<usize>,
    next_id: usize,
}

impl Page {
    pub fn new(pageid: i32, bbox: BoundingBox, rotate: i64) -> Self {
        Self {
            pageid,
            bbox,
            rotate,
            content: IndexMap::new(),
            figure_ids: Vec::new(),
            textbox_ids: Vec::new(),
            next_id: 0,
        }
    }

    /// Page record for a layout tree root; content is added separately.
    pub fn from_layout(ltpage: &LTPage) -> Self {
        Self::new(
            ltpage.pageid,
            BoundingBox::from(ltpage.bbox()),
            ltpage.rotate.to_coordinate(),
        )
    }

    /// Appends `element` and returns its content id.
    pub fn add_content(&mut self, element: impl Into<PageContent>) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        let element = element.into();
        match element {
            PageContent::Figure(_) => self.figure_ids.push(id),
            PageContent::TextBox(_) => self.textbox_ids.push(id),
        }
        self.content.insert(id, element);
        id
    }

    /// Upstream page id.
    pub fn pageid(&self) -> i32 {
        self.pageid
    }

    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    pub fn rotate(&self) -> i64 {
        self.rotate
    }

    /// All content with ids, in encounter order.
    pub fn content(&self) -> impl Iterator<Item = (usize, &PageContent)> {
        self.content.iter().map(|(id, c)| (*id, c))
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&PageContent> {
        self.content.get(&id)
    }

    pub fn figures(&self) -> impl Iterator<Item = (usize, &Figure)> {
        self.figure_ids.iter().filter_map(|id| match self.content.get(id) {
            Some(PageContent::Figure(f)) => Some((*id, f)),
            _ => None,
        })
    }

    pub fn textboxes(&self) -> impl Iterator<Item = (usize, &TextBox)> {
        self.textbox_ids.iter().filter_map(|id| match self.content.get(id) {
            Some(PageContent::TextBox(t)) => Some((*id, t)),
            _ => None,
        })
    }

    pub fn figure(&self, id: usize) -> Option<&Figure> {
        match self.content.get(&id) {
            Some(PageContent::Figure(f)) => Some(f),
            _ => None,
        }
    }

    pub fn textbox(&self, id: usize) -> Option<&TextBox> {
        match self.content.get(&id) {
            Some(PageContent::TextBox(t)) => Some(t),
            _ => None,
        }
    }

    pub(crate) fn textboxes_mut(&mut self) -> impl Iterator<Item = &mut TextBox> {
        self.content.values_mut().filter_map(|c| match c {
            PageContent::TextBox(t) => Some(t),
            PageContent::Figure(_) => None,
        })
    }

    /// Text of every text box joined by newlines.
    pub fn get_text(&self) -> String {
        self.textboxes()
            .map(|(_, t)| t.text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
