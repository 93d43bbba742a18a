//! Layout tree walker.
//!
//! Turns one page's layout tree into a [`Page`], writing an XML trace of
//! every visited node on the way.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::dom::{Figure, Page, TextBox};
use crate::geometry::BoundingBox;
use crate::layout::{LTFigure, LTImage, LTItem, LTPage, LTTextBox, LTTextLine, TextLineElement};

use super::xml::XmlDump;

/// Identity of an image for deduplication: (page id, string form, bbox).
pub type FigureKey = (i32, String, BoundingBox);

/// Depth-first walker for a single page.
///
/// `seen` lives for one conversion run, so an image reported both at page
/// level and inside a figure group is added only once.
pub struct Converter<'a> {
    trim: bool,
    seen: &'a mut HashSet<FigureKey>,
    dump: &'a mut XmlDump,
}

impl<'a> Converter<'a> {
    pub fn new(trim: bool, seen: &'a mut HashSet<FigureKey>, dump: &'a mut XmlDump) -> Self {
        Self { trim, seen, dump }
    }

    /// Builds the page for `ltpage`.
    pub fn convert_page(&mut self, ltpage: &LTPage) -> Page {
        let mut page = Page::from_layout(ltpage);
        self.dump.begin_page(ltpage);
        for item in ltpage.iter() {
            self.render(item, &mut page);
        }
        self.dump.end_page();
        debug!(
            pageid = ltpage.pageid,
            items = page.len(),
            "page converted"
        );
        page
    }

    fn render(&mut self, item: &LTItem, page: &mut Page) {
        match item {
            LTItem::Page(nested) => {
                warn!(pageid = nested.pageid, "nested page node, flattening");
                for child in nested.iter() {
                    self.render(child, page);
                }
            }
            LTItem::Line(line) => self.dump.line(line),
            LTItem::Rect(rect) => self.dump.rect(rect),
            LTItem::Curve(curve) => self.dump.curve(curve),
            LTItem::Figure(figure) => self.render_figure(figure, page),
            LTItem::Image(image) => {
                self.dump.image(image);
                self.add_figure(image, page);
            }
            LTItem::TextBox(textbox) => self.render_textbox(textbox, page),
            LTItem::TextLine(line) => self.render_textline(line),
            LTItem::Char(ch) => self.dump.char(ch),
            LTItem::Anno(anno) => self.dump.anno(anno),
            LTItem::Other(other) => {
                warn!(kind = %other.kind, "unknown layout node skipped");
                self.dump.unknown(&other.kind, item.bbox());
            }
        }
    }

    fn render_figure(&mut self, figure: &LTFigure, page: &mut Page) {
        self.dump.begin_figure(figure);
        for child in figure.iter() {
            self.render(child, page);
        }
        self.dump.end_figure();
    }

    /// Adds an image unless an identical one was already added in this run.
    fn add_figure(&mut self, image: &LTImage, page: &mut Page) {
        let figure = Figure::new(image);
        let key = (page.pageid(), figure.to_string(), figure.bbox());
        if self.seen.insert(key) {
            page.add_content(figure);
        } else {
            debug!(src = figure.src(), "duplicate image skipped");
        }
    }

    fn render_textbox(&mut self, textbox: &LTTextBox, page: &mut Page) {
        page.add_content(TextBox::new(i64::from(textbox.index()), textbox, self.trim));
        self.dump.begin_textbox(textbox);
        for line in textbox.iter() {
            self.render_textline(line);
        }
        self.dump.end_textbox();
    }

    fn render_textline(&mut self, line: &LTTextLine) {
        self.dump.begin_textline(line);
        for element in line.iter() {
            match element {
                TextLineElement::Char(ch) => self.dump.char(ch),
                TextLineElement::Anno(anno) => self.dump.anno(anno),
            }
        }
        self.dump.end_textline();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LTChar, LTLine, LTOther};

    fn page_with(items: Vec<LTItem>) -> LTPage {
        let mut page = LTPage::new(1, (0.0, 0.0, 612.0, 792.0), 0.0);
        for item in items {
            page.add(item);
        }
        page
    }

    fn convert(ltpage: &LTPage) -> (Page, XmlDump) {
        let mut seen = HashSet::new();
        let mut dump = XmlDump::new();
        let page = Converter::new(true, &mut seen, &mut dump).convert_page(ltpage);
        (page, dump)
    }

    #[test]
    fn test_graphics_go_only_to_dump() {
        let ltpage = page_with(vec![LTItem::Line(LTLine::new(1.0, (0.0, 0.0), (10.0, 0.0)))]);
        let (page, dump) = convert(&ltpage);
        assert!(page.is_empty());
        assert!(dump.fragments().contains("<line linewidth=\"1\""));
    }

    #[test]
    fn test_image_in_figure_and_page_counted_once() {
        let image = LTImage::new("Im1", (10.0, 10.0, 50.0, 50.0), (Some(40), Some(40)));
        let mut figure = LTFigure::new("Fm1", (10.0, 10.0, 50.0, 50.0));
        figure.add(LTItem::Image(image.clone()));
        let ltpage = page_with(vec![LTItem::Image(image), figure.into()]);

        let (page, _) = convert(&ltpage);
        assert_eq!(page.figures().count(), 1);
    }

    #[test]
    fn test_textbox_uses_upstream_index() {
        let mut line = LTTextLine::new();
        line.add_char(LTChar::new((0.0, 0.0, 5.0, 10.0), "A", "F1", 10.0));
        let mut tb = LTTextBox::new(7);
        tb.add(line);
        let ltpage = page_with(vec![tb.into()]);

        let (page, dump) = convert(&ltpage);
        let (id, textbox) = page.textboxes().next().unwrap();
        assert_eq!(id, 0);
        assert_eq!(textbox.boxid(), 7);
        assert_eq!(textbox.text(), "A");
        assert!(dump.fragments().contains("<textbox id=\"7\""));
        assert!(dump.fragments().contains(">A</text>"));
    }

    #[test]
    fn test_unknown_node_is_skipped() {
        let ltpage = page_with(vec![LTItem::Other(LTOther::new("LTTextGroup"))]);
        let (page, dump) = convert(&ltpage);
        assert!(page.is_empty());
        assert!(dump.fragments().contains("LTTextGroup"));
    }
}
