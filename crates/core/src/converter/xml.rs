//! XML trace of the layout trees seen during conversion.
//!
//! Every node the converter visits writes one fragment, in visit order.
//! The trace is for debugging and auditing and is not read back.

use std::fmt::Write;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::layout::{
    LTAnno, LTChar, LTCurve, LTFigure, LTImage, LTLine, LTPage, LTRect, LTTextBox, LTTextLine,
};
use crate::utils::{Rect, bbox2str, enc};

/// Characters XML 1.0 cannot carry.
static CONTROL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x00-\x08\x0b-\x0c\x0e-\x1f]").expect("valid control regex"));

/// Append-only accumulator of XML fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlDump {
    buf: String,
}

impl XmlDump {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Fragments written so far.
    pub fn fragments(&self) -> &str {
        &self.buf
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Complete XML document wrapping every fragment in `<pages>`.
    pub fn to_document(&self) -> String {
        format!("<?xml version=\"1.0\" ?>\n<pages>\n{}</pages>\n", self.buf)
    }

    fn write_text(&mut self, text: &str) {
        let text = CONTROL_RE.replace_all(text, "");
        self.buf.push_str(&enc(&text));
    }

    pub fn begin_page(&mut self, page: &LTPage) {
        let _ = writeln!(
            self.buf,
            "<page id=\"{}\" bbox=\"{}\" rotate=\"{}\">",
            page.pageid,
            bbox2str(page.bbox()),
            page.rotate as i32
        );
    }

    pub fn end_page(&mut self) {
        self.buf.push_str("</page>\n");
    }

    pub fn line(&mut self, line: &LTLine) {
        let _ = writeln!(
            self.buf,
            "<line linewidth=\"{}\" bbox=\"{}\" />",
            line.linewidth as i32,
            bbox2str(line.bbox())
        );
    }

    pub fn rect(&mut self, rect: &LTRect) {
        let _ = writeln!(
            self.buf,
            "<rect linewidth=\"{}\" bbox=\"{}\" />",
            rect.linewidth as i32,
            bbox2str(rect.bbox())
        );
    }

    pub fn curve(&mut self, curve: &LTCurve) {
        let _ = writeln!(
            self.buf,
            "<curve linewidth=\"{}\" bbox=\"{}\" pts=\"{}\"/>",
            curve.linewidth as i32,
            bbox2str(curve.bbox()),
            curve.get_pts()
        );
    }

    pub fn begin_figure(&mut self, figure: &LTFigure) {
        let _ = writeln!(
            self.buf,
            "<figure name=\"{}\" bbox=\"{}\">",
            enc(&figure.name),
            bbox2str(figure.bbox())
        );
    }

    pub fn end_figure(&mut self) {
        self.buf.push_str("</figure>\n");
    }

    pub fn begin_textbox(&mut self, textbox: &LTTextBox) {
        let wmode = if textbox.vertical {
            " wmode=\"vertical\""
        } else {
            ""
        };
        let _ = writeln!(
            self.buf,
            "<textbox id=\"{}\" bbox=\"{}\"{}>",
            textbox.index(),
            bbox2str(textbox.bbox()),
            wmode
        );
    }

    pub fn end_textbox(&mut self) {
        self.buf.push_str("</textbox>\n");
    }

    pub fn begin_textline(&mut self, line: &LTTextLine) {
        let _ = writeln!(self.buf, "<textline bbox=\"{}\">", bbox2str(line.bbox()));
    }

    pub fn end_textline(&mut self) {
        self.buf.push_str("</textline>\n");
    }

    pub fn char(&mut self, ch: &LTChar) {
        let _ = write!(
            self.buf,
            "<text font=\"{}\" bbox=\"{}\" size=\"{:.3}\">",
            enc(ch.fontname()),
            bbox2str(ch.bbox()),
            ch.size()
        );
        self.write_text(ch.get_text());
        self.buf.push_str("</text>\n");
    }

    pub fn anno(&mut self, anno: &LTAnno) {
        self.buf.push_str("<text>");
        self.write_text(anno.get_text());
        self.buf.push_str("</text>\n");
    }

    pub fn image(&mut self, image: &LTImage) {
        let _ = writeln!(
            self.buf,
            "<image width=\"{}\" height=\"{}\" />",
            image.width() as i32,
            image.height() as i32
        );
    }

    /// Marker for a node kind without a dedicated tag.
    pub fn unknown(&mut self, kind: &str, bbox: Option<Rect>) {
        match bbox {
            Some(bbox) => {
                let _ = writeln!(
                    self.buf,
                    "<!-- {} bbox=\"{}\" -->",
                    enc(kind).replace("--", "- -"),
                    bbox2str(bbox)
                );
            }
            None => {
                let _ = writeln!(self.buf, "<!-- {} -->", enc(kind).replace("--", "- -"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_wrapper() {
        let mut dump = XmlDump::new();
        dump.begin_page(&LTPage::new(1, (0.0, 0.0, 612.0, 792.0), 0.0));
        dump.end_page();
        assert_eq!(
            dump.to_document(),
            concat!(
                "<?xml version=\"1.0\" ?>\n<pages>\n",
                "<page id=\"1\" bbox=\"0.000 0.000 612.000 792.000\" rotate=\"0\">\n",
                "</page>\n</pages>\n"
            )
        );
    }

    #[test]
    fn test_text_is_escaped_and_stripped() {
        let mut dump = XmlDump::new();
        dump.char(&LTChar::new((1.0, 2.0, 3.0, 4.0), "<\u{1}", "Helvetica", 12.0));
        assert_eq!(
            dump.fragments(),
            concat!(
                "<text font=\"Helvetica\" bbox=\"1.000 2.000 3.000 4.000\" size=\"12.000\">",
                "&lt;</text>\n"
            )
        );
    }

    #[test]
    fn test_vertical_textbox_mode() {
        let mut tb = LTTextBox::with_bbox(3, (0.0, 0.0, 10.0, 10.0));
        tb.vertical = true;
        let mut dump = XmlDump::new();
        dump.begin_textbox(&tb);
        assert!(dump.fragments().starts_with("<textbox id=\"3\""));
        assert!(dump.fragments().contains("wmode=\"vertical\""));
    }
}
