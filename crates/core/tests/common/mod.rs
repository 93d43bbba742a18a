#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::rc::Rc;

use pdfscope_core::layout::{
    LTAnno, LTChar, LTFigure, LTImage, LTItem, LTPage, LTTextBox, LTTextLine, LayoutSource,
    MemoryLayoutSource,
};
use pdfscope_core::utils::Rect;

pub const PAGE_BBOX: Rect = (0.0, 0.0, 612.0, 792.0);

/// Serializes `bodies` as objects 1..=n behind a classic xref table.
pub fn build_pdf<S: AsRef<str>>(bodies: &[S]) -> Vec<u8> {
    let mut out = b"%PDF-1.7\n".to_vec();
    let mut offsets = Vec::new();
    for (i, body) in bodies.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body.as_ref()).as_bytes());
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
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            bodies.len() + 1,
            xref_pos
        )
        .as_bytes(),
    );
    out
}

/// A document with `page_count` empty pages.
pub fn build_minimal_pdf_with_pages(page_count: usize) -> Vec<u8> {
    let kids: Vec<String> = (0..page_count).map(|i| format!("{} 0 R", 3 + i)).collect();
    let mut bodies = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            page_count
        ),
    ];
    for _ in 0..page_count {
        bodies.push("<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] >>".to_string());
    }
    build_pdf(&bodies)
}

/// Rewrites the xref entry of `objid` to point at `offset`.
pub fn corrupt_offset(pdf: &[u8], objid: usize, offset: usize) -> Vec<u8> {
    let marker = format!("{} 0 obj", objid);
    let real = pdf
        .windows(marker.len())
        .position(|w| w == marker.as_bytes())
        .expect("object marker");
    let good = format!("{:010} 00000 n \n", real);
    let bad = format!("{:010} 00000 n \n", offset);
    let pos = pdf
        .windows(good.len())
        .rposition(|w| w == good.as_bytes())
        .expect("xref entry");
    let mut out = pdf.to_vec();
    out[pos..pos + bad.len()].copy_from_slice(bad.as_bytes());
    out
}

pub fn write_pdf(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, data).expect("write fixture");
    path
}

pub fn textbox(index: i32, bbox: Rect, text: &str) -> LTItem {
    let mut line = LTTextLine::with_bbox(bbox);
    line.add_char(LTChar::new(bbox, text, "Helvetica", 10.0));
    line.add_anno(LTAnno::new("\n"));
    let mut textbox = LTTextBox::with_bbox(index, bbox);
    textbox.add(line);
    textbox.into()
}

pub fn image(name: &str, bbox: Rect) -> LTImage {
    LTImage::new(name, bbox, (Some(64), Some(32)))
}

pub fn figure(name: &str, bbox: Rect, items: Vec<LTItem>) -> LTItem {
    let mut figure = LTFigure::new(name, bbox);
    for item in items {
        figure.add(item);
    }
    figure.into()
}

pub fn page(pageid: i32, items: Vec<LTItem>) -> LTPage {
    let mut page = LTPage::new(pageid, PAGE_BBOX, 0.0);
    for item in items {
        page.add(item);
    }
    page
}

pub fn source(pages: Vec<LTPage>) -> Rc<dyn LayoutSource> {
    Rc::new(MemoryLayoutSource::new(pages))
}

/// Routes library logs to the test output; `RUST_LOG` selects the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
