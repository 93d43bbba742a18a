mod common;

use common::*;
use pdfscope_core::layout::LTItem;
use pdfscope_core::{Document, PageContent, PdfError};

fn two_page_document(dir: &std::path::Path) -> Document {
    let path = write_pdf(dir, "two.pdf", &build_minimal_pdf_with_pages(2));
    let pages = vec![
        page(
            1,
            vec![
                textbox(0, (50.0, 700.0, 150.0, 710.0), "Invoice Number"),
                textbox(1, (160.0, 702.0, 260.0, 712.0), "INV-2024-001"),
            ],
        ),
        page(2, vec![textbox(0, (50.0, 500.0, 150.0, 510.0), "Second page")]),
    ];
    Document::open(path, source(pages)).unwrap()
}

#[test]
fn convert_single_page_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let mut doc = two_page_document(dir.path());

    doc.convert(true, Some(1)).unwrap();
    let first = doc.get_page(1).unwrap().clone();
    doc.convert(true, Some(1)).unwrap();
    assert_eq!(doc.get_page(1).unwrap(), &first);
    assert_eq!(first.len(), 2);
    assert!(matches!(doc.get_page(2), Err(PdfError::PageNotFound(2))));
}

#[test]
fn convert_other_page_keeps_previous_content() {
    let dir = tempfile::tempdir().unwrap();
    let mut doc = two_page_document(dir.path());

    doc.convert(true, Some(1)).unwrap();
    let first = doc.get_page(1).unwrap().clone();
    doc.convert(true, Some(2)).unwrap();

    let pages = doc.get_pages().unwrap();
    assert_eq!(pages.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(pages[&1], first);
    assert_eq!(pages[&2].get_text(), "Second page");

    // whole-document conversion is a no-op once every page is done
    doc.convert(true, None).unwrap();
    assert_eq!(doc.get_pages().unwrap()[&1], first);
}

#[test]
fn convert_rejects_pages_out_of_range() {
    let dir = tempfile::tempdir().unwrap();
    let mut doc = two_page_document(dir.path());
    assert!(matches!(doc.convert(true, Some(0)), Err(PdfError::PageNotFound(0))));
    assert!(matches!(doc.convert(true, Some(3)), Err(PdfError::PageNotFound(3))));
    assert!(!doc.is_converted());
}

#[test]
fn image_inside_figure_is_added_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_pdf(dir.path(), "img.pdf", &build_minimal_pdf_with_pages(1));
    let bbox = (100.0, 100.0, 300.0, 200.0);
    let ltpage = page(
        1,
        vec![
            figure("Fm1", bbox, vec![image("Im1", bbox).into()]),
            image("Im1", bbox).into(),
        ],
    );
    let mut doc = Document::open(path, source(vec![ltpage])).unwrap();
    doc.convert(true, None).unwrap();

    let page = doc.get_page(1).unwrap();
    let figures: Vec<_> = page.figures().collect();
    assert_eq!(figures.len(), 1);
    assert_eq!(figures[0].1.src(), "Im1");
    assert_eq!((figures[0].1.width(), figures[0].1.height()), (64, 32));
}

#[test]
fn content_ids_increase_across_kinds() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_pdf(dir.path(), "mixed.pdf", &build_minimal_pdf_with_pages(1));
    let ltpage = page(
        1,
        vec![
            textbox(0, (10.0, 10.0, 50.0, 20.0), "a"),
            image("Im1", (60.0, 10.0, 90.0, 20.0)).into(),
            textbox(1, (10.0, 30.0, 50.0, 40.0), "b"),
            figure(
                "Fm2",
                (0.0, 0.0, 10.0, 10.0),
                vec![image("Im2", (0.0, 0.0, 10.0, 10.0)).into()],
            ),
        ],
    );
    let mut doc = Document::open(path, source(vec![ltpage])).unwrap();
    doc.convert(true, None).unwrap();

    let page = doc.get_page(1).unwrap();
    let ids: Vec<usize> = page.content().map(|(id, _)| id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);
    assert!(matches!(page.get(1), Some(PageContent::Figure(_))));
    assert_eq!(page.textbox(2).map(|t| t.text()), Some("b"));
    assert_eq!(page.textbox(2).map(|t| t.boxid()), Some(1));
}

#[test]
fn unknown_nodes_do_not_fail_conversion() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = write_pdf(dir.path(), "other.pdf", &build_minimal_pdf_with_pages(1));
    let json = r#"[{
        "bbox": [0, 0, 612, 792], "pageid": 1,
        "items": [
            {"type": "Other", "kind": "LTFancyWidget"},
            {"type": "TextBox", "bbox": [10, 10, 50, 20], "index": 0, "lines": []}
        ]
    }]"#;
    let memory = pdfscope_core::MemoryLayoutSource::from_json_str(json).unwrap();
    let mut doc = Document::open(path, std::rc::Rc::new(memory)).unwrap();
    doc.convert(true, None).unwrap();

    assert_eq!(doc.get_page(1).unwrap().textboxes().count(), 1);
    assert!(doc.dump_xml().unwrap().contains("<!-- LTFancyWidget -->"));
}

#[test]
fn dump_xml_traces_converted_nodes() {
    let dir = tempfile::tempdir().unwrap();
    let mut doc = two_page_document(dir.path());
    doc.convert(true, Some(1)).unwrap();

    let xml = doc.dump_xml().unwrap();
    assert!(xml.starts_with("<?xml version=\"1.0\" ?>\n<pages>\n"));
    assert!(xml.contains("<page id=\"1\" bbox=\"0.000 0.000 612.000 792.000\" rotate=\"0\">"));
    assert!(xml.contains("<textbox id=\"1\" bbox=\"160.000 702.000 260.000 712.000\">"));
    assert!(xml.contains(">INV-2024-001</text>"));
    assert!(xml.ends_with("</pages>\n"));
    assert!(!xml.contains("Second page"));
}

#[test]
fn close_discards_state() {
    let dir = tempfile::tempdir().unwrap();
    let mut doc = two_page_document(dir.path());
    doc.convert(true, None).unwrap();
    doc.close();

    assert!(doc.is_closed());
    assert!(!doc.is_converted());
    assert!(matches!(doc.get_pages(), Err(PdfError::DocumentClosed)));
    assert!(matches!(doc.convert(true, None), Err(PdfError::DocumentClosed)));
    assert!(matches!(doc.dump_xml(), Err(PdfError::DocumentClosed)));
}

#[test]
fn released_handle_is_reopened() {
    let dir = tempfile::tempdir().unwrap();
    let mut doc = two_page_document(dir.path());
    doc.release_handle();
    doc.convert(true, Some(2)).unwrap();
    assert_eq!(doc.get_text(Some(2)).unwrap(), "Second page");
}

#[test]
fn replace_text_changes_first_match() {
    let dir = tempfile::tempdir().unwrap();
    let mut doc = two_page_document(dir.path());
    doc.convert(true, None).unwrap();

    assert!(doc.replace_text("INV-2024-001", "INV-2024-002").unwrap());
    assert!(!doc.replace_text("missing", "x").unwrap());
    assert_eq!(
        doc.get_page(1).unwrap().get_text(),
        "Invoice Number\nINV-2024-002"
    );
}

#[test]
fn untrimmed_text_keeps_line_breaks() {
    let dir = tempfile::tempdir().unwrap();
    let mut doc = two_page_document(dir.path());
    doc.convert(false, Some(2)).unwrap();
    let page = doc.get_page(2).unwrap();
    let (_, textbox) = page.textboxes().next().unwrap();
    assert_eq!(textbox.text(), "Second page\n");
}

#[test]
fn nested_items_survive_json_round_trip() {
    let ltpage = page(
        1,
        vec![figure("Fm1", (0.0, 0.0, 10.0, 10.0), vec![textbox(3, (1.0, 1.0, 9.0, 9.0), "x")])],
    );
    let json = serde_json::to_string(&vec![ltpage.clone()]).unwrap();
    let memory = pdfscope_core::MemoryLayoutSource::from_json_str(&json).unwrap();
    assert_eq!(memory.pages().len(), 1);
    assert!(matches!(memory.pages()[0].iter().next(), Some(LTItem::Figure(_))));
}
