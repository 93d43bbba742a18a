mod common;

use common::*;
use indexmap::IndexMap;
use pdfscope_core::document::ObjectReader;
use pdfscope_core::model::PDFObject;
use pdfscope_core::{Document, PdfError, SaveOptions};

fn twelve_objects() -> Vec<String> {
    let mut bodies = vec![
        "<< /Type /Catalog /Pages 2 0 R /Extra 12 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] >>".to_string(),
    ];
    for i in 4..12 {
        bodies.push(format!("<< /Filler {} >>", i));
    }
    bodies.push("<< /Title (Recovered) /Values [1 2.5 /Three] >>".to_string());
    bodies
}

#[test]
fn misplaced_object_is_recovered_from_raw_bytes() {
    init_tracing();
    let good = build_pdf(&twelve_objects());
    let bad = corrupt_offset(&good, 12, 9);

    let expected = ObjectReader::new(good).unwrap().getobj(12).unwrap();
    let reader = ObjectReader::new(bad).unwrap();
    assert_eq!(reader.getobj(12).unwrap(), expected);
    assert_eq!(
        expected.get("Title"),
        Some(&PDFObject::String(b"Recovered".to_vec()))
    );
    // neighbours are unaffected
    assert_eq!(reader.getobj(11).unwrap().get("Filler"), Some(&PDFObject::Int(11)));
}

#[test]
fn offset_past_end_is_recovered() {
    let good = build_pdf(&twelve_objects());
    let bad = corrupt_offset(&good, 12, 999_999);
    let reader = ObjectReader::new(bad).unwrap();
    assert!(reader.getobj(12).is_ok());
}

#[test]
fn missing_marker_fails_loudly() {
    let good = build_pdf(&twelve_objects());
    let mut bad = corrupt_offset(&good, 12, 9);
    let marker = b"12 0 obj";
    let pos = bad
        .windows(marker.len())
        .position(|w| w == marker)
        .unwrap();
    bad[pos..pos + 2].copy_from_slice(b"99");

    let reader = ObjectReader::new(bad).unwrap();
    assert!(matches!(
        reader.getobj(12),
        Err(PdfError::ObjectRecovery { objid: 12, genno: 0 })
    ));
}

#[test]
fn document_without_xref_uses_object_scan() {
    let good = build_pdf(&twelve_objects());
    let marker = b"xref";
    let pos = good
        .windows(marker.len())
        .rposition(|w| w == marker)
        .unwrap();
    // drop the table and trailer keyword, keep the objects
    let truncated = good[..pos].to_vec();
    let reader = ObjectReader::new(truncated).unwrap();
    assert!(reader.is_fallback());
    assert_eq!(reader.page_count().unwrap(), 1);
}

#[test]
fn save_fails_when_object_cannot_be_recovered() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let mut pdf = build_pdf(&twelve_objects());
    let marker = b"5 0 obj";
    let pos = pdf.windows(marker.len()).position(|w| w == marker).unwrap();
    pdf[pos..pos + marker.len()].copy_from_slice(b"8 8 obj");
    let path = write_pdf(dir.path(), "broken.pdf", &pdf);
    let mut doc = Document::open(path, source(Vec::new())).unwrap();

    let output = dir.path().join("out.pdf");
    let result = doc.save_field_values(&SaveOptions {
        output_path: Some(output.clone()),
        newvals: Some(IndexMap::from([("name".to_string(), "value".to_string())])),
        ..SaveOptions::default()
    });
    assert!(matches!(
        result,
        Err(PdfError::ObjectRecovery { objid: 5, genno: 0 })
    ));
    assert!(!output.exists());
}
