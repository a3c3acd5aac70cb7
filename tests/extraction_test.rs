//! Integration tests for extraction over real (lopdf-built) documents.

mod common;

use resume_pdf::{ExtractOptions, Extractor, LopdfBackend, OutputMode};
use serde_json::Value;

fn extract_bytes(pdf: &[u8]) -> resume_pdf::ExtractionResult {
    let backend = LopdfBackend::load_bytes(pdf).unwrap();
    Extractor::new().extract_from_backend(&backend).unwrap()
}

#[test]
fn test_lines_in_reading_order() {
    let result = extract_bytes(&common::resume_pdf());

    let texts: Vec<&str> = result.lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, ["JOHN DOE", "Software Engineer", "Rust, Python, SQL"]);

    let pages: Vec<u32> = result.lines.iter().map(|l| l.page_num).collect();
    assert_eq!(pages, [0, 0, 1]);
}

#[test]
fn test_typography() {
    let result = extract_bytes(&common::resume_pdf());

    assert_eq!(result.lines[0].font_size, 16.0);
    assert!(result.lines[0].is_bold);
    assert_eq!(result.lines[1].font_size, 11.0);
    assert!(!result.lines[1].is_bold);
    assert_eq!(result.lines[2].font_size, 10.0);

    // sizes [10, 11, 16]: median 11 plus one
    assert_eq!(result.header_size_threshold, 12.0);
    assert_eq!(result.total_pages(), 2);
}

#[test]
fn test_bbox_is_top_left() {
    let result = extract_bytes(&common::resume_pdf());
    let [x0, y0, x1, y1] = result.lines[0].bbox.0;
    let title = result.lines[1].bbox.0;

    assert_eq!(x0, 72.0);
    assert!(y0 < y1);
    assert!(x0 < x1);
    // the name sits above the title on the page
    assert!(y1 <= title[1]);
}

#[test]
fn test_table_region_registered() {
    let result = extract_bytes(&common::table_pdf());
    let tables = result.registry.tables();

    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].table_id, "page_0_table_0");
    assert_eq!(result.registry.tables_on_page(0).len(), 1);
    assert!(result.registry.links().is_empty());
}

#[test]
fn test_tables_can_be_disabled() {
    let pdf = common::table_pdf();
    let backend = LopdfBackend::load_bytes(&pdf).unwrap();
    let result = Extractor::new()
        .with_options(ExtractOptions::new().with_tables(false))
        .extract_from_backend(&backend)
        .unwrap();

    assert_eq!(result.registry.table_count(), 0);
    assert!(!result.is_empty());
}

#[test]
fn test_blank_page_yields_error_object() {
    let pdf = common::build_pdf(&["0 0 m 100 100 l S"]);
    let result = extract_bytes(&pdf);
    assert!(result.is_empty());

    let json: Value = serde_json::from_str(&OutputMode::Raw.render(&result, Default::default()).unwrap())
        .unwrap();
    assert_eq!(
        json["error"],
        "No text extracted from PDF or error occurred during extraction."
    );
}

#[test]
fn test_whitespace_and_glyph_lines_dropped() {
    let pdf = common::build_pdf(&[
        "BT /F1 10 Tf 72 720 Td (Experience) Tj ET \
         BT /F1 10 Tf 72 700 Td (   ) Tj ET \
         BT /F1 10 Tf 72 680 Td (* *) Tj ET",
    ]);
    let result = extract_bytes(&pdf);

    let texts: Vec<&str> = result.lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, ["Experience"]);
    assert_eq!(result.header_size_threshold, 11.0);
}

#[test]
fn test_dropped_lines_still_count_toward_threshold() {
    let pdf = common::build_pdf(&[
        "BT /F1 10 Tf 72 720 Td (Alpha) Tj ET \
         BT /F1 30 Tf 72 690 Td (   ) Tj (   ) Tj ET \
         BT /F1 10 Tf 72 650 Td (Beta) Tj ET",
    ]);
    let result = extract_bytes(&pdf);

    let texts: Vec<&str> = result.lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, ["Alpha", "Beta"]);
    // sizes [10, 30, 30, 10]: sorted[2] is 30
    assert_eq!(result.header_size_threshold, 31.0);
}
