//! Shared helpers for integration tests: small PDFs built with lopdf.

#![allow(dead_code)]

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use lopdf::{dictionary, Document, Object, Stream};

/// Build a letter-sized PDF with one page per content stream.
///
/// `/F1` is Helvetica and `/F2` is Helvetica-Bold.
pub fn build_pdf(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let mut kids = Vec::new();
    for content in pages {
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.as_bytes().to_vec()));
        let media_box: Vec<Object> = vec![0.into(), 0.into(), 612.into(), 792.into()];
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => media_box,
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// A two-page resume: bold name at 16pt and a title at 11pt, then a 10pt
/// skills line on the second page.
pub fn resume_pdf() -> Vec<u8> {
    build_pdf(&[
        "BT /F2 16 Tf 72 720 Td (JOHN DOE) Tj ET \
         BT /F1 11 Tf 72 690 Td (Software Engineer) Tj ET",
        "BT /F1 10 Tf 72 720 Td (Rust, Python, SQL) Tj ET",
    ])
}

/// One page holding a three by three grid of cells.
pub fn table_pdf() -> Vec<u8> {
    let mut content = String::from("BT /F2 14 Tf 70 740 Td (Skills Matrix) Tj ET ");
    let rows = [
        ["Language", "Level", "Years"],
        ["Rust", "Expert", "5"],
        ["Python", "Advanced", "8"],
    ];
    for (i, row) in rows.iter().enumerate() {
        let y = 700 - 20 * i as i32;
        for (x, cell) in [70, 200, 330].iter().zip(row.iter()) {
            content.push_str(&format!("BT /F1 10 Tf {} {} Td ({}) Tj ET ", x, y, cell));
        }
    }
    build_pdf(&[&content])
}

pub fn encode(pdf: &[u8]) -> String {
    BASE64.encode(pdf)
}
