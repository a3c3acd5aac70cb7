//! Benchmarks for resume extraction.
//!
//! Run with: cargo bench

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lopdf::{dictionary, Document, Object, Stream};
use resume_pdf::extract::TextNormalizer;
use resume_pdf::{Extractor, LopdfBackend, OutputMode};

/// Builds a synthetic resume with `page_count` pages of mixed-size lines.
fn create_test_pdf(page_count: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
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
        "Font" => dictionary! { "F1" => font_id, "F2" => bold_id },
    });

    let mut kids = Vec::new();
    for page in 0..page_count {
        let mut content = format!("BT /F2 14 Tf 72 740 Td (Section {}) Tj ET ", page + 1);
        for line in 0..40 {
            content.push_str(&format!(
                "BT /F1 10 Tf 72 {} Td (\\267 Built services handling {} requests per second) Tj ET ",
                720 - line * 16,
                (line + 1) * 1000
            ));
        }
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
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
        Object::Dictionary(dictionary! { "Type" => "Pages", "Kids" => kids, "Count" => count }),
    );
    let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("serialize benchmark pdf");
    buf
}

fn bench_format_detection(c: &mut Criterion) {
    let pdf_data = create_test_pdf(1);
    let non_pdf_data = b"Not a PDF file at all, just random text content";

    c.bench_function("detect_valid_pdf", |b| {
        b.iter(|| resume_pdf::detect_header(black_box(&pdf_data)).unwrap());
    });

    c.bench_function("detect_non_pdf", |b| {
        b.iter(|| resume_pdf::detect_header(black_box(non_pdf_data)).is_err());
    });
}

fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extraction");
    let extractor = Extractor::new();

    for page_count in [1, 3, 10].iter() {
        let data = create_test_pdf(*page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| {
                let backend = LopdfBackend::load_bytes(black_box(&data)).unwrap();
                extractor.extract_from_backend(&backend).unwrap()
            });
        });
    }

    group.finish();
}

fn bench_payload_to_json(c: &mut Criterion) {
    let payload = BASE64.encode(create_test_pdf(2));
    let extractor = Extractor::new();

    c.bench_function("payload_to_llm_json", |b| {
        b.iter(|| extractor.extract_json(black_box(&payload), OutputMode::Llm).unwrap());
    });
}

fn bench_normalize(c: &mut Criterion) {
    let normalizer = TextNormalizer::new();
    let text = "\u{2022}  Café résumé \u{2013} ﬁnance   team\u{1f}lead  ";

    c.bench_function("normalize_line", |b| {
        b.iter(|| normalizer.normalize(black_box(text)));
    });
}

criterion_group!(
    benches,
    bench_format_detection,
    bench_extraction,
    bench_payload_to_json,
    bench_normalize,
);
criterion_main!(benches);
