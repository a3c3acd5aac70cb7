//! Page walk: tables and lines, page by page.

use crate::error::Result;
use crate::model::{LineRecord, TableRegistry};
use crate::parser::{PdfBackend, PdfPage, TextLine};

use super::normalize::TextNormalizer;
use super::typography::FontSizeSamples;

/// What one walk over a document accumulates.
#[derive(Debug, Clone, Default)]
pub struct WalkOutput {
    pub lines: Vec<LineRecord>,
    pub registry: TableRegistry,
    pub samples: FontSizeSamples,
}

/// Visits every page in order, registering tables and emitting line records.
#[derive(Debug, Clone)]
pub struct PageWalker {
    normalizer: TextNormalizer,
    detect_tables: bool,
}

impl PageWalker {
    pub fn new(detect_tables: bool) -> Self {
        Self {
            normalizer: TextNormalizer::new(),
            detect_tables,
        }
    }

    /// Walk all pages of `backend`.
    ///
    /// Any page failure aborts the walk; the caller decides whether that
    /// becomes an empty result.
    pub fn walk<B: PdfBackend>(&self, backend: &B) -> Result<WalkOutput> {
        let mut output = WalkOutput::default();

        for index in 0..backend.page_count() {
            let page = backend.load_page(index)?;
            let page_num = index as u32;

            if self.detect_tables {
                for region in page.find_tables()? {
                    output.registry.register_table(page_num, region.bbox);
                }
            }

            let text_page = page.text_page()?;
            for line in text_page.lines() {
                if let Some(record) = self.line_record(line, page_num, &mut output.samples) {
                    output.lines.push(record);
                }
            }
        }

        log::debug!(
            "walked {} pages: {} lines, {} tables, {} span sizes",
            backend.page_count(),
            output.lines.len(),
            output.registry.table_count(),
            output.samples.len()
        );
        Ok(output)
    }

    /// Aggregate one line. Span sizes are sampled even when the line's text
    /// normalizes away.
    fn line_record(&self, line: &TextLine, page_num: u32, samples: &mut FontSizeSamples) -> Option<LineRecord> {
        let mut text = String::new();
        let mut font_size = 0.0_f32;
        let mut is_bold = false;

        for span in &line.spans {
            text.push_str(&span.text);
            font_size = font_size.max(span.size);
            is_bold |= span.is_bold();
            samples.push(span.size);
        }

        let text = self.normalizer.normalize(&text);
        if text.is_empty() {
            return None;
        }
        Some(LineRecord::new(text, font_size, is_bold, page_num, line.bbox))
    }
}

impl Default for PageWalker {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BoundingBox;
    use crate::parser::{TextPage, TextSpan, SPAN_FLAG_BOLD};
    use crate::Error;

    #[test]
    fn test_line_aggregation() {
        let walker = PageWalker::default();
        let line = TextLine::from_spans(vec![
            TextSpan::new("Name:", "Helvetica-Bold", 12.0, SPAN_FLAG_BOLD, (10.0, 50.0), 30.0),
            TextSpan::new(" Jane • Doe", "Helvetica", 10.0, 0, (42.0, 50.0), 50.0),
        ]);
        let mut samples = FontSizeSamples::new();

        let record = walker.line_record(&line, 3, &mut samples).unwrap();
        assert_eq!(record.text, "Name: Jane Doe");
        assert_eq!(record.font_size, 12.0);
        assert!(record.is_bold);
        assert_eq!(record.page_num, 3);
        assert_eq!(record.bbox, BoundingBox::from(line.bbox));
        assert_eq!(samples.as_slice(), &[12.0, 10.0]);
    }

    #[test]
    fn test_glyph_only_line_is_dropped_but_sampled() {
        let walker = PageWalker::default();
        let line = TextLine::from_spans(vec![TextSpan::new("•", "Symbol", 9.0, 0, (10.0, 50.0), 5.0)]);
        let mut samples = FontSizeSamples::new();

        assert!(walker.line_record(&line, 0, &mut samples).is_none());
        assert_eq!(samples.len(), 1);
    }

    struct BrokenBackend;
    struct NeverPage;

    impl PdfPage for NeverPage {
        fn find_tables(&self) -> Result<Vec<crate::parser::TableRegion>> {
            Ok(vec![])
        }
        fn text_page(&self) -> Result<TextPage> {
            Ok(TextPage::from_spans(&[], 612.0, 792.0))
        }
    }

    impl PdfBackend for BrokenBackend {
        type Page = NeverPage;
        fn page_count(&self) -> usize {
            2
        }
        fn load_page(&self, index: usize) -> Result<NeverPage> {
            if index == 0 {
                Ok(NeverPage)
            } else {
                Err(Error::PdfParse("truncated xref".to_string()))
            }
        }
    }

    #[test]
    fn test_page_failure_aborts_walk() {
        let result = PageWalker::default().walk(&BrokenBackend);
        assert!(matches!(result, Err(Error::PdfParse(_))));
    }

    #[test]
    fn test_empty_page_yields_nothing() {
        struct OnePage;
        impl PdfBackend for OnePage {
            type Page = NeverPage;
            fn page_count(&self) -> usize {
                1
            }
            fn load_page(&self, _: usize) -> Result<NeverPage> {
                Ok(NeverPage)
            }
        }

        let output = PageWalker::default().walk(&OnePage).unwrap();
        assert!(output.lines.is_empty());
        assert!(output.samples.is_empty());
        assert_eq!(output.registry.table_count(), 0);
    }
}
