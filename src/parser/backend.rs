//! PDF backend abstraction layer.
//!
//! The page walker only sees [`PdfBackend`] and [`PdfPage`]; the concrete
//! PDF library (lopdf) stays behind this seam so the walk can run over an
//! in-memory backend in tests.

use std::path::Path;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};

use super::layout::{LayoutAnalyzer, TextPage, TextSpan};
use super::table_detector::{TableDetector, TableDetectorConfig, TableRegion};

/// US Letter, used when a page carries no usable MediaBox.
const DEFAULT_PAGE_BOX: [f32; 4] = [0.0, 0.0, 612.0, 792.0];
/// Guard against cyclic `Parent` chains.
const MAX_INHERITANCE_DEPTH: usize = 32;

/// An opened document: page enumeration and page loading.
///
/// Dropping the backend releases the document.
pub trait PdfBackend {
    type Page: PdfPage;

    fn page_count(&self) -> usize;

    /// Load the page at zero-based `index`.
    fn load_page(&self, index: usize) -> Result<Self::Page>;
}

/// One loaded page.
pub trait PdfPage {
    /// Table regions on the page, top to bottom.
    fn find_tables(&self) -> Result<Vec<TableRegion>>;

    /// Structured text: blocks → lines → spans.
    fn text_page(&self) -> Result<TextPage>;
}

/// [`PdfBackend`] backed by `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
    table_config: TableDetectorConfig,
}

impl LopdfBackend {
    /// Open a document from a file path.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let doc = LopdfDocument::load(path)?;
        Ok(Self::from_document(doc))
    }

    /// Open a document from an in-memory buffer.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self::from_document(doc))
    }

    fn from_document(doc: LopdfDocument) -> Self {
        log::debug!("opened PDF {} with {} pages", doc.version, doc.get_pages().len());
        Self {
            doc,
            table_config: TableDetectorConfig::default(),
        }
    }

    /// Use a custom table detector configuration for pages loaded afterwards.
    pub fn with_table_config(mut self, config: TableDetectorConfig) -> Self {
        self.table_config = config;
        self
    }

    /// Get PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    fn page_id(&self, index: usize) -> Result<ObjectId> {
        let pages = self.doc.get_pages();
        let count = pages.len();
        pages
            .into_values()
            .nth(index)
            .ok_or(Error::PageOutOfRange(index, count))
    }

    /// Media box of a page, following `Parent` inheritance.
    fn page_box(&self, page_id: ObjectId) -> [f32; 4] {
        let mut dict = self.doc.get_dictionary(page_id).ok();
        for _ in 0..MAX_INHERITANCE_DEPTH {
            let Some(current) = dict else {
                break;
            };
            if let Some(rect) = current.get(b"MediaBox").ok().and_then(|o| self.rect_of(o)) {
                return rect;
            }
            dict = current
                .get(b"Parent")
                .ok()
                .and_then(|o| o.as_reference().ok())
                .and_then(|id| self.doc.get_dictionary(id).ok());
        }
        DEFAULT_PAGE_BOX
    }

    fn rect_of(&self, obj: &Object) -> Option<[f32; 4]> {
        let obj = match obj {
            Object::Reference(id) => self.doc.get_object(*id).ok()?,
            other => other,
        };
        let values: Vec<f32> = obj
            .as_array()
            .ok()?
            .iter()
            .filter_map(|o| match o {
                Object::Integer(i) => Some(*i as f32),
                Object::Real(r) => Some(*r),
                _ => None,
            })
            .collect();
        match values.as_slice() {
            [x0, y0, x1, y1] => Some([x0.min(*x1), y0.min(*y1), x0.max(*x1), y0.max(*y1)]),
            _ => None,
        }
    }

    /// Concatenated, decompressed content streams of a page.
    fn page_content(&self, page_dict: &Dictionary) -> Result<Vec<u8>> {
        let contents = match page_dict.get(b"Contents") {
            Ok(contents) => contents,
            // A page without content is blank, not broken.
            Err(_) => return Ok(Vec::new()),
        };

        let mut content = Vec::new();
        match contents {
            Object::Reference(id) => self.append_stream(*id, &mut content)?,
            Object::Array(parts) => {
                for part in parts {
                    if let Object::Reference(id) = part {
                        self.append_stream(*id, &mut content)?;
                    }
                }
            }
            Object::Stream(s) => content.extend_from_slice(&stream_bytes(s)),
            _ => return Err(Error::PdfParse("Invalid content stream".to_string())),
        }
        Ok(content)
    }

    fn append_stream(&self, id: ObjectId, out: &mut Vec<u8>) -> Result<()> {
        match self.doc.get_object(id)? {
            Object::Stream(s) => {
                out.extend_from_slice(&stream_bytes(s));
                out.push(b'\n');
                Ok(())
            }
            Object::Array(parts) => {
                for part in parts {
                    if let Object::Reference(inner) = part {
                        self.append_stream(*inner, out)?;
                    }
                }
                Ok(())
            }
            _ => Err(Error::PdfParse(format!("object {:?} is not a content stream", id))),
        }
    }
}

/// Stream payload, decompressed when a filter is present.
fn stream_bytes(stream: &lopdf::Stream) -> Vec<u8> {
    stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone())
}

impl PdfBackend for LopdfBackend {
    type Page = LopdfPage;

    fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    fn load_page(&self, index: usize) -> Result<LopdfPage> {
        let page_id = self.page_id(index)?;
        let page_dict = self.doc.get_dictionary(page_id)?;
        let page_box = self.page_box(page_id);

        let fonts = self.doc.get_page_fonts(page_id)?;
        let content = self.page_content(page_dict)?;
        let spans = LayoutAnalyzer::new(&self.doc).extract_spans(&content, &fonts, page_box)?;
        log::trace!("page {}: {} spans", index, spans.len());

        Ok(LopdfPage {
            width: page_box[2] - page_box[0],
            height: page_box[3] - page_box[1],
            spans,
            detector: TableDetector::with_config(self.table_config.clone()),
        })
    }
}

/// A page loaded by [`LopdfBackend`], holding its interpreted spans.
#[derive(Debug, Clone)]
pub struct LopdfPage {
    width: f32,
    height: f32,
    spans: Vec<TextSpan>,
    detector: TableDetector,
}

impl LopdfPage {
    pub fn spans(&self) -> &[TextSpan] {
        &self.spans
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }
}

impl PdfPage for LopdfPage {
    fn find_tables(&self) -> Result<Vec<TableRegion>> {
        Ok(self.detector.find_tables(&self.spans))
    }

    fn text_page(&self) -> Result<TextPage> {
        Ok(TextPage::from_spans(&self.spans, self.width, self.height))
    }
}
