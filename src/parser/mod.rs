//! PDF parsing module.

pub mod backend;
mod layout;
mod table_detector;

pub use backend::{LopdfBackend, LopdfPage, PdfBackend, PdfPage};
pub use layout::{
    LayoutAnalyzer, TextBlock, TextLine, TextPage, TextSpan, SPAN_FLAG_BOLD, SPAN_FLAG_ITALIC,
    SPAN_FLAG_MONOSPACE, SPAN_FLAG_SERIF, SPAN_FLAG_SUPERSCRIPT,
};
pub use table_detector::{TableDetector, TableDetectorConfig, TableRegion};
