//! Extraction data model.
//!
//! Records produced by the page walk and the result they accumulate into.
//! The model is independent of the PDF library and of the output shapes.

mod geometry;
mod line;
mod registry;
mod result;

pub use geometry::{BoundingBox, Rect};
pub use line::LineRecord;
pub use registry::{LinkRecord, TableRecord, TableRegistry};
pub use result::{ExtractionResult, DEFAULT_HEADER_SIZE_THRESHOLD};
