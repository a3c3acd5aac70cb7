//! Line records.

use super::BoundingBox;

/// One logical text line with aggregated typography and position.
#[derive(Debug, Clone, PartialEq)]
pub struct LineRecord {
    /// Normalized line text
    pub text: String,
    /// Largest span font size on the line
    pub font_size: f32,
    /// Whether any span on the line is bold
    pub is_bold: bool,
    /// Zero-based page index
    pub page_num: u32,
    /// Line bounding box
    pub bbox: BoundingBox,
}

impl LineRecord {
    pub fn new(
        text: impl Into<String>,
        font_size: f32,
        is_bold: bool,
        page_num: u32,
        bbox: impl Into<BoundingBox>,
    ) -> Self {
        Self {
            text: text.into(),
            font_size,
            is_bold,
            page_num,
            bbox: bbox.into(),
        }
    }
}
