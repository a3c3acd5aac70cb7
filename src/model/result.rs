//! The accumulated output of one extraction.

use super::{LineRecord, TableRegistry};

/// Header threshold used when no span sizes were observed.
pub const DEFAULT_HEADER_SIZE_THRESHOLD: f32 = 11.0;

/// Lines, header threshold and table registry for one document.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionResult {
    /// Lines in document order (page ascending, then line order)
    pub lines: Vec<LineRecord>,
    /// Font size above which downstream consumers treat a line as a heading
    pub header_size_threshold: f32,
    /// Detected tables and (reserved) links
    pub registry: TableRegistry,
}

impl ExtractionResult {
    /// An empty result, used when a document cannot be opened or walked.
    pub fn empty() -> Self {
        Self {
            lines: Vec::new(),
            header_size_threshold: DEFAULT_HEADER_SIZE_THRESHOLD,
            registry: TableRegistry::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total_lines(&self) -> usize {
        self.lines.len()
    }

    /// `max(page_num) + 1` over all lines, or 0 without lines.
    pub fn total_pages(&self) -> u32 {
        self.lines
            .iter()
            .map(|l| l.page_num + 1)
            .max()
            .unwrap_or(0)
    }

    /// Whether any line is bold.
    pub fn has_headers(&self) -> bool {
        self.lines.iter().any(|l| l.is_bold)
    }

    pub fn max_font_size(&self) -> f32 {
        self.lines
            .iter()
            .map(|l| l.font_size)
            .fold(None, |acc: Option<f32>, s| Some(acc.map_or(s, |a| a.max(s))))
            .unwrap_or(0.0)
    }

    pub fn min_font_size(&self) -> f32 {
        self.lines
            .iter()
            .map(|l| l.font_size)
            .fold(None, |acc: Option<f32>, s| Some(acc.map_or(s, |a| a.min(s))))
            .unwrap_or(0.0)
    }
}

impl Default for ExtractionResult {
    fn default() -> Self {
        Self::empty()
    }
}
