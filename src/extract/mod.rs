//! Extraction pipeline: page walk, normalization and typography.

mod normalize;
mod options;
mod typography;
mod walker;

use std::sync::Arc;

use crate::error::Result;
use crate::input::open_document;
use crate::model::ExtractionResult;
use crate::parser::PdfBackend;
use crate::render::OutputMode;

pub use normalize::TextNormalizer;
pub use options::{ExtractOptions, DEFAULT_PAYLOAD_THRESHOLD};
pub use typography::{FontSizeSamples, HeaderThresholdStrategy, MedianOffset};
pub use walker::{PageWalker, WalkOutput};

/// Builder for extracting documents.
///
/// # Example
///
/// ```no_run
/// use resume_pdf::{Extractor, ExtractOptions, OutputMode};
///
/// let json = Extractor::new()
///     .with_options(ExtractOptions::new().compact())
///     .extract_json("resume.pdf", OutputMode::Llm)?;
/// # Ok::<(), resume_pdf::Error>(())
/// ```
#[derive(Clone)]
pub struct Extractor {
    options: ExtractOptions,
    strategy: Arc<dyn HeaderThresholdStrategy>,
}

impl Extractor {
    /// Create an extractor with default options and the median + 1.0 threshold.
    pub fn new() -> Self {
        Self {
            options: ExtractOptions::default(),
            strategy: Arc::new(MedianOffset::default()),
        }
    }

    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the header threshold heuristic.
    pub fn with_threshold_strategy<S>(mut self, strategy: S) -> Self
    where
        S: HeaderThresholdStrategy + 'static,
    {
        self.strategy = Arc::new(strategy);
        self
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract `input` (path or base64 payload).
    ///
    /// Failures while opening or walking the document are logged and yield
    /// an empty result.
    pub fn extract(&self, input: &str) -> ExtractionResult {
        match self.try_extract(input) {
            Ok(result) => result,
            Err(e) => {
                log::warn!("extraction failed, returning empty result: {}", e);
                ExtractionResult::empty()
            }
        }
    }

    /// Like [`extract`](Self::extract), but returns the failure.
    pub fn try_extract(&self, input: &str) -> Result<ExtractionResult> {
        let backend = open_document(input, &self.options)?;
        self.extract_from_backend(&backend)
    }

    /// Run the walk over an already opened backend.
    pub fn extract_from_backend<B: PdfBackend>(&self, backend: &B) -> Result<ExtractionResult> {
        let walk = PageWalker::new(self.options.detect_tables).walk(backend)?;
        let header_size_threshold = self.strategy.threshold(&walk.samples);
        log::debug!("header size threshold {}", header_size_threshold);

        Ok(ExtractionResult {
            lines: walk.lines,
            header_size_threshold,
            registry: walk.registry,
        })
    }

    /// Extract `input` and emit the `mode` view as JSON.
    ///
    /// Only serialization failures are returned; extraction failures become
    /// the error object.
    pub fn extract_json(&self, input: &str, mode: OutputMode) -> Result<String> {
        let result = self.extract(input);
        mode.render(&result, self.options.json_format)
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Extractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extractor")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
