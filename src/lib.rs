//! # resume-pdf
//!
//! Layout-aware text and typography extraction from PDF resumes.
//!
//! Every physical text line of a document is collected with its font size,
//! boldness, page and position, together with a header size threshold derived
//! from the document's font sizes and the locations of table-like regions.
//! The result is emitted as one of two JSON shapes: a raw view for layout
//! consumers and a compact view for LLM prompts.
//!
//! ## Quick Start
//!
//! ```no_run
//! use resume_pdf::{extract_to_json, OutputMode};
//!
//! fn main() -> resume_pdf::Result<()> {
//!     // A path, or a base64-encoded PDF longer than 500 characters
//!     let json = extract_to_json("resume.pdf", OutputMode::Llm)?;
//!     println!("{}", json);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Tolerant input**: file paths and base64 payloads through one entry point
//! - **Typography**: per-line max font size, bold detection, header threshold
//! - **Tables**: alignment-based table regions with stable ids
//! - **Fail-closed JSON**: every value has a JSON form; nothing panics on output
//! - **Parallel batches**: independent documents processed with Rayon

pub mod detect;
pub mod error;
pub mod extract;
pub mod input;
pub mod model;
pub mod parser;
pub mod render;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-export commonly used types
pub use detect::{detect_header, is_pdf_bytes, PdfHeader};
pub use error::{Error, Result};
pub use extract::{
    ExtractOptions, Extractor, FontSizeSamples, HeaderThresholdStrategy, MedianOffset,
};
pub use input::{open_document, DocumentSource};
pub use model::{
    BoundingBox, ExtractionResult, LineRecord, LinkRecord, Rect, TableRecord, TableRegistry,
};
pub use parser::{LopdfBackend, PdfBackend, PdfPage, TableDetectorConfig};
pub use render::{JsonFormat, OutputMode};

use rayon::prelude::*;

/// Extract `input` and return the JSON for `mode`.
///
/// `input` is a file path, or a base64-encoded PDF when it is longer than
/// 500 characters. A document that cannot be opened or has no text yields
/// the error object, not an `Err`; only serialization failures are errors.
///
/// # Example
///
/// ```no_run
/// use resume_pdf::{extract_to_json, OutputMode};
///
/// let json = extract_to_json("resume.pdf", OutputMode::Raw).unwrap();
/// assert!(json.starts_with('{'));
/// ```
pub fn extract_to_json(input: &str, mode: OutputMode) -> Result<String> {
    Extractor::new().extract_json(input, mode)
}

/// Raw view: lines with positions, header threshold, table registry, totals.
pub fn extract_pdf_content(input: &str) -> Result<String> {
    extract_to_json(input, OutputMode::Raw)
}

/// LLM view: line text and typography plus a document structure summary.
pub fn extract_pdf_content_for_llm(input: &str) -> Result<String> {
    extract_to_json(input, OutputMode::Llm)
}

/// Extract several inputs in parallel, one independent extraction each.
///
/// Results are returned in input order.
///
/// # Example
///
/// ```no_run
/// use resume_pdf::{extract_batch, Extractor, OutputMode};
///
/// let inputs = vec!["a.pdf".to_string(), "b.pdf".to_string()];
/// for json in extract_batch(&Extractor::new(), &inputs, OutputMode::Llm) {
///     println!("{}", json?);
/// }
/// # Ok::<(), resume_pdf::Error>(())
/// ```
pub fn extract_batch<S>(extractor: &Extractor, inputs: &[S], mode: OutputMode) -> Vec<Result<String>>
where
    S: AsRef<str> + Sync,
{
    inputs
        .par_iter()
        .map(|input| extractor.extract_json(input.as_ref(), mode))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_TEXT: &str =
        "{\n  \"error\": \"No text extracted from PDF or error occurred during extraction.\"\n}";

    #[test]
    fn test_missing_file_yields_error_object() {
        assert_eq!(extract_pdf_content("/nonexistent/cv.pdf").unwrap(), NO_TEXT);
        assert_eq!(extract_pdf_content_for_llm("/nonexistent/cv.pdf").unwrap(), NO_TEXT);
    }

    #[test]
    fn test_empty_input_yields_error_object() {
        assert_eq!(extract_to_json("", OutputMode::Raw).unwrap(), NO_TEXT);
    }

    #[test]
    fn test_batch_keeps_order() {
        let inputs = ["/nonexistent/a.pdf", "/nonexistent/b.pdf", "/nonexistent/c.pdf"];
        let results = extract_batch(&Extractor::new(), &inputs, OutputMode::Llm);
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.as_deref().ok() == Some(NO_TEXT)));
    }
}
