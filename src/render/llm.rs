//! LLM view: line text and typography only, with a document summary.

use crate::model::ExtractionResult;

use super::value::HostValue;
use super::error_view;

/// Build the LLM-oriented view of `result`, or the error object when it has
/// no lines.
pub fn llm_view(result: &ExtractionResult) -> HostValue {
    if result.is_empty() {
        return error_view();
    }

    let content = result
        .lines
        .iter()
        .map(|line| {
            HostValue::object([
                ("text", HostValue::from(line.text.as_str())),
                ("font_size", line.font_size.into()),
                ("is_bold", line.is_bold.into()),
            ])
        })
        .collect();

    HostValue::object([
        ("content", HostValue::Sequence(content)),
        ("total_lines", result.total_lines().into()),
        (
            "document_structure",
            HostValue::object([
                ("has_headers", HostValue::from(result.has_headers())),
                ("max_font_size", result.max_font_size().into()),
                ("min_font_size", result.min_font_size().into()),
            ]),
        ),
    ])
}
