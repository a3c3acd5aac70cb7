//! Raw view: every line with its position, plus tables and totals.

use crate::model::ExtractionResult;

use super::value::{HostValue, ToHostValue};
use super::error_view;

/// Build the raw view of `result`, or the error object when it has no lines.
pub fn raw_view(result: &ExtractionResult) -> HostValue {
    if result.is_empty() {
        return error_view();
    }

    HostValue::object([
        ("raw_lines", HostValue::sequence(&result.lines)),
        ("header_size_threshold", result.header_size_threshold.into()),
        ("table_registry", result.registry.to_host_value()),
        ("total_lines", result.total_lines().into()),
        ("total_pages", result.total_pages().into()),
    ])
}
