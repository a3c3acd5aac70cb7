//! Output views and JSON emission.
//!
//! Two views exist over one [`ExtractionResult`]: the raw view (every line
//! with position, the table registry, totals) and the LLM view (text and
//! typography only). Both collapse to a single error object when nothing was
//! extracted.

mod json;
mod llm;
mod raw;
pub mod value;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::ExtractionResult;

pub use json::{to_json, JsonFormat};
pub use llm::llm_view;
pub use raw::raw_view;
pub use value::{to_json_value, HostIterable, HostValue, ToHostValue};

/// Message of the error object returned for documents without text.
pub const NO_TEXT_ERROR: &str = "No text extracted from PDF or error occurred during extraction.";

/// Which view to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Lines with positions, tables and totals
    #[default]
    Raw,
    /// Line text and typography for LLM prompts
    Llm,
}

impl OutputMode {
    /// Build this mode's view of `result`.
    pub fn view(self, result: &ExtractionResult) -> HostValue {
        match self {
            OutputMode::Raw => raw_view(result),
            OutputMode::Llm => llm_view(result),
        }
    }

    /// Build and emit this mode's view of `result`.
    pub fn render(self, result: &ExtractionResult, format: JsonFormat) -> Result<String> {
        to_json(&self.view(result), format)
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputMode::Raw => f.write_str("raw"),
            OutputMode::Llm => f.write_str("llm"),
        }
    }
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "raw" => Ok(OutputMode::Raw),
            "llm" => Ok(OutputMode::Llm),
            other => Err(format!("unknown output mode '{}' (expected raw or llm)", other)),
        }
    }
}

/// `{"error": ...}`, the only output for an empty extraction.
pub(crate) fn error_view() -> HostValue {
    HostValue::object([("error", HostValue::from(NO_TEXT_ERROR))])
}
