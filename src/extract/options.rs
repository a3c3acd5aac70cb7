//! Extraction options and configuration.

use serde::Deserialize;

use crate::parser::TableDetectorConfig;
use crate::render::JsonFormat;

/// Inputs longer than this many characters are tried as base64 first.
pub const DEFAULT_PAYLOAD_THRESHOLD: usize = 500;

/// Options for extracting a document.
///
/// Deserializable so a CLI config file can provide any subset of fields.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Character length above which an input may be a base64 payload
    pub payload_threshold: usize,

    /// Whether to locate tables on each page
    pub detect_tables: bool,

    /// JSON output layout
    pub json_format: JsonFormat,

    /// Table finder tuning
    pub table_config: TableDetectorConfig,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the payload length threshold.
    pub fn with_payload_threshold(mut self, chars: usize) -> Self {
        self.payload_threshold = chars;
        self
    }

    /// Enable or disable table detection.
    pub fn with_tables(mut self, detect: bool) -> Self {
        self.detect_tables = detect;
        self
    }

    /// Set JSON output format.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }

    /// Emit compact JSON.
    pub fn compact(mut self) -> Self {
        self.json_format = JsonFormat::Compact;
        self
    }

    /// Set table detector configuration.
    pub fn with_table_config(mut self, config: TableDetectorConfig) -> Self {
        self.table_config = config;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            payload_threshold: DEFAULT_PAYLOAD_THRESHOLD,
            detect_tables: true,
            json_format: JsonFormat::Pretty,
            table_config: TableDetectorConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_options_builder() {
        let options = ExtractOptions::new()
            .with_payload_threshold(64)
            .with_tables(false)
            .compact();

        assert_eq!(options.payload_threshold, 64);
        assert!(!options.detect_tables);
        assert_eq!(options.json_format, JsonFormat::Compact);
    }

    #[test]
    fn test_default_options() {
        let options = ExtractOptions::default();
        assert_eq!(options.payload_threshold, 500);
        assert!(options.detect_tables);
        assert_eq!(options.json_format, JsonFormat::Pretty);
        assert_eq!(options.table_config.min_rows, 2);
    }

    #[test]
    fn test_partial_config_file() {
        let options: ExtractOptions =
            serde_json::from_str(r#"{"detect_tables": false, "table_config": {"max_columns": 4}}"#)
                .unwrap();
        assert!(!options.detect_tables);
        assert_eq!(options.payload_threshold, 500);
        assert_eq!(options.table_config.max_columns, 4);
        assert_eq!(options.table_config.min_columns, 2);
    }
}
