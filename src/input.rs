//! Input resolution: file path or base64 payload.
//!
//! A caller passes one string. Short strings are always paths; long strings
//! are tried as a base64-encoded PDF first and fall back to being a path
//! when they do not decode or do not open.

use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::detect::is_pdf_bytes;
use crate::error::{Error, Result};
use crate::extract::ExtractOptions;
use crate::parser::LopdfBackend;

/// Where a document's bytes come from, decided once per input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// A filesystem path
    Path(PathBuf),
    /// A decoded in-memory payload
    Bytes(Vec<u8>),
}

impl DocumentSource {
    /// Classify `input`.
    ///
    /// Inputs of at most `payload_threshold` characters are paths. Longer
    /// inputs become `Bytes` when they decode as standard base64, else a path.
    pub fn resolve(input: &str, payload_threshold: usize) -> Self {
        if input.chars().count() <= payload_threshold {
            return DocumentSource::Path(PathBuf::from(input));
        }
        match decode_payload(input) {
            Some(bytes) => DocumentSource::Bytes(bytes),
            None => {
                log::debug!("input of {} chars is not base64; treating it as a path", input.len());
                DocumentSource::Path(PathBuf::from(input))
            }
        }
    }

    pub fn is_payload(&self) -> bool {
        matches!(self, DocumentSource::Bytes(_))
    }
}

/// Decode a standard-alphabet base64 payload, ignoring ASCII whitespace.
pub fn decode_payload(input: &str) -> Option<Vec<u8>> {
    let compact: String = input
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    BASE64.decode(compact.as_bytes()).ok()
}

/// Open the document `input` refers to.
///
/// A decoded payload that is not a loadable PDF is retried as a path using
/// the original string.
pub fn open_document(input: &str, options: &ExtractOptions) -> Result<LopdfBackend> {
    let backend = match DocumentSource::resolve(input, options.payload_threshold) {
        DocumentSource::Bytes(bytes) => match open_payload(&bytes) {
            Ok(backend) => backend,
            Err(e) => {
                log::debug!("decoded payload did not open ({}); retrying as a path", e);
                open_path(Path::new(input)).map_err(|path_err| {
                    Error::InputResolution(format!(
                        "payload rejected ({}) and path rejected ({})",
                        e, path_err
                    ))
                })?
            }
        },
        DocumentSource::Path(path) => open_path(&path)?,
    };
    Ok(backend.with_table_config(options.table_config.clone()))
}

fn open_payload(bytes: &[u8]) -> Result<LopdfBackend> {
    if !is_pdf_bytes(bytes) {
        return Err(Error::UnknownFormat);
    }
    LopdfBackend::load_bytes(bytes)
}

fn open_path(path: &Path) -> Result<LopdfBackend> {
    LopdfBackend::load_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_input_is_path() {
        let source = DocumentSource::resolve("resume.pdf", 500);
        assert_eq!(source, DocumentSource::Path(PathBuf::from("resume.pdf")));
    }

    #[test]
    fn test_exactly_threshold_is_path() {
        // Valid base64, but not long enough to be tried as one.
        let input = "QUJD".repeat(125);
        assert_eq!(input.len(), 500);
        assert!(!DocumentSource::resolve(&input, 500).is_payload());
    }

    #[test]
    fn test_long_base64_is_payload() {
        let payload = vec![7u8; 600];
        let input = BASE64.encode(&payload);
        assert!(input.len() > 500);
        assert_eq!(DocumentSource::resolve(&input, 500), DocumentSource::Bytes(payload));
    }

    #[test]
    fn test_long_non_base64_is_path() {
        let input = format!("/tmp/{}.pdf", "résumé-".repeat(80));
        let source = DocumentSource::resolve(&input, 500);
        assert_eq!(source, DocumentSource::Path(PathBuf::from(&input)));
    }

    #[test]
    fn test_threshold_counts_characters() {
        // 300 two-byte characters: over 500 bytes, under 500 characters.
        let input = "é".repeat(300);
        assert!(!DocumentSource::resolve(&input, 500).is_payload());
    }

    #[test]
    fn test_wrapped_base64_decodes() {
        let payload = b"%PDF-1.4 wrapped".repeat(40);
        let encoded = BASE64.encode(&payload);
        let wrapped: String = encoded
            .as_bytes()
            .chunks(76)
            .map(|c| std::str::from_utf8(c).unwrap())
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(decode_payload(&wrapped), Some(payload));
    }

    #[test]
    fn test_missing_path_is_error() {
        let result = open_document("/nonexistent/resume.pdf", &ExtractOptions::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_non_pdf_payload_falls_back_then_fails() {
        let input = BASE64.encode(vec![b'x'; 600]);
        let result = open_document(&input, &ExtractOptions::default());
        assert!(matches!(result, Err(Error::InputResolution(_))));
    }
}
