//! JSON emission.

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::value::{to_json_value, HostValue};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonFormat {
    /// Pretty-printed JSON with 2-space indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Reduce `value` and emit it as JSON text.
pub fn to_json(value: &HostValue, format: JsonFormat) -> Result<String> {
    let json = to_json_value(value);
    let text = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(&json)?,
        JsonFormat::Compact => serde_json::to_string(&json)?,
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> HostValue {
        HostValue::object([
            ("text", HostValue::from("Hello")),
            ("sizes", HostValue::Sequence(vec![HostValue::from(10.0f32)])),
        ])
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert_eq!(json, "{\n  \"text\": \"Hello\",\n  \"sizes\": [\n    10.0\n  ]\n}");
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert_eq!(json, r#"{"text":"Hello","sizes":[10.0]}"#);
    }

    #[test]
    fn test_format_names() {
        let format: JsonFormat = serde_json::from_str("\"compact\"").unwrap();
        assert_eq!(format, JsonFormat::Compact);
    }
}
