//! Fail-closed conversion to JSON values.
//!
//! Output views are first built as [`HostValue`] trees, then reduced to
//! `serde_json::Value` by [`to_json_value`]. The reduction is total: every
//! variant has a JSON form, and anything that cannot be expressed natively
//! (non-finite floats, opaque values, non-iterable iterables) falls back to
//! its text.

use std::fmt;

use serde_json::{Map, Number, Value};

use crate::model::{BoundingBox, LineRecord, LinkRecord, TableRecord, TableRegistry};

/// A value as handed over by an output view.
pub enum HostValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Sequence(Vec<HostValue>),
    /// Key/value pairs with arbitrary keys; keys are stringified on output.
    Mapping(Vec<(HostValue, HostValue)>),
    /// A record with named fields, emitted in field order.
    Object(Vec<(String, HostValue)>),
    /// A value that may be reducible to a sequence.
    Iterable(Box<dyn HostIterable>),
    /// A value with no structure beyond its text.
    Opaque(Box<dyn fmt::Display + Send + Sync>),
}

/// A value that can sometimes be enumerated.
pub trait HostIterable: fmt::Display + Send + Sync {
    /// The elements, or `None` when the value cannot be enumerated.
    fn items(&self) -> Option<Vec<HostValue>>;
}

/// Conversion of model types into [`HostValue`].
pub trait ToHostValue {
    fn to_host_value(&self) -> HostValue;
}

impl HostValue {
    /// Build an object from `(name, value)` pairs.
    pub fn object<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, HostValue)>,
        K: Into<String>,
    {
        HostValue::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn sequence<T: ToHostValue>(items: &[T]) -> Self {
        HostValue::Sequence(items.iter().map(ToHostValue::to_host_value).collect())
    }
}

impl fmt::Debug for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostValue::Null => f.write_str("Null"),
            HostValue::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            HostValue::Int(i) => f.debug_tuple("Int").field(i).finish(),
            HostValue::Float(x) => f.debug_tuple("Float").field(x).finish(),
            HostValue::Str(s) => f.debug_tuple("Str").field(s).finish(),
            HostValue::Sequence(items) => f.debug_tuple("Sequence").field(items).finish(),
            HostValue::Mapping(pairs) => f.debug_tuple("Mapping").field(pairs).finish(),
            HostValue::Object(fields) => f.debug_tuple("Object").field(fields).finish(),
            HostValue::Iterable(it) => write!(f, "Iterable({})", it),
            HostValue::Opaque(v) => write!(f, "Opaque({})", v),
        }
    }
}

impl From<bool> for HostValue {
    fn from(b: bool) -> Self {
        HostValue::Bool(b)
    }
}

impl From<i64> for HostValue {
    fn from(i: i64) -> Self {
        HostValue::Int(i)
    }
}

impl From<u32> for HostValue {
    fn from(i: u32) -> Self {
        HostValue::Int(i64::from(i))
    }
}

impl From<usize> for HostValue {
    fn from(i: usize) -> Self {
        HostValue::Int(i64::try_from(i).unwrap_or(i64::MAX))
    }
}

impl From<f64> for HostValue {
    fn from(x: f64) -> Self {
        HostValue::Float(x)
    }
}

impl From<f32> for HostValue {
    /// Widens through the shortest decimal form, so `12.1f32` stays `12.1`.
    fn from(x: f32) -> Self {
        HostValue::Float(x.to_string().parse().unwrap_or(f64::from(x)))
    }
}

impl From<&str> for HostValue {
    fn from(s: &str) -> Self {
        HostValue::Str(s.to_string())
    }
}

impl From<String> for HostValue {
    fn from(s: String) -> Self {
        HostValue::Str(s)
    }
}

/// Reduce a [`HostValue`] to JSON. Never fails.
pub fn to_json_value(value: &HostValue) -> Value {
    match value {
        HostValue::Null => Value::Null,
        HostValue::Bool(b) => Value::Bool(*b),
        HostValue::Int(i) => Value::Number(Number::from(*i)),
        HostValue::Float(x) => match Number::from_f64(*x) {
            Some(n) => Value::Number(n),
            None => Value::String(x.to_string()),
        },
        HostValue::Str(s) => Value::String(s.clone()),
        HostValue::Sequence(items) => Value::Array(items.iter().map(to_json_value).collect()),
        HostValue::Mapping(pairs) => {
            let mut map = Map::with_capacity(pairs.len());
            for (k, v) in pairs {
                map.insert(key_string(k), to_json_value(v));
            }
            Value::Object(map)
        }
        HostValue::Object(fields) => {
            let mut map = Map::with_capacity(fields.len());
            for (k, v) in fields {
                map.insert(k.clone(), to_json_value(v));
            }
            Value::Object(map)
        }
        HostValue::Iterable(it) => match it.items() {
            Some(items) => Value::Array(items.iter().map(to_json_value).collect()),
            None => Value::String(it.to_string()),
        },
        HostValue::Opaque(v) => Value::String(v.to_string()),
    }
}

fn key_string(key: &HostValue) -> String {
    match key {
        HostValue::Str(s) => s.clone(),
        HostValue::Null => "null".to_string(),
        HostValue::Bool(b) => b.to_string(),
        HostValue::Int(i) => i.to_string(),
        HostValue::Float(x) => x.to_string(),
        HostValue::Opaque(v) => v.to_string(),
        HostValue::Iterable(it) => it.to_string(),
        other => to_json_value(other).to_string(),
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x0, y0, x1, y1] = self.0;
        write!(f, "({}, {}, {}, {})", x0, y0, x1, y1)
    }
}

impl HostIterable for BoundingBox {
    fn items(&self) -> Option<Vec<HostValue>> {
        Some(self.0.iter().map(|v| HostValue::from(*v)).collect())
    }
}

impl ToHostValue for BoundingBox {
    fn to_host_value(&self) -> HostValue {
        HostValue::Iterable(Box::new(*self))
    }
}

impl ToHostValue for LineRecord {
    fn to_host_value(&self) -> HostValue {
        HostValue::object([
            ("text", HostValue::from(self.text.as_str())),
            ("font_size", self.font_size.into()),
            ("is_bold", self.is_bold.into()),
            ("page_num", self.page_num.into()),
            ("bbox", self.bbox.to_host_value()),
        ])
    }
}

impl ToHostValue for TableRecord {
    fn to_host_value(&self) -> HostValue {
        HostValue::object([
            ("table_id", HostValue::from(self.table_id.as_str())),
            ("bbox", self.bbox.to_host_value()),
        ])
    }
}

impl ToHostValue for LinkRecord {
    fn to_host_value(&self) -> HostValue {
        HostValue::object([
            ("target", HostValue::from(self.target.as_str())),
            ("bbox", self.bbox.to_host_value()),
            ("page_num", self.page_num.into()),
        ])
    }
}

impl ToHostValue for TableRegistry {
    fn to_host_value(&self) -> HostValue {
        let page_tables = self
            .page_table_map()
            .iter()
            .map(|(page, tables)| (HostValue::from(*page), HostValue::sequence(tables)))
            .collect();
        let page_links = self
            .page_link_map()
            .iter()
            .map(|(page, links)| (HostValue::from(*page), HostValue::sequence(links)))
            .collect();

        HostValue::object([
            ("tables", HostValue::sequence(self.tables())),
            ("page_table_map", HostValue::Mapping(page_tables)),
            ("links", HostValue::sequence(self.links())),
            ("page_link_map", HostValue::Mapping(page_links)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Cursor;

    impl fmt::Display for Cursor {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("<cursor>")
        }
    }

    impl HostIterable for Cursor {
        fn items(&self) -> Option<Vec<HostValue>> {
            None
        }
    }

    #[test]
    fn test_scalars() {
        assert_eq!(to_json_value(&HostValue::Null), Value::Null);
        assert_eq!(to_json_value(&true.into()), json!(true));
        assert_eq!(to_json_value(&HostValue::from(3u32)), json!(3));
        assert_eq!(to_json_value(&HostValue::from(12.1f32)), json!(12.1));
    }

    #[test]
    fn test_non_finite_float_becomes_text() {
        assert_eq!(to_json_value(&HostValue::Float(f64::INFINITY)), json!("inf"));
        assert_eq!(to_json_value(&HostValue::Float(f64::NAN)), json!("NaN"));
    }

    #[test]
    fn test_mapping_keys_stringified() {
        let value = HostValue::Mapping(vec![
            (HostValue::Int(0), HostValue::Str("a".into())),
            (HostValue::Bool(true), HostValue::Null),
            (
                HostValue::Sequence(vec![HostValue::Int(1)]),
                HostValue::Int(2),
            ),
        ]);
        assert_eq!(to_json_value(&value), json!({"0": "a", "true": null, "[1]": 2}));
    }

    #[test]
    fn test_iterable_and_opaque_fallbacks() {
        let bbox = BoundingBox::new(1.0, 2.0, 3.5, 4.0);
        assert_eq!(to_json_value(&bbox.to_host_value()), json!([1.0, 2.0, 3.5, 4.0]));
        assert_eq!(to_json_value(&HostValue::Iterable(Box::new(Cursor))), json!("<cursor>"));
        assert_eq!(to_json_value(&HostValue::Opaque(Box::new(Cursor))), json!("<cursor>"));
    }

    #[test]
    fn test_object_field_order() {
        let value = HostValue::object([("b", HostValue::Int(1)), ("a", HostValue::Int(2))]);
        let text = serde_json::to_string(&to_json_value(&value)).unwrap();
        assert_eq!(text, r#"{"b":1,"a":2}"#);
    }

    #[test]
    fn test_registry_shape() {
        let mut registry = TableRegistry::new();
        registry.register_table(1, [0.0, 0.0, 10.0, 10.0]);
        let value = to_json_value(&registry.to_host_value());
        assert_eq!(
            value,
            json!({
                "tables": [{"table_id": "page_1_table_0", "bbox": [0.0, 0.0, 10.0, 10.0]}],
                "page_table_map": {"1": [{"table_id": "page_1_table_0", "bbox": [0.0, 0.0, 10.0, 10.0]}]},
                "links": [],
                "page_link_map": {}
            })
        );
    }
}
