//! Renderable table cell values.

use std::borrow::Cow;

/// A table cell as handed to the column negotiator.
///
/// Hosts decide how their data maps onto these variants; the core only ever
/// needs the display text (for width sampling and drawing).
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Free text.
    Text(String),
    /// A numeric value, rendered with `f64`'s `Display`.
    Number(f64),
    /// Missing value, rendered as the table's null symbol.
    Null,
}

impl CellValue {
    /// Text shown for this cell. `Null` renders as `null_symbol`.
    pub fn render<'a>(&'a self, null_symbol: &'a str) -> Cow<'a, str> {
        match self {
            CellValue::Text(text) => Cow::Borrowed(text.as_str()),
            CellValue::Number(n) => Cow::Owned(n.to_string()),
            CellValue::Null => Cow::Borrowed(null_symbol),
        }
    }

    /// Check if this is the null variant.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

impl From<&str> for CellValue {
    fn from(text: &str) -> Self {
        CellValue::Text(text.to_string())
    }
}

impl From<String> for CellValue {
    fn from(text: String) -> Self {
        CellValue::Text(text)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Null, Into::into)
    }
}

impl From<&serde_json::Value> for CellValue {
    fn from(value: &serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => CellValue::Null,
            Value::String(s) => CellValue::Text(s.clone()),
            Value::Number(n) => n
                .as_f64()
                .map_or_else(|| CellValue::Text(n.to_string()), CellValue::Number),
            Value::Bool(b) => CellValue::Text(b.to_string()),
            Value::Array(_) | Value::Object(_) => CellValue::Text(value.to_string()),
        }
    }
}
