use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A scalar read from, or written to, a row field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Text used when the value is shown in a text cell or compared with
    /// select option values.
    pub fn display(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Text(s) => s.clone(),
        }
    }

    /// Truthiness used by checkbox cells.
    pub fn is_truthy(&self) -> bool {
        match self {
            CellValue::Empty => false,
            CellValue::Bool(b) => *b,
            CellValue::Number(n) => *n != 0.0 && !n.is_nan(),
            CellValue::Text(s) => !s.is_empty(),
        }
    }
}

impl From<&Value> for CellValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => CellValue::Empty,
            Value::Bool(b) => CellValue::Bool(*b),
            Value::Number(n) => n
                .as_f64()
                .map_or_else(|| CellValue::Text(n.to_string()), CellValue::Number),
            Value::String(s) => CellValue::Text(s.clone()),
            other => CellValue::Text(other.to_string()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

/// A host-defined row. The grid only reads fields by data-key; edits are
/// reported back to the host, never applied to the record.
pub trait RowRecord {
    /// Value of the field named `data_key`, or `None` when the record has
    /// no such field.
    fn field(&self, data_key: &str) -> Option<CellValue>;
}

impl RowRecord for Map<String, Value> {
    fn field(&self, data_key: &str) -> Option<CellValue> {
        self.get(data_key).map(CellValue::from)
    }
}

impl RowRecord for Value {
    fn field(&self, data_key: &str) -> Option<CellValue> {
        self.as_object().and_then(|map| map.field(data_key))
    }
}

impl<R: RowRecord + ?Sized> RowRecord for &R {
    fn field(&self, data_key: &str) -> Option<CellValue> {
        (**self).field(data_key)
    }
}
