//! State values: the plain JSON properties of a resource.

use crate::error::{HalError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;

/// The JSON kind a [`StateValue`] was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// JSON string
    String,
    /// JSON number without fraction or exponent
    Integer,
    /// Any other JSON number
    Float,
    /// `true` or `false`
    Boolean,
    /// JSON object
    Object,
    /// JSON array
    Array,
    /// `null`
    Null,
}

impl ValueKind {
    /// Classify a parsed JSON value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::String(_) => ValueKind::String,
            Value::Number(n) => {
                if n.to_string().contains(|c| matches!(c, '.' | 'e' | 'E')) {
                    ValueKind::Float
                } else {
                    ValueKind::Integer
                }
            }
            Value::Bool(_) => ValueKind::Boolean,
            Value::Object(_) => ValueKind::Object,
            Value::Array(_) => ValueKind::Array,
            Value::Null => ValueKind::Null,
        }
    }

    /// The type tag label, e.g. `"integer"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Boolean => "boolean",
            ValueKind::Object => "object",
            ValueKind::Array => "array",
            ValueKind::Null => "null",
        }
    }

    /// Whether the raw text of this kind is a JSON document of its own.
    pub fn is_structured(&self) -> bool {
        matches!(self, ValueKind::Object | ValueKind::Array)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single non-link, non-embedded property of a resource.
///
/// The raw text is kept exactly as it appeared in the document: numbers are
/// not renormalized (`30.00` stays `30.00`) and date-like strings are not
/// reinterpreted. Objects and arrays are stored as pretty-printed JSON.
///
/// # Examples
///
/// ```
/// use hal_client::{HalParser, ValueKind};
///
/// let root = HalParser::new().parse(r#"{"total": 30.00, "currency": "USD"}"#).unwrap();
/// let total = root.state_value("total").unwrap();
/// assert_eq!(total.raw(), "30.00");
/// assert_eq!(total.kind(), ValueKind::Float);
/// assert_eq!(total.parse::<f64>().unwrap(), 30.0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateValue {
    name: String,
    raw: String,
    kind: ValueKind,
}

impl StateValue {
    /// Create a state value. Fails if `name` is empty.
    pub fn new(name: impl Into<String>, raw: impl Into<String>, kind: ValueKind) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(HalError::InvalidArgument(
                "state value name must not be empty".into(),
            ));
        }

        Ok(StateValue {
            name,
            raw: raw.into(),
            kind,
        })
    }

    /// Build a state value from a parsed JSON property.
    pub(crate) fn from_json(name: &str, value: &Value) -> Result<Self> {
        let kind = ValueKind::of(value);
        let raw = match value {
            Value::String(s) => s.clone(),
            Value::Object(_) | Value::Array(_) => serde_json::to_string_pretty(value)?,
            // arbitrary_precision keeps the source token for numbers
            other => other.to_string(),
        };
        StateValue::new(name, raw, kind)
    }

    /// Property name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw textual value.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// JSON kind of the original value.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Type tag label of the original value.
    pub fn type_tag(&self) -> &'static str {
        self.kind.as_str()
    }

    /// Deserialize the raw value into `T`.
    ///
    /// String values are handed to `T` as JSON strings; every other kind is
    /// parsed from its raw JSON text.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T> {
        let value = match self.kind {
            ValueKind::String => Value::String(self.raw.clone()),
            _ => serde_json::from_str(&self.raw)?,
        };
        Ok(serde_json::from_value(value)?)
    }
}

impl fmt::Display for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
