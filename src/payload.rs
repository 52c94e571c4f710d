//! Coercion of raw form values into the JSON payload posted to `/predict`.

use crate::form::FormFields;
use serde::Serialize;
use serde_json::{Map, Number, Value};

/// The one field sent as a boolean.
pub const BNPL_FIELD: &str = "bnpl_used";

/// Largest integer magnitude that survives a round trip through an f64.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A coerced form value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    Number(Number),
    Text(String),
}

impl From<FieldValue> for Value {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Bool(b) => Value::Bool(b),
            FieldValue::Number(n) => Value::Number(n),
            FieldValue::Text(s) => Value::String(s),
        }
    }
}

/// Applies the coercion rule to one field.
///
/// `bnpl_used` is `true` only for the exact string `"true"`. Any other field
/// becomes a number when its trimmed value parses fully as a finite float,
/// and stays the raw string otherwise.
pub fn coerce_field(name: &str, raw: &str) -> FieldValue {
    if name == BNPL_FIELD {
        return FieldValue::Bool(raw == "true");
    }

    match parse_number(raw) {
        Some(n) => FieldValue::Number(n),
        None => FieldValue::Text(raw.to_string()),
    }
}

fn parse_number(raw: &str) -> Option<Number> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let value: f64 = trimmed.parse().ok()?;
    if !value.is_finite() {
        return None;
    }

    // Integral values go out as JSON integers: 5000, not 5000.0.
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        return Some(Number::from(value as i64));
    }
    Number::from_f64(value)
}

/// The JSON object built from one form submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Payload(Map<String, Value>);

impl Payload {
    /// Coerces every field, in form order.
    ///
    /// A repeated name keeps the position of its first occurrence and the
    /// value of its last.
    pub fn from_fields(fields: &FormFields) -> Self {
        let mut map = Map::new();
        for (name, raw) in fields.iter() {
            map.insert(name.to_string(), coerce_field(name, raw).into());
        }
        Self(map)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Compact JSON text, as sent on the wire.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.0)
    }
}
