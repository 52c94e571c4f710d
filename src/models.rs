use crate::errors::AppError;
use serde::Deserialize;
use serde_json::{Number, Value};
use std::fmt;

/// Score returned by the prediction endpoint, a number or free text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CreditScore {
    Number(Number),
    Text(String),
}

impl fmt::Display for CreditScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreditScore::Number(n) => {
                if let Some(i) = n.as_i64() {
                    write!(f, "{}", i)
                } else if let Some(u) = n.as_u64() {
                    write!(f, "{}", u)
                } else {
                    // 720.0 prints as 720, 651.37 as 651.37
                    write!(f, "{}", n.as_f64().unwrap_or_default())
                }
            }
            CreditScore::Text(s) => f.write_str(s),
        }
    }
}

/// Parsed `/predict` response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredictionResult {
    pub credit_score: CreditScore,
    pub suggestions: Vec<String>,
}

impl PredictionResult {
    /// Extracts the result from an already-parsed JSON body.
    ///
    /// Unknown fields are ignored.
    pub fn from_value(value: Value) -> Result<Self, AppError> {
        if !value.is_object() {
            return Err(AppError::MissingField(format!(
                "expected a JSON object, got {}",
                json_kind(&value)
            )));
        }
        for field in ["credit_score", "suggestions"] {
            if value.get(field).is_none() {
                return Err(AppError::MissingField(format!("'{}' is absent", field)));
            }
        }
        serde_json::from_value(value).map_err(|e| AppError::MissingField(e.to_string()))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// HTML written into the two output regions for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub result_html: String,
    pub suggestions_html: String,
}
