use serde_json::{Map, Number, Value};

use crate::foundation::error::{BarmillError, BarmillResult};

/// Caller-supplied rendering options, keyed by case-sensitive option name.
///
/// Values keep the loose typing callers hand in (query strings, JSON documents), so the
/// accessors below apply explicit coercion rules instead of requiring exact JSON types.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Options(Map<String, Value>);

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an options object from JSON text.
    pub fn from_json_str(s: &str) -> BarmillResult<Self> {
        let value: Value = serde_json::from_str(s)
            .map_err(|e| BarmillError::validation(format!("options json: {e}")))?;
        Self::from_value(value)
    }

    /// Accept a JSON object; anything else is rejected.
    pub fn from_value(value: Value) -> BarmillResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(BarmillError::validation(format!(
                "options must be a JSON object, got {other}"
            ))),
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Store a number; non-finite values are stored as `null`.
    pub fn set_number(&mut self, key: impl Into<String>, n: f64) {
        let value = Number::from_f64(n).map_or(Value::Null, Value::Number);
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy every entry of `other` over this record, replacing existing keys.
    pub fn merge_from(&mut self, other: &Options) {
        for (k, v) in other.iter() {
            self.0.insert(k.clone(), v.clone());
        }
    }

    /// Present and not `null`.
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.is_null())
    }

    pub fn truthy(&self, key: &str) -> bool {
        self.get(key).is_some_and(truthy)
    }

    /// Numeric value of `key`, if it has one.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(numeric)
    }

    /// Numeric value of `key` when it is also non-zero.
    pub fn nonzero_number(&self, key: &str) -> Option<f64> {
        self.number(key).filter(|n| *n != 0.0)
    }

    /// Textual value of a truthy option.
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).filter(|v| truthy(v)).map(text)
    }

    /// String value of `key` (no coercion).
    pub fn str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for Options {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for Options {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// `null`, `false`, `0`, `""` are falsy; everything else is truthy.
pub fn truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Numeric coercion: booleans are 1/0, strings are trimmed and parsed (empty is 0).
pub fn numeric(v: &Value) -> Option<f64> {
    let n = match v {
        Value::Number(n) => n.as_f64()?,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() { 0.0 } else { s.parse::<f64>().ok()? }
        }
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    n.is_finite().then_some(n)
}

pub fn text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/options/record.rs"]
mod tests;
