use std::{
    cmp::Ordering,
    fmt::{Display, Formatter},
};

use serde::Serialize;

/// Represents different types allowed as record attribute values
#[derive(Debug, PartialEq, Clone, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Float(f64),
    Integer(i64),
}

impl Value {
    /// Compares this value with another one. Integers and floats compare
    /// numerically. A string compared with a number is parsed as a number
    /// first and is not comparable if it does not hold one.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            (Value::String(s), n) => parse_number(s)?.compare(n),
            (n, Value::String(s)) => n.compare(&parse_number(s)?),
            (a, b) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::String(_) => None,
        }
    }
}

/// Interprets a string attribute as an integer or a finite float
fn parse_number(s: &str) -> Option<Value> {
    let s = s.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Some(Value::Integer(i));
    }
    s.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(Value::Float)
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Float(v) => write!(f, "{v}"),
            Value::Integer(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use super::Value;

    #[test]
    fn compare_same_type() {
        assert_eq!(Value::from(10).compare(&Value::from(25)), Some(Ordering::Less));
        assert_eq!(
            Value::from(443.2).compare(&Value::from(240.0)),
            Some(Ordering::Greater)
        );
        assert_eq!(
            Value::from("Doe").compare(&Value::from("Doe")),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn compare_numbers() {
        assert_eq!(
            Value::from(1931).compare(&Value::from(1931.0)),
            Some(Ordering::Equal)
        );
        assert_eq!(Value::from(10).compare(&Value::from(5.5)), Some(Ordering::Greater));
        assert_eq!(Value::from(14.9).compare(&Value::from(15)), Some(Ordering::Less));
        assert_eq!(Value::from(f64::NAN).compare(&Value::from(1)), None);
    }

    #[test]
    fn compare_numeric_strings() {
        assert_eq!(Value::from("10").compare(&Value::from(5)), Some(Ordering::Greater));
        assert_eq!(Value::from(" 10 ").compare(&Value::from(15.0)), Some(Ordering::Less));
        assert_eq!(Value::from(1931).compare(&Value::from("1931")), Some(Ordering::Equal));
        assert_eq!(Value::from("ten").compare(&Value::from(10)), None);
        assert_eq!(Value::from("NaN").compare(&Value::from(10)), None);

        // strings compare with each other as text
        assert_eq!(Value::from("10").compare(&Value::from("9")), Some(Ordering::Less));
    }

    #[test]
    fn serialize() {
        assert_eq!(
            serde_json::to_value(Value::from("John Doe")).unwrap(),
            serde_json::json!("John Doe")
        );
        assert_eq!(
            serde_json::to_value(Value::from(20)).unwrap(),
            serde_json::json!(20)
        );
    }
}
