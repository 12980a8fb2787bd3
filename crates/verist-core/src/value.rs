//! # Value-Kind Discrimination & Deep Equivalence
//!
//! The engine consumes an already-parsed `serde_json::Value` tree; this
//! module is the thin adapter over it. `ValueKind` partitions values
//! into the seven JSON Schema simple types — note that `integer` and
//! `number` overlap: every JSON number is a `number`, and it is also an
//! `integer` when exactly representable as a 64-bit signed integer.
//!
//! Deep equivalence is structural JSON equality that ignores numeric
//! representation: `17` and `17.0` are equivalent, object member order
//! is irrelevant, arrays compare element-wise.

use serde_json::Value;

/// The seven JSON Schema simple types, in canonical trial order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Array,
    Boolean,
    Integer,
    Null,
    Number,
    Object,
    String,
}

impl ValueKind {
    /// All kinds in the canonical trial order used by the matcher.
    pub const CANONICAL: [ValueKind; 7] = [
        ValueKind::Array,
        ValueKind::Boolean,
        ValueKind::Integer,
        ValueKind::Null,
        ValueKind::Number,
        ValueKind::Object,
        ValueKind::String,
    ];

    /// The keyword-surface name of this kind (`"integer"`, ...).
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Array => "array",
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Null => "null",
            ValueKind::Number => "number",
            ValueKind::Object => "object",
            ValueKind::String => "string",
        }
    }

    /// Parses a keyword-surface type name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "array" => Some(ValueKind::Array),
            "boolean" => Some(ValueKind::Boolean),
            "integer" => Some(ValueKind::Integer),
            "null" => Some(ValueKind::Null),
            "number" => Some(ValueKind::Number),
            "object" => Some(ValueKind::Object),
            "string" => Some(ValueKind::String),
            _ => None,
        }
    }

    /// True if `value` is of this kind.
    ///
    /// `Integer` requires the number to be exactly representable as an
    /// `i64`; `Number` accepts any JSON number.
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            ValueKind::Array => value.is_array(),
            ValueKind::Boolean => value.is_boolean(),
            ValueKind::Integer => value.as_i64().is_some(),
            ValueKind::Null => value.is_null(),
            ValueKind::Number => value.is_number(),
            ValueKind::Object => value.is_object(),
            ValueKind::String => value.is_string(),
        }
    }
}

/// Structural JSON equality ignoring numeric representation.
///
/// Two numbers are equivalent when their `f64` readings are equal, so
/// `17` ≡ `17.0`. Everything else is kind-wise structural equality.
pub fn deep_equivalent(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(p), Some(q)) => p == q,
            _ => x == y,
        },
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(p, q)| deep_equivalent(p, q))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter().all(|(key, p)| match y.get(key) {
                    Some(q) => deep_equivalent(p, q),
                    None => false,
                })
        }
        _ => false,
    }
}
