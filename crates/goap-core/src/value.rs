//! Tagged scalar values for symbolic world state.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A concrete scalar held by a world state or written by an effect.
///
/// Equality is strict: a `Bool` never equals an `Int`, even for `true`/`1`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl Value {
    /// Short type tag used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Str(_) => "str",
        }
    }
}

impl fmt::Display for Value {
    /// Canonical encoding: booleans as `1`/`0`, integers in decimal,
    /// strings verbatim.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(true) => f.write_str("1"),
            Value::Bool(false) => f.write_str("0"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

/// A mask entry: either a required concrete value or "don't care".
///
/// `Any` appears only in preconditions and goals, never in states or
/// effects.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MaskValue {
    Any,
    Exact(Value),
}

impl MaskValue {
    pub fn is_any(&self) -> bool {
        matches!(self, MaskValue::Any)
    }

    pub fn exact(&self) -> Option<&Value> {
        match self {
            MaskValue::Any => None,
            MaskValue::Exact(v) => Some(v),
        }
    }
}

impl From<Value> for MaskValue {
    fn from(v: Value) -> Self {
        MaskValue::Exact(v)
    }
}

impl From<bool> for MaskValue {
    fn from(v: bool) -> Self {
        MaskValue::Exact(Value::Bool(v))
    }
}

impl From<i64> for MaskValue {
    fn from(v: i64) -> Self {
        MaskValue::Exact(Value::Int(v))
    }
}

impl From<i32> for MaskValue {
    fn from(v: i32) -> Self {
        MaskValue::Exact(Value::Int(v as i64))
    }
}

impl From<&str> for MaskValue {
    fn from(v: &str) -> Self {
        MaskValue::Exact(Value::Str(v.to_string()))
    }
}

impl From<String> for MaskValue {
    fn from(v: String) -> Self {
        MaskValue::Exact(Value::Str(v))
    }
}
