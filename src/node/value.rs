//! Typed value storage and cross-type coercion.
//!
//! Every node holds exactly one [`Value`]: nothing, a scalar, or a
//! fixed-length array of one of the supported types. The variant itself
//! carries the cardinality, so there is no way to read an array payload
//! through a scalar view or vice versa.

use serde::{Deserialize, Serialize};

/// Wire-level type tag for a value.
///
/// **Public** - used by the binary codec and by diff error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeTag {
    Null,
    Int,
    Float,
    Str,
}

impl TypeTag {
    /// Encode the tag as its single-byte wire representation
    pub fn as_byte(self) -> u8 {
        match self {
            TypeTag::Null => 0,
            TypeTag::Int => 1,
            TypeTag::Float => 2,
            TypeTag::Str => 3,
        }
    }

    /// Decode a wire byte back into a tag
    ///
    /// # Returns
    /// `None` for bytes outside the documented 0..=3 range
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(TypeTag::Null),
            1 => Some(TypeTag::Int),
            2 => Some(TypeTag::Float),
            3 => Some(TypeTag::Str),
            _ => None,
        }
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TypeTag::Null => "null",
            TypeTag::Int => "int64",
            TypeTag::Float => "float64",
            TypeTag::Str => "string",
        };
        f.write_str(name)
    }
}

/// Tagged payload of a node: empty, scalar, or fixed-length array.
///
/// Arrays must be non-empty; a count of zero is only valid for `Null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Int(i64),
    IntArray(Vec<i64>),
    Float(f64),
    FloatArray(Vec<f64>),
    Str(String),
    StrArray(Vec<String>),
}

impl Value {
    /// The type tag shared by the scalar and array form of each type
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Null => TypeTag::Null,
            Value::Int(_) | Value::IntArray(_) => TypeTag::Int,
            Value::Float(_) | Value::FloatArray(_) => TypeTag::Float,
            Value::Str(_) | Value::StrArray(_) => TypeTag::Str,
        }
    }

    /// Number of values held: 0 for `Null`, 1 for scalars, array length otherwise
    pub fn count(&self) -> usize {
        match self {
            Value::Null => 0,
            Value::Int(_) | Value::Float(_) | Value::Str(_) => 1,
            Value::IntArray(v) => v.len(),
            Value::FloatArray(v) => v.len(),
            Value::StrArray(v) => v.len(),
        }
    }

    /// Whether this value is stored in array form
    pub fn is_array(&self) -> bool {
        matches!(
            self,
            Value::IntArray(_) | Value::FloatArray(_) | Value::StrArray(_)
        )
    }

    /// Read the value as a signed 64-bit integer, coercing across types.
    ///
    /// Floats truncate, strings parse their leading numeric prefix
    /// (non-numeric strings read as 0), `Null` reads as 0. Arrays read
    /// their first element.
    pub fn as_i64(&self) -> i64 {
        match self {
            Value::Null => 0,
            Value::Int(v) => *v,
            Value::IntArray(v) => v.first().copied().unwrap_or(0),
            Value::Float(v) => *v as i64,
            Value::FloatArray(v) => v.first().copied().unwrap_or(0.0) as i64,
            Value::Str(s) => parse_int_prefix(s),
            Value::StrArray(v) => v.first().map(|s| parse_int_prefix(s)).unwrap_or(0),
        }
    }

    /// Read the value as a 64-bit float, coercing across types.
    ///
    /// Same conversion rules as [`Value::as_i64`], widening integers.
    pub fn as_f64(&self) -> f64 {
        match self {
            Value::Null => 0.0,
            Value::Int(v) => *v as f64,
            Value::IntArray(v) => v.first().copied().unwrap_or(0) as f64,
            Value::Float(v) => *v,
            Value::FloatArray(v) => v.first().copied().unwrap_or(0.0),
            Value::Str(s) => parse_float_prefix(s),
            Value::StrArray(v) => v.first().map(|s| parse_float_prefix(s)).unwrap_or(0.0),
        }
    }

    /// Read the value as a string, coercing across types.
    ///
    /// Numbers format themselves, `Null` reads as the empty string and
    /// arrays read their first element.
    pub fn as_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Int(v) => v.to_string(),
            Value::IntArray(v) => v.first().map(|v| v.to_string()).unwrap_or_default(),
            Value::Float(v) => v.to_string(),
            Value::FloatArray(v) => v.first().map(|v| v.to_string()).unwrap_or_default(),
            Value::Str(s) => s.clone(),
            Value::StrArray(v) => v.first().cloned().unwrap_or_default(),
        }
    }

    /// View an int-typed value as a slice.
    ///
    /// # Panics
    /// If the stored type is not int64. Asking for the wrong typed view is
    /// a caller bug, not a recoverable condition.
    pub fn int_slice(&self) -> &[i64] {
        match self {
            Value::Int(v) => std::slice::from_ref(v),
            Value::IntArray(v) => v,
            other => panic!("int slice requested on {} value", other.type_tag()),
        }
    }

    /// View a float-typed value as a slice.
    ///
    /// # Panics
    /// If the stored type is not float64.
    pub fn float_slice(&self) -> &[f64] {
        match self {
            Value::Float(v) => std::slice::from_ref(v),
            Value::FloatArray(v) => v,
            other => panic!("float slice requested on {} value", other.type_tag()),
        }
    }

    /// View a string-typed value as a slice.
    ///
    /// # Panics
    /// If the stored type is not string.
    pub fn str_slice(&self) -> &[String] {
        match self {
            Value::Str(v) => std::slice::from_ref(v),
            Value::StrArray(v) => v,
            other => panic!("string slice requested on {} value", other.type_tag()),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
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

impl From<Vec<i64>> for Value {
    fn from(v: Vec<i64>) -> Self {
        assert!(!v.is_empty(), "array values must be non-empty");
        Value::IntArray(v)
    }
}

impl From<&[i64]> for Value {
    fn from(v: &[i64]) -> Self {
        Value::from(v.to_vec())
    }
}

impl From<Vec<f64>> for Value {
    fn from(v: Vec<f64>) -> Self {
        assert!(!v.is_empty(), "array values must be non-empty");
        Value::FloatArray(v)
    }
}

impl From<&[f64]> for Value {
    fn from(v: &[f64]) -> Self {
        Value::from(v.to_vec())
    }
}

impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Self {
        assert!(!v.is_empty(), "array values must be non-empty");
        Value::StrArray(v)
    }
}

impl From<&[&str]> for Value {
    fn from(v: &[&str]) -> Self {
        Value::from(v.iter().map(|s| s.to_string()).collect::<Vec<_>>())
    }
}

/// Parse the leading integer prefix of a string, C `atoll` style.
///
/// Leading whitespace and an optional sign are consumed, then the longest
/// run of digits. Anything else yields 0.
pub(crate) fn parse_int_prefix(s: &str) -> i64 {
    let t = s.trim_start();
    let (negative, rest) = match t.strip_prefix('-') {
        Some(r) => (true, r),
        None => (false, t.strip_prefix('+').unwrap_or(t)),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let magnitude: i64 = rest[..end].parse().unwrap_or(0);
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Parse the leading float prefix of a string, C `atof` style.
///
/// Tries successively shorter prefixes until one parses; a string with no
/// numeric prefix yields 0.0.
pub(crate) fn parse_float_prefix(s: &str) -> f64 {
    let t = s.trim_start();
    for end in (1..=t.len()).rev() {
        if !t.is_char_boundary(end) {
            continue;
        }
        if let Ok(v) = t[..end].parse::<f64>() {
            return v;
        }
    }
    0.0
}
