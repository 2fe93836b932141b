use std::fmt;

use crate::ast::{Literal, Pattern};

/// A node of the filter object produced by the converter.
///
/// This mirrors JSON with two differences: integers and floats stay
/// distinct, and regexes are a value of their own so a storage layer can
/// hand them to its native regex operator.
///
/// Objects keep their keys in insertion order, so the same query always
/// renders the same way.
///
/// # Examples
///
/// ```
/// use filterql::Value;
///
/// // {"age": {"$gte": 18}}
/// let filter = Value::object("age", Value::object("$gte", Value::Integer(18)));
///
/// assert_eq!(filter.get("age").and_then(|v| v.get("$gte")), Some(&Value::Integer(18)));
/// assert_eq!(filter.to_string(), r#"{"age":{"$gte":18}}"#);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// JSON null
    Null,

    /// JSON boolean (true/false)
    Boolean(bool),

    /// Floating-point number
    Float(f64),

    /// Integer number (preserved separately from floats)
    Integer(i64),

    /// UTF-8 string
    String(String),

    /// Regex operand of `$regex`
    Regex(Pattern),

    /// Array of values, used by `$in`, `$nin`, `$and` and `$or`
    Array(Vec<Value>),

    /// Object with ordered string keys
    Object(Vec<(String, Value)>),
}

impl Value {
    /// Single-key object
    pub fn object(key: impl Into<String>, value: Value) -> Self {
        Value::Object(vec![(key.into(), value)])
    }

    /// Look up a key of an object
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(pairs) => pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Regex(_) => "regex",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl From<Literal> for Value {
    fn from(lit: Literal) -> Self {
        match lit {
            Literal::Null => Value::Null,
            Literal::Boolean(b) => Value::Boolean(b),
            Literal::Integer(n) => Value::Integer(n),
            Literal::Float(n) => Value::Float(n),
            Literal::String(s) => Value::String(s),
            Literal::Regex(p) => Value::Regex(p),
        }
    }
}

/// Compact rendering, see [`crate::output::to_json`].
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::output::to_json(self))
    }
}
