//! Syntax tree to filter object conversion.
//!
//! Field paths are split on `.` into nested single-key objects ending in an
//! operator key:
//!
//! ```text
//! user.role == 'admin'      {"user": {"role": {"$eq": "admin"}}}
//! a == 1 and not b == 2     {"$and": [{"a": {"$eq": 1}}, {"$not": {"b": {"$eq": 2}}}]}
//! ```
//!
//! Three clauses are rewritten instead of copied through:
//!
//! - `field ~ 'text'` becomes a regex anchored at the start, `^text`. A regex
//!   literal (`field ~ /text/`) is used exactly as written.
//! - `field == null` becomes `{"$exists": false}` and `field != null` becomes
//!   `{"$exists": true}`.
//! - `in` / `not-in` require an array literal.
//!
//! Regexes are passed through as [`Pattern`]s without being compiled. The
//! storage layer's engine decides what syntax it accepts; [`Pattern::compile`]
//! is there for callers that want to check against the `regex` crate.

use std::fmt;

use log::{debug, trace};

use crate::{
    ast::{ClauseValue, Literal, Node, Operator, Pattern},
    value::Value,
};

/// Errors raised while converting a syntax tree to a filter object.
///
/// Besides the array requirement of `in` / `not-in`, empty field path
/// segments are refused: `a..b` would otherwise nest under a `""` key that
/// no document field can match.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// `in` / `not-in` applied to a single value
    ExpectedArray {
        field: String,
        op: Operator,
        found: &'static str,
    },

    /// Field path with an empty segment (`a..b`, `.a`, `a.`)
    EmptyPathSegment { field: String },
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::ExpectedArray { field, op, found } => write!(
                f,
                "Expected array literal for {} on `{}`, found {}",
                op.tag(),
                field,
                found
            ),
            ConvertError::EmptyPathSegment { field } => {
                write!(f, "Field path `{}` contains an empty segment", field)
            }
        }
    }
}

impl std::error::Error for ConvertError {}

/// Operator key and operand at the end of a field path.
fn convert_leaf(field: &str, op: Operator, value: &ClauseValue) -> Result<Value, ConvertError> {
    let lit = match value {
        ClauseValue::List(items) => {
            let items = items.iter().cloned().map(Value::from).collect();
            return Ok(Value::object(op.tag(), Value::Array(items)));
        }
        ClauseValue::Literal(lit) => lit,
    };

    match (op, lit) {
        (Operator::Regex, Literal::String(text)) => {
            let pattern = Pattern::new(format!("^{}", text), "");
            Ok(Value::object(op.tag(), Value::Regex(pattern)))
        }
        (Operator::Eq, Literal::Null) => Ok(Value::object("$exists", Value::Boolean(false))),
        (Operator::Ne, Literal::Null) => Ok(Value::object("$exists", Value::Boolean(true))),
        (Operator::In | Operator::NotIn, other) => Err(ConvertError::ExpectedArray {
            field: field.to_string(),
            op,
            found: other.type_name(),
        }),
        (_, other) => Ok(Value::object(op.tag(), Value::from(other.clone()))),
    }
}

fn convert_clause(field: &str, op: Operator, value: &ClauseValue) -> Result<Value, ConvertError> {
    let segments: Vec<&str> = field.split('.').collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(ConvertError::EmptyPathSegment {
            field: field.to_string(),
        });
    }

    let leaf = convert_leaf(field, op, value)?;
    trace!("clause `{}` nests {} level(s)", field, segments.len());
    Ok(segments
        .iter()
        .rev()
        .fold(leaf, |inner, segment| Value::object(*segment, inner)))
}

fn convert_node(node: &Node) -> Result<Value, ConvertError> {
    match node {
        Node::Clause { field, op, value } => convert_clause(field, *op, value),
        Node::Group { op, children } => {
            let items = children
                .iter()
                .map(convert_node)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::object(op.tag(), Value::Array(items)))
        }
        Node::Not(inner) => Ok(Value::object("$not", convert_node(inner)?)),
    }
}

/// Convert a syntax tree into a filter object.
///
/// # Examples
///
/// ```
/// use filterql::{convert, parse, tokenize};
///
/// let tokens = tokenize("a.b.c in [1, 2, -3]").unwrap();
/// let filter = convert(&parse(&tokens, 0).unwrap()).unwrap();
/// assert_eq!(filter.to_string(), r#"{"a":{"b":{"c":{"$in":[1,2,-3]}}}}"#);
/// ```
pub fn convert(node: &Node) -> Result<Value, ConvertError> {
    let filter = convert_node(node)?;
    debug!("converted {} field reference(s)", node.fields().len());
    Ok(filter)
}
