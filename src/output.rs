//! JSON output for filter objects.
//!
//! This module renders a filter [`Value`] in compact or pretty-printed form.
//! Output is deterministic: object keys keep the order the converter built
//! them in, which for a given query is always the same.
//!
//! # Features
//!
//! - **Compact output** via [`to_json()`] - no whitespace, the form used by `Display`
//! - **Pretty output** via [`to_json_pretty()`] - 2-space indentation
//! - **Strict JSON** via [`to_serde_json()`] - a `serde_json::Value` for consumers
//!   that need standard JSON
//!
//! Regexes have no JSON form. The printers write them bare as `/pattern/flags`,
//! the way the query language spells them, while [`to_serde_json()`] turns them
//! into the string `"/pattern/flags"`.
//!
//! # Examples
//!
//! ```
//! use filterql::{Pattern, Value};
//! use filterql::output::{to_json, to_serde_json};
//!
//! let filter = Value::object("name", Value::object("$regex", Value::Regex(Pattern::new("^Jo", "i"))));
//!
//! assert_eq!(to_json(&filter), r#"{"name":{"$regex":/^Jo/i}}"#);
//! assert_eq!(to_serde_json(&filter).to_string(), r#"{"name":{"$regex":"/^Jo/i"}}"#);
//! ```

use crate::value::Value;

pub struct JsonPrinter {
    pretty: bool,
}

impl JsonPrinter {
    pub fn new(pretty: bool) -> Self {
        JsonPrinter { pretty }
    }

    pub fn print(&self, value: &Value) -> String {
        self.print_value(value, 0)
    }

    fn print_value(&self, value: &Value, indent: usize) -> String {
        match value {
            Value::Null => "null".to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Integer(n) => n.to_string(),
            Value::Float(n) => format!("{:?}", n),
            Value::String(s) => format!("\"{}\"", self.escape_string(s)),
            Value::Regex(p) => p.to_string(),
            Value::Array(arr) => self.print_array(arr, indent),
            Value::Object(obj) => self.print_object(obj, indent),
        }
    }

    fn print_array(&self, arr: &[Value], indent: usize) -> String {
        if arr.is_empty() {
            return "[]".to_string();
        }

        if self.pretty {
            let items: Vec<String> = arr
                .iter()
                .map(|v| {
                    format!(
                        "{}{}",
                        self.indent(indent + 1),
                        self.print_value(v, indent + 1)
                    )
                })
                .collect();
            format!("[\n{}\n{}]", items.join(",\n"), self.indent(indent))
        } else {
            let items: Vec<String> = arr.iter().map(|v| self.print_value(v, indent)).collect();
            format!("[{}]", items.join(","))
        }
    }

    fn print_object(&self, obj: &[(String, Value)], indent: usize) -> String {
        if obj.is_empty() {
            return "{}".to_string();
        }

        if self.pretty {
            let items: Vec<String> = obj
                .iter()
                .map(|(k, v)| {
                    format!(
                        "{}\"{}\": {}",
                        self.indent(indent + 1),
                        self.escape_string(k),
                        self.print_value(v, indent + 1)
                    )
                })
                .collect();
            format!("{{\n{}\n{}}}", items.join(",\n"), self.indent(indent))
        } else {
            let items: Vec<String> = obj
                .iter()
                .map(|(k, v)| format!("\"{}\":{}", self.escape_string(k), self.print_value(v, indent)))
                .collect();
            format!("{{{}}}", items.join(","))
        }
    }

    fn indent(&self, level: usize) -> String {
        "  ".repeat(level)
    }

    fn escape_string(&self, s: &str) -> String {
        s.chars()
            .flat_map(|c| match c {
                '"' => vec!['\\', '"'],
                '\\' => vec!['\\', '\\'],
                '\n' => vec!['\\', 'n'],
                '\r' => vec!['\\', 'r'],
                '\t' => vec!['\\', 't'],
                c if c.is_control() => format!("\\u{:04x}", c as u32).chars().collect(),
                c => vec![c],
            })
            .collect()
    }
}

/// Converts a filter to compact text.
///
/// ```
/// use filterql::parse_to_query;
/// use filterql::output::to_json;
///
/// let filter = parse_to_query("a.b == null").unwrap();
/// assert_eq!(to_json(&filter), r#"{"a":{"b":{"$exists":false}}}"#);
/// ```
pub fn to_json(value: &Value) -> String {
    JsonPrinter::new(false).print(value)
}

/// Converts a filter to text with 2-space indentation, one entry per line.
pub fn to_json_pretty(value: &Value) -> String {
    JsonPrinter::new(true).print(value)
}

/// Converts a filter to a standard JSON value.
///
/// Regexes become `"/pattern/flags"` strings and non-finite floats become
/// `null`.
pub fn to_serde_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Integer(i) => serde_json::Value::Number((*i).into()),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Regex(p) => serde_json::Value::String(p.to_string()),
        Value::Array(arr) => serde_json::Value::Array(arr.iter().map(to_serde_json).collect()),
        Value::Object(obj) => serde_json::Value::Object(
            obj.iter()
                .map(|(k, v)| (k.clone(), to_serde_json(v)))
                .collect(),
        ),
    }
}
