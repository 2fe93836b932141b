use std::fmt;

use crate::ast::{Connective, Literal, Operator};

/// Right-hand side of a clause.
#[derive(Debug, Clone, PartialEq)]
pub enum ClauseValue {
    /// Single literal
    Literal(Literal),

    /// Bracketed literal list, the value of `in` / `not-in`
    ///
    /// # Example
    /// ```text
    /// ['admin', 'root']
    /// ```
    List(Vec<Literal>),
}

impl fmt::Display for ClauseValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClauseValue::Literal(lit) => write!(f, "{}", lit),
            ClauseValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Abstract Syntax Tree node for a parsed filter expression.
///
/// A finished tree upholds two shape rules the parser guarantees:
/// every `Group` has at least two children, and a `Group` never directly
/// contains another `Group` with the same connective.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Leaf comparison
    ///
    /// # Examples
    /// ```text
    /// user.role == 'admin'
    /// tags in ['a', 'b']
    /// ```
    Clause {
        field: String,
        op: Operator,
        value: ClauseValue,
    },

    /// N-ary boolean combination
    ///
    /// # Example
    /// ```text
    /// a == 1 and b == 2 and c == 3
    /// ```
    Group {
        op: Connective,
        children: Vec<Node>,
    },

    /// Negation of a single sub-node
    Not(Box<Node>),
}

impl Node {
    pub fn clause(field: impl Into<String>, op: Operator, value: ClauseValue) -> Self {
        Node::Clause {
            field: field.into(),
            op,
            value,
        }
    }

    /// Field paths referenced by the tree, in source order.
    pub fn fields(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_fields(&mut out);
        out
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Node::Clause { field, .. } => out.push(field),
            Node::Group { children, .. } => {
                for child in children {
                    child.collect_fields(out);
                }
            }
            Node::Not(inner) => inner.collect_fields(out),
        }
    }

    /// Nesting depth, a lone clause is 1.
    pub fn depth(&self) -> usize {
        match self {
            Node::Clause { .. } => 1,
            Node::Group { children, .. } => {
                1 + children.iter().map(Node::depth).max().unwrap_or(0)
            }
            Node::Not(inner) => 1 + inner.depth(),
        }
    }
}

/// Renders canonical query text that parses back to the same tree.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Clause { field, op, value } => write!(f, "{} {} {}", field, op, value),
            Node::Group { op, children } => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " {} ", op)?;
                    }
                    // `and` binds tighter, so only an `or` below an `and` needs parens
                    match (op, child) {
                        (
                            Connective::And,
                            Node::Group {
                                op: Connective::Or,
                                ..
                            },
                        ) => write!(f, "({})", child)?,
                        _ => write!(f, "{}", child)?,
                    }
                }
                Ok(())
            }
            Node::Not(inner) => match inner.as_ref() {
                Node::Group { .. } => write!(f, "not ({})", inner),
                _ => write!(f, "not {}", inner),
            },
        }
    }
}
