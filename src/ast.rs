//! # Filter Query Language - Abstract Syntax Tree
//!
//! This module defines the tokens and syntax tree for filter expressions,
//! small human-writable boolean queries over dotted field paths that compile
//! into nested filter objects for a storage query layer.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[literal]** - Literal values (strings, numbers, booleans, null, regexes)
//! - **[operators]** - Comparison operators and boolean connectives
//! - **[nodes]** - Syntax tree nodes built by the parser
//!
//! ## Quick Start
//!
//! ```text
//! user.role in ['admin', 'root'] && (user.address.state == 'VA' || user.address.city == 'Springfield')
//! ```
//!
//! ## Core Concepts
//!
//! ### Clauses
//!
//! Every comparison has the shape `field operator value`:
//!
//! ```text
//! age >= 18
//! name ~ 'Jo'
//! status not-in ['banned', 'deleted']
//! ```
//!
//! ### Precedence
//!
//! `not` binds tightest, then `and`, then `or`. Parentheses override:
//!
//! ```text
//! a == 1 and b == 2 or c == 3      // (a and b) or c
//! a == 1 and (b == 2 or c == 3)
//! ```
//!
//! Chains of the same connective are flattened into one n-ary group, so
//! `a and b and c` is a single group with three children.
//!
//! ### Field Paths
//!
//! Dotted identifiers address nested fields. `user.address.city` becomes
//! `{"user": {"address": {"city": ...}}}` in the filter object.
pub mod literal;
pub mod nodes;
pub mod operators;
pub mod tokens;

pub use literal::{Literal, Pattern};
pub use nodes::{ClauseValue, Node};
pub use operators::{Connective, Operator};
pub use tokens::Token;
