pub mod ast;
pub mod cli;
pub mod converter;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod value;

pub use ast::{ClauseValue, Connective, Literal, Node, Operator, Pattern, Token};
pub use converter::{ConvertError, convert};
pub use lexer::{LexError, Lexer, Position, tokenize};
pub use output::{to_json, to_json_pretty, to_serde_json};
pub use parser::{MAX_NESTING_DEPTH, ParseError, Parser, parse};
pub use pipeline::{Error, parse_to_query};
pub use value::Value;
