use std::fmt;

use log::debug;

use crate::{
    converter::{ConvertError, convert},
    lexer::{LexError, tokenize},
    parser::{ParseError, parse},
    value::Value,
};

/// Any failure of [`parse_to_query`], tagged with the stage that raised it.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Lex(LexError),
    Parse(ParseError),
    Convert(ConvertError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Lex(e) => write!(f, "Lex error: {}", e),
            Error::Parse(e) => write!(f, "Parse error: {}", e),
            Error::Convert(e) => write!(f, "Conversion error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Lex(e) => Some(e),
            Error::Parse(e) => Some(e),
            Error::Convert(e) => Some(e),
        }
    }
}

impl From<LexError> for Error {
    fn from(e: LexError) -> Self {
        Error::Lex(e)
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::Parse(e)
    }
}

impl From<ConvertError> for Error {
    fn from(e: ConvertError) -> Self {
        Error::Convert(e)
    }
}

/// Compile a filter expression into a filter object.
///
/// Runs the lexer, parser and converter in turn. Any stage failing rejects
/// the whole query; there is no partial result.
///
/// # Examples
///
/// ```
/// use filterql::parse_to_query;
///
/// let filter = parse_to_query("A == 5 and NOT B == 6").unwrap();
/// assert_eq!(
///     filter.to_string(),
///     r#"{"$and":[{"A":{"$eq":5}},{"$not":{"B":{"$eq":6}}}]}"#
/// );
///
/// assert!(parse_to_query("a.b.c in 5").is_err());
/// ```
pub fn parse_to_query(text: &str) -> Result<Value, Error> {
    debug!("compiling query {:?}", text);
    let tokens = tokenize(text)?;
    let root = parse(&tokens, 0)?;
    Ok(convert(&root)?)
}
