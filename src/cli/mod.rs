//! CLI support for filterql
//!
//! Provides programmatic access to the filterql CLI functionality for
//! embedding in other tools.

mod compile;
mod docs;

pub use compile::{CompileOptions, Emit, execute_check, execute_compile, list_fields};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// Query rejected by one of the pipeline stages
    Query(crate::Error),
    /// JSON serialization error
    Json(serde_json::Error),
    /// IO error
    Io(io::Error),
    /// No query provided
    NoInput,
    /// Unknown `--emit` mode
    UnknownEmit(String),
    /// Unknown documentation category
    UnknownCategory(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Query(e) => write!(f, "{}", e),
            CliError::Json(e) => write!(f, "JSON error: {}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::NoInput => write!(f, "No query provided. Pass it as an argument or pipe it to stdin."),
            CliError::UnknownEmit(mode) => write!(
                f,
                "Unknown emit mode: '{}' (expected tokens, ast, filter or json)",
                mode
            ),
            CliError::UnknownCategory(c) => {
                write!(f, "Unknown category: '{}'\nRun 'filterql docs' to see available categories.", c)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Query(e) => Some(e),
            CliError::Json(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<crate::Error> for CliError {
    fn from(e: crate::Error) -> Self {
        CliError::Query(e)
    }
}

impl From<crate::LexError> for CliError {
    fn from(e: crate::LexError) -> Self {
        CliError::Query(e.into())
    }
}

impl From<crate::ParseError> for CliError {
    fn from(e: crate::ParseError) -> Self {
        CliError::Query(e.into())
    }
}

impl From<crate::ConvertError> for CliError {
    fn from(e: crate::ConvertError) -> Self {
        CliError::Query(e.into())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}
