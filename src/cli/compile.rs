//! Compile filter queries for the CLI

use log::info;

use super::CliError;
use crate::{convert, output, parse, tokenize};

/// What `compile` prints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Emit {
    /// Token stream, one per line
    Tokens,
    /// Syntax tree
    Ast,
    /// Filter object with bare regexes
    #[default]
    Filter,
    /// Filter object as strict JSON
    Json,
}

impl Emit {
    /// Parse emit mode from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tokens" | "lex" => Some(Self::Tokens),
            "ast" | "tree" => Some(Self::Ast),
            "filter" => Some(Self::Filter),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Options for the compile command
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// The filter query to compile
    pub query: String,
    /// Stage output to print
    pub emit: Emit,
    /// Pretty-print the output
    pub pretty: bool,
}

/// Run the pipeline up to the requested stage and render its output
pub fn execute_compile(options: &CompileOptions) -> Result<String, CliError> {
    let tokens = tokenize(&options.query)?;

    if options.emit == Emit::Tokens {
        let lines: Vec<String> = tokens
            .iter()
            .map(|token| format!("{:<12} {}", token.kind(), token))
            .collect();
        return Ok(lines.join("\n"));
    }

    let root = parse(&tokens, 0)?;

    if options.emit == Emit::Ast {
        return Ok(if options.pretty {
            format!("{:#?}", root)
        } else {
            root.to_string()
        });
    }

    let filter = convert(&root)?;
    info!("compiled {} field reference(s)", root.fields().len());

    match (options.emit, options.pretty) {
        (Emit::Json, true) => Ok(serde_json::to_string_pretty(&output::to_serde_json(&filter))?),
        (Emit::Json, false) => Ok(serde_json::to_string(&output::to_serde_json(&filter))?),
        (_, true) => Ok(output::to_json_pretty(&filter)),
        (_, false) => Ok(output::to_json(&filter)),
    }
}

/// Validate a query through all three stages without printing the filter
pub fn execute_check(query: &str) -> Result<(), CliError> {
    let tokens = tokenize(query)?;
    let root = parse(&tokens, 0)?;
    convert(&root)?;
    Ok(())
}

/// Field paths a query references, in order, without duplicates
pub fn list_fields(query: &str) -> Result<Vec<String>, CliError> {
    let tokens = tokenize(query)?;
    let root = parse(&tokens, 0)?;

    let mut fields: Vec<String> = Vec::new();
    for field in root.fields() {
        if !fields.iter().any(|f| f == field) {
            fields.push(field.to_string());
        }
    }
    Ok(fields)
}
