//! Parse statements given on the command line

use super::CliError;
use crate::output::{OutputFormat, render};
use crate::{Query, parse_query};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The statement to parse
    pub statement: String,
    /// Only validate syntax, don't print the query
    pub syntax_only: bool,
    /// How to print the parsed query
    pub format: OutputFormat,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Statement parsed, with the query rendered in the requested format
    Parsed { query: Query, rendered: String },
}

/// Joins shell words back into one statement.
///
/// With `prefix` set (the `select` subcommand), it is always prepended, so
/// `select select from c` asks for a field named `select`.
pub fn statement_from_words(words: &[String], prefix: Option<&str>) -> Option<String> {
    if words.iter().all(|w| w.trim().is_empty()) {
        return None;
    }
    let body = words.join(" ");
    match prefix {
        Some(p) => Some(format!("{} {}", p, body)),
        None => Some(body),
    }
}

/// Execute a selectql check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    if options.statement.trim().is_empty() {
        return Err(CliError::NoInput);
    }

    let query = parse_query(&options.statement)?;

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid);
    }

    let rendered = render(&query, options.format)?;
    Ok(CheckResult::Parsed { query, rendered })
}
