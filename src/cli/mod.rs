//! CLI support for selectql
//!
//! Provides programmatic access to the `selectql` subcommands so they can be
//! embedded in other tools and tested without spawning a process.

mod check;
mod docs;
mod tokens;

pub use check::{CheckOptions, CheckResult, execute_check, statement_from_words};
pub use docs::get_syntax_doc;
pub use tokens::{describe_tokens, execute_tokens};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Parser error
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),
    /// Lexer error
    #[error("Lex error: {0}")]
    Lex(#[from] crate::LexError),
    /// JSON rendering error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// No statement provided
    #[error("No statement provided. Pass it as arguments or pipe it to stdin.")]
    NoInput,
}
