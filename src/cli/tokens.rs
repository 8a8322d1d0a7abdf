//! Dump the token stream of a statement

use super::CliError;
use crate::{Token, tokenize};

/// One line per token: position, kind and text.
pub fn describe_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| format!("{:<6} {:<12} {}", t.position.to_string(), t.kind.to_string(), t.text))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn execute_tokens(statement: &str) -> Result<String, CliError> {
    let tokens = tokenize(statement)?;
    Ok(describe_tokens(&tokens))
}
