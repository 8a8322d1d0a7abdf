//! Rendering of parsed queries.
//!
//! A [`Query`] can be printed three ways:
//!
//! - **Compact JSON** via [`to_json()`] - one line, for piping into other tools
//! - **Pretty JSON** via [`to_json_pretty()`] - 2-space indentation
//! - **Text** - the canonical statement from `Query`'s `Display`
//!
//! JSON keys follow the struct fields: `selects`, `coll`, `wheres`, `orders`
//! and `limit`. Operators appear as their symbols and directions as
//! `asc`/`desc`.
//!
//! # Examples
//!
//! ```
//! use selectql::output::to_json;
//! use selectql::Query;
//!
//! let q = Query::new("cities");
//! assert_eq!(
//!     to_json(&q).unwrap(),
//!     r#"{"selects":[],"coll":"cities","wheres":[],"orders":[],"limit":null}"#
//! );
//! ```

use crate::ast::Query;

/// How a query is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    /// Single-line JSON
    #[default]
    Json,
    /// Indented JSON
    Pretty,
    /// Canonical statement text
    Text,
}

pub fn to_json(query: &Query) -> serde_json::Result<String> {
    serde_json::to_string(query)
}

pub fn to_json_pretty(query: &Query) -> serde_json::Result<String> {
    serde_json::to_string_pretty(query)
}

pub fn render(query: &Query, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => to_json(query),
        OutputFormat::Pretty => to_json_pretty(query),
        OutputFormat::Text => Ok(query.to_string()),
    }
}
