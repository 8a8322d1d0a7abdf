//! # selectql - Abstract Syntax Tree
//!
//! Types produced by the lexer and the query grammar.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Classified, positioned tokens produced by the lexer
//! - **[operators]** - Where-term comparison operators and sort directions
//! - **[query]** - The parsed statement handed to an execution layer
//!
//! ## Statement Shape
//!
//! ```text
//! select FIELDS from COLLECTION
//!     [where FIELD OP VALUE [and FIELD OP VALUE]...]
//!     [order by FIELD [asc|desc] [, FIELD [asc|desc]]...]
//!     [limit N]
//! ```
//!
//! `FIELDS` is a comma-separated list of field names, or `*` (also spelled
//! `all` so shells leave it alone) for every field.
//!
//! ## Examples
//!
//! ```text
//! select * from cities
//! select pop, nick from cities where pop > 3000
//! select StartedAt, NumProcessed from Namespaces/dev/Updates order by StartedAt desc
//! ```
pub mod operators;
pub mod query;
pub mod tokens;

pub use operators::{CompareOp, Direction};
pub use query::{Literal, Order, Query, Where};
pub use tokens::{Position, Token, TokenKind};
