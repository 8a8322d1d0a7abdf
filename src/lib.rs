pub mod ast;
pub mod cli;
pub mod grammar;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod value;

pub use ast::{CompareOp, Direction, Literal, Order, Position, Query, Token, TokenKind, Where};
pub use grammar::{parse_query, parse_tokens};
pub use lexer::{LexError, Lexer, tokenize};
pub use output::{OutputFormat, to_json, to_json_pretty};
pub use parser::{Failure, Found, ParseError, Parser, State};
pub use value::Value;
