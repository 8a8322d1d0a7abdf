use std::fmt;

use serde::Serialize;

/// Location of a token's first character in the source statement.
///
/// `offset` counts characters, not bytes. `line` and `column` are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn start() -> Self {
        Position {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Lexical class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Word made of letters, digits and underscores, starting with a letter or underscore
    ///
    /// Keywords are identifiers too; the grammar matches them by text.
    ///
    /// # Examples
    /// ```text
    /// select
    /// pop
    /// _internal
    /// ```
    Identifier,

    /// Word that also contains `-` or `/`
    ///
    /// # Examples
    /// ```text
    /// Namespaces/dev/Updates
    /// user-events
    /// ```
    Path,

    /// Integer or decimal number, optionally negative
    ///
    /// # Examples
    /// ```text
    /// 3000
    /// -12
    /// 2.5
    /// ```
    Number,

    /// Comparison operator: `==`, `=`, `>`, `>=`, `<`, `<=`
    Operator,

    /// One of `,` `.` `(` `)` `*` `+` `-`
    Punctuation,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Path => "path",
            TokenKind::Number => "number",
            TokenKind::Operator => "operator",
            TokenKind::Punctuation => "punctuation",
        };
        f.write_str(name)
    }
}

/// A classified, positioned span of the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: Position) -> Self {
        Token {
            kind,
            text: text.into(),
            position,
        }
    }

    pub fn is(&self, text: &str) -> bool {
        self.text == text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.text)
    }
}
