use thiserror::Error;

use crate::ast::{Position, Token, TokenKind};

/// Errors raised while splitting a statement into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// No lexing rule starts with this character
    #[error("unexpected character {ch:?} at {position}")]
    UnexpectedChar { ch: char, position: Position },
}

impl LexError {
    pub fn position(&self) -> Position {
        match self {
            LexError::UnexpectedChar { position, .. } => *position,
        }
    }
}

/// A lexing rule: a test on the next unconsumed character and the consumer
/// that reads the token starting there.
struct Rule {
    starts: fn(&Lexer) -> bool,
    read: fn(&mut Lexer) -> TokenKind,
}

/// Tried in order; the first rule whose `starts` holds reads the token.
const RULES: &[Rule] = &[
    Rule {
        starts: |lx| lx.current_char().is_some_and(is_word_start),
        read: Lexer::read_word,
    },
    Rule {
        starts: |lx| match lx.current_char() {
            Some(c) if c.is_ascii_digit() => true,
            Some('-') => lx.peek_char(1).is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        },
        read: Lexer::read_number,
    },
    Rule {
        starts: |lx| matches!(lx.current_char(), Some('>' | '<' | '=')),
        read: Lexer::read_comparison,
    },
    Rule {
        starts: |lx| lx.current_char().is_some_and(is_punctuation),
        read: Lexer::read_punctuation,
    },
];

pub fn is_word_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

pub fn is_ident_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

pub fn is_path_char(ch: char) -> bool {
    is_ident_char(ch) || ch == '-' || ch == '/'
}

fn is_punctuation(ch: char) -> bool {
    matches!(ch, ',' | '.' | '(' | ')' | '*' | '+' | '-')
}

/// Splits a statement into tokens.
///
/// The lexer owns a copy of the input and nothing else, so lexing the same
/// string twice always yields the same tokens.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        if self.current_char() == Some('\n') {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.position += 1;
    }

    fn advance_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.current_char().is_some_and(&pred) {
            self.advance();
        }
    }

    fn here(&self) -> Position {
        Position {
            offset: self.position,
            line: self.line,
            column: self.column,
        }
    }

    fn skip_whitespace(&mut self) {
        self.advance_while(char::is_whitespace);
    }

    fn read_word(&mut self) -> TokenKind {
        let start = self.position;
        self.advance_while(is_path_char);
        if self.input[start..self.position]
            .iter()
            .any(|&c| c == '-' || c == '/')
        {
            TokenKind::Path
        } else {
            TokenKind::Identifier
        }
    }

    fn read_number(&mut self) -> TokenKind {
        if self.current_char() == Some('-') {
            self.advance();
        }
        self.advance_while(|c| c.is_ascii_digit());
        if self.current_char() == Some('.')
            && self.peek_char(1).is_some_and(|c| c.is_ascii_digit())
        {
            self.advance();
            self.advance_while(|c| c.is_ascii_digit());
        }
        TokenKind::Number
    }

    /// `>`, `<` and `=`, each optionally followed by `=`.
    fn read_comparison(&mut self) -> TokenKind {
        self.advance();
        if self.current_char() == Some('=') {
            self.advance();
        }
        TokenKind::Operator
    }

    fn read_punctuation(&mut self) -> TokenKind {
        self.advance();
        TokenKind::Punctuation
    }

    /// Reads the next token, or `None` once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        self.skip_whitespace();

        let Some(ch) = self.current_char() else {
            return Ok(None);
        };

        let start = self.here();
        let lexer: &Lexer = self;
        let Some(rule) = RULES.iter().find(|rule| (rule.starts)(lexer)) else {
            // Nothing after an error is meaningful; stop here.
            self.position = self.input.len();
            return Err(LexError::UnexpectedChar { ch, position: start });
        };

        let kind = (rule.read)(self);
        let text: String = self.input[start.offset..self.position].iter().collect();
        Ok(Some(Token::new(kind, text, start)))
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

/// Lexes a whole statement, stopping at the first unrecognized character.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).collect()
}
