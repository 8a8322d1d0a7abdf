//! A small backtracking parser-combinator engine over token slices.
//!
//! Parsers are values. They are built once from the primitives in this
//! module, shared freely (they are `Clone + Send + Sync`), and run against a
//! [`State`] that holds everything a single parse needs: the tokens, the
//! cursor and the commit flag. Results travel back through return values as
//! [`Value`]s, never through shared variables.
//!
//! # Backtracking and commit
//!
//! [`or`] tries its alternatives from the same starting position. A failed
//! alternative is normally recoverable: the cursor is rewound and the next
//! one is tried. Once an alternative runs [`commit`], any later failure in
//! that alternative is fatal. It propagates to the top untouched and no
//! enclosing `or` tries anything else.
//!
//! ```
//! use selectql::parser::{and, commit, literal, optional, Parser};
//!
//! let p: Parser<()> = and([
//!     literal("a"),
//!     optional(and([literal("limit"), commit(), literal("n")])),
//! ]);
//!
//! assert!(p.parse_str("a limit n").is_ok());
//! let err = p.parse_str("a limit x").unwrap_err();
//! assert_eq!(err.to_string(), r#"expected "n", got "x""#);
//! ```

use std::fmt;
use std::sync::{Arc, OnceLock, Weak};

use thiserror::Error;
use tracing::{debug, trace};

use crate::ast::{Position, Token};
use crate::lexer::{LexError, tokenize};
use crate::value::Value;

/// What the parser was looking at when it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Found {
    Token { text: String, position: Position },
    EndOfInput,
}

impl Found {
    pub fn position(&self) -> Option<Position> {
        match self {
            Found::Token { position, .. } => Some(*position),
            Found::EndOfInput => None,
        }
    }
}

impl From<&Token> for Found {
    fn from(token: &Token) -> Self {
        Found::Token {
            text: token.text.clone(),
            position: token.position,
        }
    }
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Found::Token { text, .. } => write!(f, "{:?}", text),
            Found::EndOfInput => f.write_str("end of input"),
        }
    }
}

/// Errors produced by a parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The statement could not be split into tokens
    #[error(transparent)]
    Lex(#[from] LexError),

    /// A token did not match what the grammar required
    #[error("expected {expected}, got {found}")]
    Expected { expected: String, found: Found },

    /// No alternative of an ordered choice matched
    #[error("parse failed at {found}")]
    NoAlternative { found: Found },

    /// Well-formed tokens that an action rejected
    #[error("{message}")]
    Domain { message: String, found: Found },

    /// The parser finished before the end of the tokens
    #[error("unconsumed input starting at {found}")]
    Trailing { found: Found },
}

impl ParseError {
    pub fn found(&self) -> Option<&Found> {
        match self {
            ParseError::Lex(_) => None,
            ParseError::Expected { found, .. }
            | ParseError::NoAlternative { found }
            | ParseError::Domain { found, .. }
            | ParseError::Trailing { found } => Some(found),
        }
    }

    /// Source position of the offending character or token, if any.
    pub fn position(&self) -> Option<Position> {
        match self {
            ParseError::Lex(e) => Some(e.position()),
            other => other.found().and_then(Found::position),
        }
    }

    pub fn is_domain(&self) -> bool {
        matches!(self, ParseError::Domain { .. })
    }
}

/// A failed parse attempt.
///
/// `fatal` is set once the failure has crossed a commit; an [`or`] never
/// backtracks over a fatal failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub error: ParseError,
    fatal: bool,
}

impl Failure {
    pub fn new(error: ParseError) -> Self {
        Failure {
            error,
            fatal: false,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.fatal
    }

    fn into_fatal(self) -> Self {
        Failure {
            fatal: true,
            ..self
        }
    }
}

impl From<ParseError> for Failure {
    fn from(error: ParseError) -> Self {
        Failure::new(error)
    }
}

pub type Outcome<N> = Result<Value<N>, Failure>;

/// Working state of one parse: the tokens, the cursor and the commit flag of
/// the innermost running [`or`] alternative.
#[derive(Debug)]
pub struct State<'t> {
    tokens: &'t [Token],
    pos: usize,
    committed: bool,
}

impl<'t> State<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        State {
            tokens,
            pos: 0,
            committed: false,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub fn current(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    pub fn is_committed(&self) -> bool {
        self.committed
    }

    pub fn found(&self) -> Found {
        self.current().map_or(Found::EndOfInput, Found::from)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn expected(&self, expected: impl Into<String>) -> Failure {
        Failure::new(ParseError::Expected {
            expected: expected.into(),
            found: self.found(),
        })
    }
}

type ParseFn<N> = dyn Fn(&mut State<'_>) -> Outcome<N> + Send + Sync;

/// A parser producing [`Value<N>`].
pub struct Parser<N> {
    run: Arc<ParseFn<N>>,
}

impl<N> Clone for Parser<N> {
    fn clone(&self) -> Self {
        Parser {
            run: Arc::clone(&self.run),
        }
    }
}

impl<N> fmt::Debug for Parser<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Parser")
    }
}

impl<N> Parser<N> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut State<'_>) -> Outcome<N> + Send + Sync + 'static,
    {
        Parser { run: Arc::new(f) }
    }

    pub fn run(&self, state: &mut State<'_>) -> Outcome<N> {
        (self.run)(state)
    }

    /// Runs the parser over all of `tokens`.
    ///
    /// Succeeding without consuming every token is an error.
    pub fn parse(&self, tokens: &[Token]) -> Result<Value<N>, ParseError> {
        let mut state = State::new(tokens);
        let value = self.run(&mut state).map_err(|failure| failure.error)?;
        if !state.at_end() {
            return Err(ParseError::Trailing {
                found: state.found(),
            });
        }
        Ok(value)
    }

    /// Lexes `input` and runs the parser over the tokens.
    pub fn parse_str(&self, input: &str) -> Result<Value<N>, ParseError> {
        let tokens = tokenize(input)?;
        self.parse(&tokens)
    }
}

// ============================================================================
// Matchers
// ============================================================================

/// Matches a token whose text is exactly `text`.
pub fn literal<N: 'static>(text: &str) -> Parser<N> {
    let text = text.to_string();
    Parser::new(move |state| match state.current() {
        Some(token) if token.is(&text) => {
            state.advance();
            Ok(Value::Token(text.clone()))
        }
        _ => Err(state.expected(format!("{:?}", text))),
    })
}

/// Matches a token satisfying `pred`; `name` describes it in errors.
pub fn predicate<N, F>(name: &str, pred: F) -> Parser<N>
where
    N: 'static,
    F: Fn(&Token) -> bool + Send + Sync + 'static,
{
    let name = name.to_string();
    Parser::new(move |state| match state.current() {
        Some(token) if pred(token) => {
            state.advance();
            Ok(Value::Token(token.text.clone()))
        }
        _ => Err(state.expected(name.as_str())),
    })
}

/// Matches any single token.
pub fn any<N: 'static>() -> Parser<N> {
    Parser::new(|state| match state.current() {
        Some(token) => {
            state.advance();
            Ok(Value::Token(token.text.clone()))
        }
        None => Err(state.expected("any token")),
    })
}

/// Succeeds without consuming anything.
pub fn empty<N: 'static>() -> Parser<N> {
    Parser::new(|_| Ok(Value::Empty))
}

/// Marks the running alternative of the innermost [`or`] as the only viable
/// parse.
pub fn commit<N: 'static>() -> Parser<N> {
    Parser::new(|state| {
        state.committed = true;
        Ok(Value::Empty)
    })
}

// ============================================================================
// Combinators
// ============================================================================

/// Runs each parser in order. Yields a list of their values.
pub fn and<N: 'static>(parsers: impl IntoIterator<Item = Parser<N>>) -> Parser<N> {
    let parsers: Vec<_> = parsers.into_iter().collect();
    Parser::new(move |state| {
        let mut values = Vec::with_capacity(parsers.len());
        for p in &parsers {
            values.push(p.run(state)?);
        }
        Ok(Value::List(values))
    })
}

/// Ordered choice with backtracking.
///
/// A committed alternative that fails ends the choice: its failure is
/// returned as fatal. The caller's commit flag is restored either way.
pub fn or<N: 'static>(alternatives: impl IntoIterator<Item = Parser<N>>) -> Parser<N> {
    let alternatives: Vec<_> = alternatives.into_iter().collect();
    Parser::new(move |state| {
        let start = state.pos;
        let saved = state.committed;

        for (i, p) in alternatives.iter().enumerate() {
            state.committed = false;
            match p.run(state) {
                Ok(value) => {
                    state.committed = saved;
                    return Ok(value);
                }
                Err(failure) if failure.is_fatal() || state.committed => {
                    debug!(alternative = i, error = %failure.error, "committed alternative failed");
                    state.committed = saved;
                    return Err(failure.into_fatal());
                }
                Err(failure) => {
                    trace!(alternative = i, position = start, error = %failure.error, "backtracking");
                    state.pos = start;
                }
            }
        }

        state.committed = saved;
        Err(Failure::new(ParseError::NoAlternative {
            found: state.found(),
        }))
    })
}

/// `p` or nothing.
pub fn optional<N: 'static>(p: Parser<N>) -> Parser<N> {
    or([p, empty()])
}

/// Replaces the value of a successful parse.
pub fn map<N, F>(p: Parser<N>, f: F) -> Parser<N>
where
    N: 'static,
    F: Fn(Value<N>) -> Value<N> + Send + Sync + 'static,
{
    Parser::new(move |state| p.run(state).map(&f))
}

/// Runs `p`, then hands the tokens it consumed and its value to `f`.
///
/// An `Err` from `f` fails the action with [`ParseError::Domain`].
pub fn action<N, F>(p: Parser<N>, f: F) -> Parser<N>
where
    N: 'static,
    F: Fn(&[Token], Value<N>) -> Result<Value<N>, String> + Send + Sync + 'static,
{
    Parser::new(move |state| {
        let start = state.pos;
        let value = p.run(state)?;
        let tokens = state.tokens;
        let span = &tokens[start..state.pos];
        f(span, value).map_err(|message| {
            let found = span.first().map_or_else(|| state.found(), Found::from);
            Failure::new(ParseError::Domain { message, found })
        })
    })
}

/// Builds a parser that refers to itself.
///
/// `build` receives a stand-in for the finished parser. The stand-in resolves
/// it only when run and holds it weakly, so the result owns no reference
/// cycle.
pub fn fix<N: 'static>(build: impl FnOnce(Parser<N>) -> Parser<N>) -> Parser<N> {
    let slot: Arc<OnceLock<Parser<N>>> = Arc::new(OnceLock::new());
    let weak: Weak<OnceLock<Parser<N>>> = Arc::downgrade(&slot);

    let this = Parser::new(move |state| {
        let resolved = weak.upgrade().and_then(|slot| slot.get().cloned());
        match resolved {
            Some(p) => p.run(state),
            None => Err(Failure::new(ParseError::NoAlternative {
                found: state.found(),
            })),
        }
    });

    let body = build(this);
    // `slot` is still empty here and nothing else fills it, so this stores `body`.
    slot.get_or_init(move || body);
    Parser::new(move |state| match slot.get() {
        Some(body) => body.run(state),
        None => Err(Failure::new(ParseError::NoAlternative {
            found: state.found(),
        })),
    })
}

/// Zero or more `p`. Yields a flat list of their values.
///
/// Each repetition nests one level deeper, so stack use grows with the
/// number of items. A few hundred items are fine on a default thread stack;
/// around a thousand overflow a 2 MiB one.
pub fn repeat<N: 'static>(p: Parser<N>) -> Parser<N> {
    fix(move |this| {
        or([
            map(and([p, this]), |pair| {
                let mut parts = pair.into_list().into_iter();
                let mut items: Vec<_> = parts.next().into_iter().collect();
                if let Some(rest) = parts.next() {
                    items.extend(rest.into_list());
                }
                Value::List(items)
            }),
            map(empty(), |_| Value::List(Vec::new())),
        ])
    })
}

/// One or more `item`s separated by `sep`. Yields the item values only.
///
/// Built on [`repeat`], with the same depth limit.
pub fn list<N: 'static>(item: Parser<N>, sep: Parser<N>) -> Parser<N> {
    let tail = repeat(map(and([sep, item.clone()]), |pair| {
        pair.into_list().into_iter().nth(1).unwrap_or(Value::Empty)
    }));
    map(and([item, tail]), |pair| {
        let mut parts = pair.into_list().into_iter();
        let mut items: Vec<_> = parts.next().into_iter().collect();
        if let Some(rest) = parts.next() {
            items.extend(rest.into_list());
        }
        Value::List(items)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    type P = Parser<()>;

    fn tokens(words: &[&str]) -> Vec<Token> {
        words
            .iter()
            .map(|w| Token::new(crate::ast::TokenKind::Identifier, *w, Position::start()))
            .collect()
    }

    #[test]
    fn test_repeat_any_count() {
        let p: P = repeat(literal("x"));
        for n in 0..4 {
            let input = vec!["x"; n];
            let value = p.parse(&tokens(&input)).unwrap();
            assert_eq!(value.len(), n);
        }
    }

    #[test]
    fn test_or_restores_callers_commit_flag() {
        let p: P = and([commit(), optional(literal("x"))]);
        let toks = tokens(&[]);
        let mut state = State::new(&toks);
        p.run(&mut state).unwrap();
        assert!(state.is_committed());
    }

    #[test]
    fn test_fatal_failure_crosses_outer_or() {
        let inner: P = and([literal("a"), commit(), literal("b")]);
        let p: P = or([and([optional(inner), literal("c")]), literal("a")]);
        let err = p.parse(&tokens(&["a", "c"])).unwrap_err();
        assert_eq!(err.to_string(), r#"expected "b", got "c""#);
    }

    #[test]
    fn test_commit_is_scoped_to_successful_choice() {
        // the inner choice committed and succeeded, so a later failure still backtracks
        let inner: P = or([and([literal("a"), commit(), literal("b")])]);
        let p: P = or([
            and([inner, literal("c")]),
            and([literal("a"), literal("b"), literal("d")]),
        ]);
        assert!(p.parse(&tokens(&["a", "b", "d"])).is_ok());
    }
}
