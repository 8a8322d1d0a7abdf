// tests/lexer_tests.rs

use selectql::ast::{Position, Token, TokenKind};
use selectql::lexer::{LexError, Lexer, tokenize};

fn kinds_and_texts(input: &str) -> Vec<(TokenKind, String)> {
    tokenize(input)
        .unwrap()
        .into_iter()
        .map(|t| (t.kind, t.text))
        .collect()
}

fn tok(kind: TokenKind, text: &str) -> (TokenKind, String) {
    (kind, text.to_string())
}

// ============================================================================
// Single Character Tokens
// ============================================================================

#[test]
fn test_punctuation_tokens() {
    for input in [",", ".", "(", ")", "*", "+", "-"] {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token().unwrap().unwrap();
        assert_eq!(token.kind, TokenKind::Punctuation, "Failed for input: {}", input);
        assert_eq!(token.text, input);
        assert_eq!(lexer.next_token().unwrap(), None);
    }
}

#[test]
fn test_single_char_comparisons() {
    for input in [">", "<", "="] {
        let tokens = tokenize(input).unwrap();
        assert_eq!(tokens.len(), 1, "Failed for input: {}", input);
        assert_eq!(tokens[0].kind, TokenKind::Operator);
        assert_eq!(tokens[0].text, input);
    }
}

// ============================================================================
// Two Character Tokens
// ============================================================================

#[test]
fn test_two_char_tokens() {
    for input in [">=", "<=", "=="] {
        let tokens = tokenize(input).unwrap();
        assert_eq!(tokens.len(), 1, "Failed for input: {}", input);
        assert_eq!(tokens[0].kind, TokenKind::Operator);
        assert_eq!(tokens[0].text, input);
    }
}

#[test]
fn test_two_char_vs_single_char() {
    assert_eq!(
        kinds_and_texts("< =="),
        vec![tok(TokenKind::Operator, "<"), tok(TokenKind::Operator, "==")]
    );
    assert_eq!(
        kinds_and_texts("> >="),
        vec![tok(TokenKind::Operator, ">"), tok(TokenKind::Operator, ">=")]
    );
    // three in a row: the first two pair up
    assert_eq!(
        kinds_and_texts("==="),
        vec![tok(TokenKind::Operator, "=="), tok(TokenKind::Operator, "=")]
    );
}

#[test]
fn test_comparison_without_spaces() {
    assert_eq!(
        kinds_and_texts("s3<=2"),
        vec![
            tok(TokenKind::Identifier, "s3"),
            tok(TokenKind::Operator, "<="),
            tok(TokenKind::Number, "2"),
        ]
    );
}

// ============================================================================
// Words
// ============================================================================

#[test]
fn test_identifiers() {
    for input in ["select", "pop", "_internal", "item_count", "s3", "Größe"] {
        let tokens = tokenize(input).unwrap();
        assert_eq!(tokens, vec![Token::new(TokenKind::Identifier, input, Position::start())]);
    }
}

#[test]
fn test_paths() {
    for input in ["Namespaces/dev/Updates", "user-events", "a/b-c_d"] {
        let tokens = tokenize(input).unwrap();
        assert_eq!(tokens.len(), 1, "Failed for input: {}", input);
        assert_eq!(tokens[0].kind, TokenKind::Path);
        assert_eq!(tokens[0].text, input);
    }
}

#[test]
fn test_word_stops_at_punctuation() {
    assert_eq!(
        kinds_and_texts("a,b"),
        vec![
            tok(TokenKind::Identifier, "a"),
            tok(TokenKind::Punctuation, ","),
            tok(TokenKind::Identifier, "b"),
        ]
    );
}

// ============================================================================
// Numbers
// ============================================================================

#[test]
fn test_numbers() {
    for input in ["0", "42", "3000", "2.5", "-7", "-0.25"] {
        let tokens = tokenize(input).unwrap();
        assert_eq!(tokens.len(), 1, "Failed for input: {}", input);
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].text, input);
    }
}

#[test]
fn test_number_then_word() {
    assert_eq!(
        kinds_and_texts("12abc"),
        vec![tok(TokenKind::Number, "12"), tok(TokenKind::Identifier, "abc")]
    );
}

#[test]
fn test_trailing_dot_is_not_a_fraction() {
    assert_eq!(
        kinds_and_texts("5."),
        vec![tok(TokenKind::Number, "5"), tok(TokenKind::Punctuation, ".")]
    );
}

#[test]
fn test_minus_before_word_is_punctuation() {
    assert_eq!(
        kinds_and_texts("-x"),
        vec![tok(TokenKind::Punctuation, "-"), tok(TokenKind::Identifier, "x")]
    );
}

// ============================================================================
// Whitespace and Positions
// ============================================================================

#[test]
fn test_whitespace_is_skipped() {
    let spaced = tokenize("  select \t *\n from   cities  ").unwrap();
    let texts: Vec<_> = spaced.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["select", "*", "from", "cities"]);
}

#[test]
fn test_empty_and_blank_input() {
    assert_eq!(tokenize("").unwrap(), vec![]);
    assert_eq!(tokenize(" \n\t ").unwrap(), vec![]);
}

#[test]
fn test_positions() {
    let tokens = tokenize("select *\nfrom c").unwrap();
    let positions: Vec<_> = tokens.iter().map(|t| (t.position.offset, t.position.line, t.position.column)).collect();
    assert_eq!(positions, vec![(0, 1, 1), (7, 1, 8), (9, 2, 1), (14, 2, 6)]);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unexpected_character() {
    let err = tokenize("select ! from c").unwrap_err();
    assert_eq!(
        err,
        LexError::UnexpectedChar {
            ch: '!',
            position: Position {
                offset: 7,
                line: 1,
                column: 8
            }
        }
    );
    assert_eq!(err.to_string(), "unexpected character '!' at 1:8");
}

#[test]
fn test_quotes_are_not_tokens() {
    assert!(tokenize("name = 'bob'").is_err());
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_relexing_is_deterministic() {
    let input = "select pop, nick from cities where pop >= 3000 order by pop desc limit 5";
    assert_eq!(tokenize(input).unwrap(), tokenize(input).unwrap());

    let mut first = Lexer::new(input);
    let mut second = Lexer::new(input);
    loop {
        let (a, b) = (first.next_token().unwrap(), second.next_token().unwrap());
        assert_eq!(a, b);
        if a.is_none() {
            break;
        }
    }
}
