// tests/cli_tests.rs

use selectql::OutputFormat;
use selectql::cli::{
    CheckOptions, CheckResult, CliError, execute_check, execute_tokens, get_syntax_doc,
    statement_from_words,
};

fn words(ws: &[&str]) -> Vec<String> {
    ws.iter().map(|w| w.to_string()).collect()
}

fn check(statement: &str, format: OutputFormat) -> Result<CheckResult, CliError> {
    execute_check(&CheckOptions {
        statement: statement.to_string(),
        syntax_only: false,
        format,
    })
}

// ============================================================================
// Statement Assembly
// ============================================================================

#[test]
fn test_select_prefix_added() {
    let statement = statement_from_words(&words(&["*", "from", "cities"]), Some("select"));
    assert_eq!(statement.as_deref(), Some("select * from cities"));
}

#[test]
fn test_select_prefix_always_added() {
    let statement = statement_from_words(&words(&["select", "from", "cities"]), Some("select"));
    assert_eq!(statement.as_deref(), Some("select select from cities"));
    let query = check(&statement.unwrap(), OutputFormat::Json).map(|r| match r {
        CheckResult::Parsed { query, .. } => query.selects,
        CheckResult::SyntaxValid => Vec::new(),
    });
    assert_eq!(query.unwrap(), vec!["select"]);
}

#[test]
fn test_check_statement_is_not_prefixed() {
    let statement = statement_from_words(&words(&["select * from cities"]), None);
    assert_eq!(statement.as_deref(), Some("select * from cities"));
}

#[test]
fn test_no_words() {
    assert_eq!(statement_from_words(&[], Some("select")), None);
    assert_eq!(statement_from_words(&words(&["  "]), None), None);
}

// ============================================================================
// Check
// ============================================================================

#[test]
fn test_check_json() {
    match check("select pop from cities where pop > 3000 limit 2", OutputFormat::Json).unwrap() {
        CheckResult::Parsed { query, rendered } => {
            assert_eq!(query.limit, Some(2));
            assert_eq!(
                rendered,
                r#"{"selects":["pop"],"coll":"cities","wheres":[{"path":"pop","op":">","value":"3000"}],"orders":[],"limit":2}"#
            );
        }
        other => panic!("Expected parsed query, got {:?}", other),
    }
}

#[test]
fn test_check_pretty_json_is_valid_json() {
    let CheckResult::Parsed { rendered, .. } =
        check("select * from c order by a desc", OutputFormat::Pretty).unwrap()
    else {
        panic!("Expected parsed query");
    };
    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(value["orders"][0]["direction"], "desc");
    assert!(rendered.contains('\n'));
}

#[test]
fn test_check_text() {
    let CheckResult::Parsed { rendered, .. } =
        check("select  a,b   from c", OutputFormat::Text).unwrap()
    else {
        panic!("Expected parsed query");
    };
    assert_eq!(rendered, "select a, b from c");
}

#[test]
fn test_check_syntax_only() {
    let result = execute_check(&CheckOptions {
        statement: "select * from c".to_string(),
        syntax_only: true,
        format: OutputFormat::Json,
    })
    .unwrap();
    assert!(matches!(result, CheckResult::SyntaxValid));
}

#[test]
fn test_check_reports_parse_error() {
    let err = check("select * from c limit abc", OutputFormat::Json).unwrap_err();
    assert!(matches!(err, CliError::Parse(_)));
    assert_eq!(
        err.to_string(),
        r#"Parse error: invalid limit "abc": invalid digit found in string"#
    );
}

#[test]
fn test_check_empty_statement() {
    let err = check("   ", OutputFormat::Json).unwrap_err();
    assert!(matches!(err, CliError::NoInput));
}

// ============================================================================
// Tokens and Docs
// ============================================================================

#[test]
fn test_tokens_listing() {
    let listing = execute_tokens("select a>=1").unwrap();
    let lines: Vec<_> = listing.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("1:1"));
    assert!(lines[0].contains("identifier"));
    assert!(lines[2].contains("operator"));
    assert!(lines[2].ends_with(">="));
}

#[test]
fn test_tokens_lex_error() {
    let err = execute_tokens("a ; b").unwrap_err();
    assert!(matches!(err, CliError::Lex(_)));
}

#[test]
fn test_syntax_doc_mentions_every_clause() {
    let doc = get_syntax_doc();
    for clause in ["select", "from", "where", "order by", "limit"] {
        assert!(doc.contains(clause), "Missing clause: {}", clause);
    }
}
