//! The select statement grammar, written with the combinators in
//! [`crate::parser`].
//!
//! ```text
//! query   := select from [where] [order] [limit]
//! select  := "select" ("*" | "all" | identifier ("," identifier)*)
//! from    := "from" path
//! where   := "where" COMMIT term ("and" term)*
//! term    := identifier operator value
//! order   := "order" COMMIT "by" key ("," key)*
//! key     := identifier ["asc" | "desc"]
//! limit   := "limit" COMMIT integer
//! ```
//!
//! Each optional clause commits right after its keyword. Past that point the
//! statement can only be that clause, so a malformed term is reported as such
//! instead of leaving the keyword behind as unparsed input.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::ast::{CompareOp, Direction, Order, Query, Token, TokenKind, Where};
use crate::parser::{
    ParseError, Parser, action, and, any, commit, empty, list, literal, optional, or, predicate,
};
use crate::value::Value;

/// Domain values built by the grammar's actions.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Selects(Vec<String>),
    Collection(String),
    Where(Where),
    Wheres(Vec<Where>),
    Order(Order),
    Orders(Vec<Order>),
    Limit(u64),
    Query(Query),
}

type Grammar = Parser<Clause>;

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{Alphabetic}_][\p{Alphabetic}\p{N}_]*$").expect("identifier pattern")
});

static PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{Alphabetic}_][\p{Alphabetic}\p{N}_/-]*$").expect("path pattern")
});

static QUERY: LazyLock<Grammar> = LazyLock::new(query);

pub fn is_identifier(text: &str) -> bool {
    IDENTIFIER.is_match(text)
}

pub fn is_path(text: &str) -> bool {
    PATH.is_match(text)
}

fn identifier() -> Grammar {
    predicate("identifier", |t: &Token| is_identifier(&t.text))
}

fn path() -> Grammar {
    predicate("path", |t: &Token| is_path(&t.text))
}

fn operator() -> Grammar {
    predicate("comparison operator", |t: &Token| {
        t.kind == TokenKind::Operator && CompareOp::from_symbol(&t.text).is_some()
    })
}

/// Any single token; the consumer decides how to read it.
fn value() -> Grammar {
    predicate("value", |_: &Token| true)
}

fn node(clause: Clause) -> Result<Value<Clause>, String> {
    Ok(Value::Node(clause))
}

fn malformed(what: &str, value: &Value<Clause>) -> String {
    format!("malformed {}: {:?}", what, value)
}

fn select_clause() -> Grammar {
    let fields = or([
        literal("*"),
        literal("all"),
        list(identifier(), literal(",")),
    ]);
    action(and([literal("select"), fields]), |_, value| {
        match value.into_list().as_slice() {
            [_, Value::Token(_)] => node(Clause::Selects(Vec::new())),
            [_, Value::List(items)] => {
                let names: Option<Vec<String>> =
                    items.iter().map(|v| v.as_token().map(String::from)).collect();
                names
                    .map(Clause::Selects)
                    .map(Value::Node)
                    .ok_or_else(|| format!("malformed field list: {:?}", items))
            }
            other => Err(format!("malformed select clause: {:?}", other)),
        }
    })
}

fn from_clause() -> Grammar {
    action(and([literal("from"), path()]), |_, value| {
        value
            .into_list()
            .pop()
            .and_then(Value::into_token)
            .map(|coll| Value::Node(Clause::Collection(coll)))
            .ok_or_else(|| "malformed from clause".to_string())
    })
}

fn where_term() -> Grammar {
    action(and([identifier(), operator(), value()]), |_, value| {
        match value.into_list().as_slice() {
            [Value::Token(path), Value::Token(op), Value::Token(text)] => {
                let op = CompareOp::from_symbol(op)
                    .ok_or_else(|| format!("unknown comparison operator {:?}", op))?;
                node(Clause::Where(Where::new(path.clone(), op, text.clone())))
            }
            other => Err(format!("malformed where term: {:?}", other)),
        }
    })
}

fn where_clause() -> Grammar {
    let terms = list(where_term(), literal("and"));
    action(and([literal("where"), commit(), terms]), |_, value| {
        let mut parts = value.into_list();
        let Some(terms) = parts.pop() else {
            return Err("malformed where clause".to_string());
        };
        terms
            .into_list()
            .into_iter()
            .map(|term| match term {
                Value::Node(Clause::Where(w)) => Ok(w),
                other => Err(malformed("where term", &other)),
            })
            .collect::<Result<Vec<_>, _>>()
            .and_then(|wheres| node(Clause::Wheres(wheres)))
    })
}

fn order_key() -> Grammar {
    let direction = or([literal("asc"), literal("desc"), empty()]);
    action(and([identifier(), direction]), |_, value| {
        let direction = |v: &Value<Clause>| match v.as_token() {
            Some("desc") => Direction::Desc,
            _ => Direction::Asc,
        };
        match value.into_list().as_slice() {
            [Value::Token(path), dir] => {
                node(Clause::Order(Order::new(path.clone(), direction(dir))))
            }
            other => Err(format!("malformed order key: {:?}", other)),
        }
    })
}

fn order_clause() -> Grammar {
    let keys = list(order_key(), literal(","));
    action(
        and([literal("order"), commit(), literal("by"), keys]),
        |_, value| {
            let mut parts = value.into_list();
            let Some(keys) = parts.pop() else {
                return Err("malformed order clause".to_string());
            };
            keys.into_list()
                .into_iter()
                .map(|key| match key {
                    Value::Node(Clause::Order(o)) => Ok(o),
                    other => Err(malformed("order key", &other)),
                })
                .collect::<Result<Vec<_>, _>>()
                .and_then(|orders| node(Clause::Orders(orders)))
        },
    )
}

fn limit_clause() -> Grammar {
    let count = action(any(), |tokens, _| {
        let text = tokens.first().map(|t| t.text.as_str()).unwrap_or_default();
        text.parse::<u64>()
            .map(|n| Value::Node(Clause::Limit(n)))
            .map_err(|e| format!("invalid limit {:?}: {}", text, e))
    });
    action(and([literal("limit"), commit(), count]), |_, value| {
        match value.into_list().pop() {
            Some(limit @ Value::Node(Clause::Limit(_))) => Ok(limit),
            other => Err(format!("malformed limit clause: {:?}", other)),
        }
    })
}

/// Builds the statement parser. [`parse_query`] shares one instance.
pub fn query() -> Grammar {
    let statement = and([
        select_clause(),
        from_clause(),
        optional(where_clause()),
        optional(order_clause()),
        optional(limit_clause()),
    ]);
    action(statement, |_, value| {
        let mut query = Query::default();
        for part in value.into_list() {
            match part {
                Value::Node(Clause::Selects(selects)) => query.selects = selects,
                Value::Node(Clause::Collection(coll)) => query.coll = coll,
                Value::Node(Clause::Wheres(wheres)) => query.wheres = wheres,
                Value::Node(Clause::Orders(orders)) => query.orders = orders,
                Value::Node(Clause::Limit(n)) => query.limit = Some(n),
                Value::Empty => {}
                other => return Err(malformed("statement", &other)),
            }
        }
        node(Clause::Query(query))
    })
}

/// Parses a select statement.
///
/// # Examples
///
/// ```
/// use selectql::grammar::parse_query;
///
/// let q = parse_query("select pop, nick from cities where pop > 3000").unwrap();
/// assert_eq!(q.selects, vec!["pop", "nick"]);
/// assert_eq!(q.coll, "cities");
/// assert_eq!(q.wheres[0].value, "3000");
/// ```
pub fn parse_query(input: &str) -> Result<Query, ParseError> {
    debug!(statement = input, "parsing query");
    let tokens = crate::lexer::tokenize(input)?;
    parse_tokens(&tokens)
}

/// Parses an already lexed statement.
pub fn parse_tokens(tokens: &[Token]) -> Result<Query, ParseError> {
    match QUERY.parse(tokens)?.into_node() {
        Some(Clause::Query(query)) => {
            debug!(coll = %query.coll, wheres = query.wheres.len(), orders = query.orders.len(), "parsed query");
            Ok(query)
        }
        other => Err(ParseError::Domain {
            message: format!("malformed statement: {:?}", other),
            found: crate::parser::Found::EndOfInput,
        }),
    }
}
