use std::fmt;

use serde::Serialize;

use crate::ast::{CompareOp, Direction};

/// A parsed select statement.
///
/// An empty `selects` list means every field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Query {
    /// Selected field names, in source order
    pub selects: Vec<String>,

    /// Collection path
    pub coll: String,

    /// Filter terms, all of which must hold
    pub wheres: Vec<Where>,

    /// Sort keys, most significant first
    pub orders: Vec<Order>,

    /// Maximum number of results
    pub limit: Option<u64>,
}

impl Query {
    pub fn new(coll: impl Into<String>) -> Self {
        Query {
            coll: coll.into(),
            ..Default::default()
        }
    }

    pub fn selects_all(&self) -> bool {
        self.selects.is_empty()
    }
}

/// A single `path op value` filter term.
///
/// `value` keeps the literal text as written; [`Where::literal`] converts it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Where {
    pub path: String,
    pub op: CompareOp,
    pub value: String,
}

impl Where {
    pub fn new(path: impl Into<String>, op: CompareOp, value: impl Into<String>) -> Self {
        Where {
            path: path.into(),
            op,
            value: value.into(),
        }
    }

    pub fn literal(&self) -> Literal {
        Literal::from_text(&self.value)
    }
}

/// A sort key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub path: String,
    pub direction: Direction,
}

impl Order {
    pub fn new(path: impl Into<String>, direction: Direction) -> Self {
        Order {
            path: path.into(),
            direction,
        }
    }
}

/// A where value converted for comparison against stored fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Literal {
    /// Integer if the text is base-10, then float, otherwise the text itself.
    pub fn from_text(text: &str) -> Self {
        if let Ok(n) = text.parse::<i64>() {
            return Literal::Integer(n);
        }
        // f64::from_str also accepts "inf" and "NaN", which are field values here
        let numeric = text
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit() || c == '-' || c == '.');
        if numeric {
            if let Ok(f) = text.parse::<f64>() {
                return Literal::Float(f);
            }
        }
        Literal::Text(text.to_string())
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("select ")?;
        if self.selects_all() {
            f.write_str("*")?;
        } else {
            f.write_str(&self.selects.join(", "))?;
        }
        write!(f, " from {}", self.coll)?;

        for (i, w) in self.wheres.iter().enumerate() {
            let joiner = if i == 0 { " where" } else { " and" };
            write!(f, "{} {} {} {}", joiner, w.path, w.op, w.value)?;
        }

        for (i, o) in self.orders.iter().enumerate() {
            f.write_str(if i == 0 { " order by " } else { ", " })?;
            f.write_str(&o.path)?;
            if o.direction == Direction::Desc {
                f.write_str(" desc")?;
            }
        }

        if let Some(n) = self.limit {
            write!(f, " limit {}", n)?;
        }
        Ok(())
    }
}
