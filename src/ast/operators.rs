use std::fmt;

use serde::Serialize;

/// Comparison operators accepted in a where term.
///
/// `=` and `==` are kept apart so a consumer sees exactly what was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompareOp {
    /// Equal (`==`)
    #[serde(rename = "==")]
    EqEq,
    /// Equal (`=`)
    #[serde(rename = "=")]
    Eq,
    /// Greater than (`>`)
    #[serde(rename = ">")]
    Gt,
    /// Greater than or equal (`>=`)
    #[serde(rename = ">=")]
    GtEq,
    /// Less than (`<`)
    #[serde(rename = "<")]
    Lt,
    /// Less than or equal (`<=`)
    #[serde(rename = "<=")]
    LtEq,
}

impl CompareOp {
    pub const ALL: [CompareOp; 6] = [
        CompareOp::EqEq,
        CompareOp::Eq,
        CompareOp::Gt,
        CompareOp::GtEq,
        CompareOp::Lt,
        CompareOp::LtEq,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::EqEq => "==",
            CompareOp::Eq => "=",
            CompareOp::Gt => ">",
            CompareOp::GtEq => ">=",
            CompareOp::Lt => "<",
            CompareOp::LtEq => "<=",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Sort direction of an order term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Asc => f.write_str("asc"),
            Direction::Desc => f.write_str("desc"),
        }
    }
}
