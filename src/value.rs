/// The result a parser attaches on success.
///
/// `N` is the grammar's own node type, so the engine never needs to know what
/// a domain object looks like.
///
/// # What each combinator yields
///
/// - `literal`, `predicate`, `any` → `Token` with the matched text
/// - `and` → `List` with one entry per sub-parser
/// - `repeat`, `list` → flat `List` of item values
/// - `or` → the value of the alternative that matched
/// - `commit`, `empty` → `Empty`
/// - `action` → whatever its function returns
///
/// # Examples
///
/// ```
/// use selectql::Value;
///
/// let v: Value<()> = Value::List(vec![Value::Token("a".into()), Value::Empty]);
/// assert_eq!(v.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<N> {
    /// Nothing was produced
    Empty,

    /// Text of a single matched token
    Token(String),

    /// Ordered sub-results
    List(Vec<Value<N>>),

    /// A domain object built by an action
    Node(N),
}

impl<N> Value<N> {
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Empty => true,
            Value::List(items) => items.is_empty(),
            Value::Token(_) | Value::Node(_) => false,
        }
    }

    /// Number of entries in a list; 1 for a token or node, 0 for empty.
    pub fn len(&self) -> usize {
        match self {
            Value::Empty => 0,
            Value::List(items) => items.len(),
            Value::Token(_) | Value::Node(_) => 1,
        }
    }

    pub fn as_token(&self) -> Option<&str> {
        match self {
            Value::Token(text) => Some(text),
            _ => None,
        }
    }

    pub fn into_token(self) -> Option<String> {
        match self {
            Value::Token(text) => Some(text),
            _ => None,
        }
    }

    pub fn into_node(self) -> Option<N> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }

    /// The entries of a list, a one-element vector for anything else but
    /// `Empty`, which has none.
    pub fn into_list(self) -> Vec<Value<N>> {
        match self {
            Value::Empty => Vec::new(),
            Value::List(items) => items,
            other => vec![other],
        }
    }
}
