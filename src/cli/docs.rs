//! Documentation content for the selectql CLI

/// Statement syntax reference printed by `selectql syntax`
pub fn get_syntax_doc() -> &'static str {
    r#"SELECTQL STATEMENT SYNTAX

The smallest statement is

  select FIELDS from COLLECTION

where FIELDS is a comma-separated list of field names or "*" (also written
"all" to avoid shell glob expansion), and COLLECTION is a collection name or
a slash-separated path such as Namespaces/dev/Updates.

Optional clauses follow, in this order:

  where FIELD OP VALUE [and FIELD OP VALUE]...
      OP is one of ==, =, >, >=, < or <=.
      VALUE is any single token; numbers compare as numbers.

  order by FIELD [asc|desc] [, FIELD [asc|desc]]...
      Keys sort ascending unless marked desc.

  limit N
      N is a non-negative integer.

EXAMPLES

  selectql select '*' from cities
  selectql select pop, nick from cities where pop '>' 3000
  selectql select all from cities order by pop desc limit 5
  selectql check "select StartedAt from Namespaces/dev/Updates order by StartedAt desc"
"#
}
