//! Identifier rules shared by the CTE scanner and the table extractor.
//!
//! A candidate table token may arrive quoted (`` `t` `` or `"t"`) and/or
//! schema-qualified (`schema.t`). Validation always runs against the
//! *validation key*: the final, unqualified, unquoted segment.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Reserved words that can never be reported as table names.
const SQL_KEYWORDS: &[&str] = &[
    "SELECT", "FROM", "WHERE", "JOIN", "INNER", "LEFT", "RIGHT", "FULL", "CROSS", "ON", "AND",
    "OR", "NOT", "IN", "EXISTS", "BETWEEN", "LIKE", "INSERT", "INTO", "VALUES", "UPDATE", "SET",
    "DELETE", "CREATE", "DROP", "ALTER", "TABLE", "INDEX", "VIEW", "DATABASE", "SCHEMA", "AS",
    "WITH", "UNION", "INTERSECT", "EXCEPT", "ORDER", "BY", "GROUP", "HAVING", "LIMIT", "OFFSET",
    "DISTINCT", "ALL", "ANY", "SOME", "CASE", "WHEN", "THEN", "ELSE", "END", "IF", "NULL", "IS",
    "TRUE", "FALSE", "TRUNCATE", "ASC", "DESC", "PRIMARY", "KEY", "FOREIGN", "REFERENCES",
    "CONSTRAINT", "UNIQUE", "CHECK", "DEFAULT", "AUTO_INCREMENT", "CASCADE",
];

static KEYWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| SQL_KEYWORDS.iter().copied().collect());

#[inline]
pub(crate) fn is_identifier_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

#[inline]
pub(crate) fn is_identifier_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Length in bytes of the identifier at the start of `text`, or 0 if there is none.
pub(crate) fn identifier_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    match bytes.first() {
        Some(&b) if is_identifier_start(b) => {
            1 + bytes[1..]
                .iter()
                .take_while(|&&b| is_identifier_continue(b))
                .count()
        }
        _ => 0,
    }
}

/// Returns true if `name` matches `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_valid_identifier(name: &str) -> bool {
    !name.is_empty() && identifier_len(name) == name.len()
}

/// Returns true if `word` (any case) is a reserved SQL keyword.
pub fn is_sql_keyword(word: &str) -> bool {
    KEYWORD_SET.contains(word.to_ascii_uppercase().as_str())
}

/// Trims whitespace and strips surrounding backticks/double quotes.
///
/// ```
/// use rust_sqltables::parser::clean_table_name;
/// assert_eq!(clean_table_name(" `temp_cache` "), "temp_cache");
/// assert_eq!(clean_table_name("\"Orders\""), "Orders");
/// ```
pub fn clean_table_name(raw: &str) -> &str {
    raw.trim().trim_matches(|c| c == '`' || c == '"')
}

/// Final segment of a possibly schema-qualified name, quotes stripped.
pub fn validation_key(cleaned: &str) -> &str {
    match cleaned.rsplit_once('.') {
        Some((_, last)) => last.trim_matches(|c| c == '`' || c == '"'),
        None => cleaned,
    }
}

/// Clean and validate a raw table token.
///
/// Returns the validation key when the token is a plausible table name,
/// `None` for empty tokens, reserved words and malformed identifiers.
pub fn validate_table_name(raw: &str) -> Option<String> {
    let cleaned = clean_table_name(raw);
    if cleaned.is_empty() {
        return None;
    }

    let key = validation_key(cleaned);
    if is_sql_keyword(key) || !is_valid_identifier(key) {
        return None;
    }

    Some(key.to_string())
}
