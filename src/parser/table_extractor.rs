//! Keyword-anchored table reference extraction
//!
//! Each [`StatementKind`] owns one case-insensitive pattern: its keyword
//! anchor followed by a single table token. A table token is tried in this
//! order: backtick-quoted, double-quoted, `schema.table`, bare word.
//!
//! A `FROM` anchor also picks up the rest of a comma-separated table list
//! (`FROM a x, b AS y, c`). The list ends at the first item that is not a
//! table token optionally followed by an alias.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::identifier::{identifier_len, is_sql_keyword, validate_table_name};
use crate::util::{leading_whitespace_len, starts_with_ci};

/// The SQL clause that introduced a table reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatementKind {
    SelectFrom,
    Join,
    Insert,
    Update,
    Delete,
    Create,
    Drop,
    Alter,
    Truncate,
}

impl StatementKind {
    /// All kinds, in reporting order.
    pub const ALL: [StatementKind; 9] = [
        StatementKind::SelectFrom,
        StatementKind::Join,
        StatementKind::Insert,
        StatementKind::Update,
        StatementKind::Delete,
        StatementKind::Create,
        StatementKind::Drop,
        StatementKind::Alter,
        StatementKind::Truncate,
    ];

    /// Stable snake_case key, e.g. `select_from`.
    pub fn as_str(self) -> &'static str {
        match self {
            StatementKind::SelectFrom => "select_from",
            StatementKind::Join => "join",
            StatementKind::Insert => "insert",
            StatementKind::Update => "update",
            StatementKind::Delete => "delete",
            StatementKind::Create => "create",
            StatementKind::Drop => "drop",
            StatementKind::Alter => "alter",
            StatementKind::Truncate => "truncate",
        }
    }

    /// Human-readable label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            StatementKind::SelectFrom => "SELECT FROM",
            StatementKind::Join => "JOIN",
            StatementKind::Insert => "INSERT INTO",
            StatementKind::Update => "UPDATE",
            StatementKind::Delete => "DELETE FROM",
            StatementKind::Create => "CREATE TABLE",
            StatementKind::Drop => "DROP TABLE",
            StatementKind::Alter => "ALTER TABLE",
            StatementKind::Truncate => "TRUNCATE TABLE",
        }
    }

    /// Keyword anchor preceding the table token (regex syntax).
    fn anchor(self) -> &'static str {
        match self {
            StatementKind::SelectFrom => r"\bFROM\s+",
            StatementKind::Join => {
                r"\b(?:INNER\s+JOIN|LEFT\s+JOIN|RIGHT\s+JOIN|FULL\s+JOIN|CROSS\s+JOIN|JOIN)\s+"
            }
            StatementKind::Insert => r"\bINSERT\s+INTO\s+",
            StatementKind::Update => r"\bUPDATE\s+",
            StatementKind::Delete => r"\bDELETE\s+FROM\s+",
            StatementKind::Create => r"\bCREATE\s+TABLE\s+(?:IF\s+NOT\s+EXISTS\s+)?",
            StatementKind::Drop => r"\bDROP\s+TABLE\s+(?:IF\s+EXISTS\s+)?",
            StatementKind::Alter => r"\bALTER\s+TABLE\s+",
            StatementKind::Truncate => r"\bTRUNCATE\s+(?:TABLE\s+)?",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backtick-quoted | double-quoted | qualified | bare word, in priority order.
const TABLE_TOKEN: &str = r#"(?:`[^`]+`|"[^"]+"|\w+\.\w+|\w+)"#;

/// Compiled pattern per statement kind, built once and shared read-only.
static STATEMENT_PATTERNS: LazyLock<Vec<(StatementKind, Regex)>> = LazyLock::new(|| {
    StatementKind::ALL
        .iter()
        .map(|&kind| {
            let pattern = format!("(?i){}{}", kind.anchor(), TABLE_TOKEN);
            (kind, Regex::new(&pattern).unwrap())
        })
        .collect()
});

static LEADING_TABLE_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{}", TABLE_TOKEN)).unwrap());

/// Skip an optional `[AS] alias` after a table token.
fn skip_alias(rest: &str) -> &str {
    let gap = leading_whitespace_len(rest);
    if gap == 0 {
        return rest;
    }
    let mut cursor = &rest[gap..];

    if starts_with_ci(cursor, "AS") {
        let after_as = &cursor[2..];
        let as_gap = leading_whitespace_len(after_as);
        if as_gap > 0 {
            cursor = &after_as[as_gap..];
        }
    }

    let alias_len = identifier_len(cursor);
    if alias_len == 0 || is_sql_keyword(&cursor[..alias_len]) {
        return rest;
    }
    &cursor[alias_len..]
}

/// Table tokens following the first one in a comma-separated `FROM` list.
fn from_list_tail(mut rest: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    loop {
        rest = skip_alias(rest);
        let Some(after_comma) = rest.trim_start().strip_prefix(',') else {
            break;
        };
        let candidate = after_comma.trim_start();
        let Some(token) = LEADING_TABLE_TOKEN_RE.find(candidate) else {
            break;
        };
        tokens.push(token.as_str());
        rest = &candidate[token.end()..];
    }
    tokens
}

/// A validated table name and the clause it was found in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableReference {
    pub kind: StatementKind,
    /// Validation key: unquoted, final segment of a qualified name
    pub name: String,
}

/// Find every accepted table reference, grouped by kind then by text position.
///
/// Input is expected to be comment-free.
pub fn find_table_references(sql: &str) -> Vec<TableReference> {
    let mut references = Vec::new();
    let mut push = |kind: StatementKind, matched: &str| {
        // Drop any keyword prefix: the token is the last whitespace-delimited part.
        if let Some(name) = matched
            .split_whitespace()
            .last()
            .and_then(validate_table_name)
        {
            references.push(TableReference { kind, name });
        }
    };

    for (kind, pattern) in STATEMENT_PATTERNS.iter() {
        for m in pattern.find_iter(sql) {
            push(*kind, m.as_str());
            if *kind == StatementKind::SelectFrom {
                for token in from_list_tail(&sql[m.end()..]) {
                    push(*kind, token);
                }
            }
        }
    }
    references
}

/// Extract table names per statement kind. Kinds with no matches are omitted.
pub fn extract_table_references(sql: &str) -> BTreeMap<StatementKind, BTreeSet<String>> {
    let mut tables: BTreeMap<StatementKind, BTreeSet<String>> = BTreeMap::new();
    for reference in find_table_references(sql) {
        tables
            .entry(reference.kind)
            .or_default()
            .insert(reference.name);
    }
    tables
}
