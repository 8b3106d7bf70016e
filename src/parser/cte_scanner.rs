//! CTE name scanning
//!
//! Finds every `WITH [RECURSIVE]` clause and walks its definitions:
//!
//! ```text
//! WITH a AS ( ... ( ... ) ... ), b AS ( ... ) SELECT ...
//!      ^ name   ^ depth 1 .. back to 0      ^ `,` => next sibling
//! ```
//!
//! Clause starts are located with a regex; everything after that is a plain
//! cursor walk with an explicit parenthesis depth counter. Parentheses inside
//! string literals are counted like any other, and an unterminated body runs
//! to the end of the input. Neither case is an error.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;

use super::comments::strip_comments;
use super::identifier::identifier_len;
use crate::util::{leading_whitespace_len, starts_with_ci};

static WITH_CLAUSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bWITH\s+(?:RECURSIVE\s+)?").unwrap());

static WITH_RECURSIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bWITH\s+RECURSIVE\b").unwrap());

/// Cursor over comment-free SQL text that collects CTE names.
pub struct CteScanner<'a> {
    sql: &'a str,
    pos: usize,
}

impl<'a> CteScanner<'a> {
    pub fn new(sql: &'a str) -> Self {
        Self { sql, pos: 0 }
    }

    /// Scan every clause start and return CTE names in discovery order.
    pub fn scan(mut self) -> Vec<String> {
        let mut names = Vec::new();
        for clause in WITH_CLAUSE_RE.find_iter(self.sql) {
            self.pos = clause.end();
            self.scan_clause(&mut names);
        }
        names
    }

    /// Walk `name AS ( ... )` definitions separated by commas.
    fn scan_clause(&mut self, names: &mut Vec<String>) {
        loop {
            self.skip_whitespace();
            let Some(name) = self.parse_definition_head() else {
                break;
            };
            names.push(name.to_string());

            self.skip_body();
            self.skip_whitespace();
            if !self.eat(b',') {
                break;
            }
        }
    }

    #[inline]
    fn rest(&self) -> &'a str {
        &self.sql[self.pos..]
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.pos >= self.sql.len()
    }

    fn skip_whitespace(&mut self) {
        self.pos += leading_whitespace_len(self.rest());
    }

    fn eat(&mut self, expected: u8) -> bool {
        if !self.is_at_end() && self.sql.as_bytes()[self.pos] == expected {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Match `<identifier> WS+ AS WS* (` at the cursor.
    ///
    /// On success the cursor sits just past the `(` and the identifier is returned.
    /// On failure the cursor is left untouched.
    fn parse_definition_head(&mut self) -> Option<&'a str> {
        let rest = self.rest();

        let name_len = identifier_len(rest);
        if name_len == 0 {
            return None;
        }
        let mut offset = name_len;

        let gap = leading_whitespace_len(&rest[offset..]);
        if gap == 0 {
            return None;
        }
        offset += gap;

        if !starts_with_ci(&rest[offset..], "AS") {
            return None;
        }
        offset += 2;
        offset += leading_whitespace_len(&rest[offset..]);

        if !rest[offset..].starts_with('(') {
            return None;
        }

        self.pos += offset + 1;
        Some(&rest[..name_len])
    }

    /// Consume a CTE body whose opening `(` has already been consumed.
    fn skip_body(&mut self) {
        let bytes = self.sql.as_bytes();
        let mut depth = 1usize;
        while depth > 0 && !self.is_at_end() {
            match bytes[self.pos] {
                b'(' => depth += 1,
                b')' => depth -= 1,
                _ => {}
            }
            self.pos += 1;
        }
    }
}

/// Scan CTE names from text whose comments have already been removed.
pub fn scan_cte_names(sql: &str) -> Vec<String> {
    CteScanner::new(sql).scan()
}

/// Extract CTE names in discovery order (comments are stripped first).
pub fn extract_cte_names(sql: &str) -> Vec<String> {
    scan_cte_names(&strip_comments(sql))
}

/// Extract the distinct CTE names.
pub fn extract_cte_names_unique(sql: &str) -> BTreeSet<String> {
    extract_cte_names(sql).into_iter().collect()
}

/// Returns true if the SQL (outside comments) contains `WITH RECURSIVE`.
pub fn has_recursive_cte(sql: &str) -> bool {
    WITH_RECURSIVE_RE.is_match(&strip_comments(sql))
}

/// Summary of CTE usage in one piece of SQL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CteAnalysis {
    /// Names in discovery order, duplicates kept
    pub cte_names: Vec<String>,
    /// Distinct names, sorted
    pub unique_names: BTreeSet<String>,
    pub total_count: usize,
    pub unique_count: usize,
    /// How many times each name was defined
    pub name_counts: BTreeMap<String, usize>,
    pub has_recursive: bool,
    pub has_multiple_ctes: bool,
}

/// Analyze CTE definitions in `sql`.
pub fn analyze_ctes(sql: &str) -> CteAnalysis {
    let clean = strip_comments(sql);
    let cte_names = scan_cte_names(&clean);

    let mut name_counts = BTreeMap::new();
    for name in &cte_names {
        *name_counts.entry(name.clone()).or_insert(0) += 1;
    }
    let unique_names: BTreeSet<String> = name_counts.keys().cloned().collect();

    CteAnalysis {
        total_count: cte_names.len(),
        unique_count: unique_names.len(),
        has_multiple_ctes: unique_names.len() > 1,
        has_recursive: WITH_RECURSIVE_RE.is_match(&clean),
        cte_names,
        unique_names,
        name_counts,
    }
}
