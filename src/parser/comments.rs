//! SQL comment stripping
//!
//! Plain text substitution: `--` line comments are removed first, then
//! `/* ... */` block comments (non-greedy, may span lines). String literals
//! are not treated specially, so comment markers inside quotes are stripped too.

use std::sync::LazyLock;

use regex::Regex;

static LINE_COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"--[^\n]*").unwrap());

static BLOCK_COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());

/// Remove `--` and `/* */` comments from SQL text.
pub fn strip_comments(sql: &str) -> String {
    let without_line = LINE_COMMENT_RE.replace_all(sql, "");
    BLOCK_COMMENT_RE.replace_all(&without_line, "").into_owned()
}
