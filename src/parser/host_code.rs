//! Non-SQL line stripping for SQL embedded in Python and shell scripts
//!
//! Each rule is anchored at the start of a line and removes only host-language
//! noise (imports, shebangs, encoding declarations and `#` comment lines).
//! Everything else, including SQL inside string literals, is left untouched.

use std::sync::LazyLock;

use regex::Regex;

/// Line-anchored removal rules, applied in order.
static HOST_LINE_RULES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Python: import x / from x.y import z
        r"(?m)^\s*import\s+[^\n]+",
        r"(?m)^\s*from\s+[a-zA-Z_][a-zA-Z0-9_.]*\s+import\s+[^\n]+",
        // Python shebang and encoding declaration
        r"(?m)^#!.*python[^\n]*",
        r"(?m)^#.*coding[=:]\s*[^\n]+",
        // Shell shebangs
        r"(?m)^#!/bin/(ba)?sh[^\n]*",
        r"(?m)^#!/usr/bin/env\s+(ba)?sh[^\n]*",
        // `#` comment lines (SQL `--` comments are kept for the comment stripper)
        r"(?m)^\s*#[^!\n][^\n]*",
        r"(?m)^\s*#$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

/// Remove host-language lines that are not SQL.
pub fn strip_host_code(content: &str) -> String {
    HOST_LINE_RULES
        .iter()
        .fold(content.to_string(), |acc, rule| {
            rule.replace_all(&acc, "").into_owned()
        })
}
