//! Shared utility helpers.

/// Case-insensitive starts_with check without allocating.
#[inline]
pub fn starts_with_ci(haystack: &str, needle: &str) -> bool {
    haystack.len() >= needle.len()
        && haystack.as_bytes()[..needle.len()].eq_ignore_ascii_case(needle.as_bytes())
}

/// Byte length of the leading whitespace run of `text`.
#[inline]
pub fn leading_whitespace_len(text: &str) -> usize {
    text.len() - text.trim_start().len()
}
