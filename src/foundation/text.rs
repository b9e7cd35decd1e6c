//! Prompt text primitives shared by the composers.
//!
//! Prompts are comma-separated fragment lists. Scene templates embed role placeholders of the
//! form `[R1]`: an opening bracket, one or more ASCII uppercase letters or digits, a closing
//! bracket. Matching is case-sensitive.

use std::sync::LazyLock;

use regex::Regex;

/// Separator placed between non-empty prompt fragments.
pub const FRAGMENT_SEPARATOR: &str = ", ";

/// Regex pattern matching role placeholder tokens in scene templates.
pub const PLACEHOLDER_PATTERN: &str = r"\[[A-Z0-9]+\]";

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PLACEHOLDER_PATTERN).expect("valid regex"));

/// Join the non-empty fragments with [`FRAGMENT_SEPARATOR`], preserving order.
pub fn join_fragments<'a, I>(fragments: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    fragments
        .into_iter()
        .filter(|f| !f.is_empty())
        .collect::<Vec<_>>()
        .join(FRAGMENT_SEPARATOR)
}

/// Placeholder token for a role id: `"r1"` becomes `"[R1]"`.
pub fn placeholder_for(role_id: &str) -> String {
    format!("[{}]", role_id.to_uppercase())
}

/// Replace only the first occurrence of `token`. Later duplicates are left in place.
pub fn replace_first(haystack: &str, token: &str, replacement: &str) -> String {
    haystack.replacen(token, replacement, 1)
}

/// Remove every placeholder-shaped token.
pub fn strip_placeholders(text: &str) -> String {
    PLACEHOLDER_RE.replace_all(text, "").into_owned()
}

/// Whether any placeholder-shaped token remains in `text`.
pub fn has_placeholder(text: &str) -> bool {
    PLACEHOLDER_RE.is_match(text)
}

/// Placeholder tokens in order of appearance (duplicates kept).
pub fn placeholders_in(text: &str) -> Vec<String> {
    PLACEHOLDER_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/text.rs"]
mod tests;
