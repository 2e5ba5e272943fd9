// src/text.rs
//! Normalization and tokenization shared by every matcher.

use crate::banks::Banks;
use once_cell::sync::Lazy;
use regex::Regex;

/// Tokens must be longer than this many characters.
pub const MAX_DROPPED_TOKEN_LEN: usize = 2;

static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));
static RE_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z0-9+#.]+").expect("token regex"));

/// Collapse whitespace runs to one space, trim, lowercase.
pub fn normalize(text: &str) -> String {
    RE_WS.replace_all(text, " ").trim().to_lowercase()
}

/// `normalize` for optional input; `None` behaves like the empty string.
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

/// Word tokens in source order: `[a-z0-9+#.]` runs of the normalized text,
/// minus stopwords and short tokens. No dedup.
pub fn tokenize(text: &str, banks: &Banks) -> Vec<String> {
    let norm = normalize(text);
    RE_TOKEN
        .find_iter(&norm)
        .map(|m| m.as_str())
        .filter(|w| w.len() > MAX_DROPPED_TOKEN_LEN && !banks.is_stopword(w))
        .map(str::to_string)
        .collect()
}
