// src/edits.rs
//! Safe bullet rewrites.
//!
//! A rewrite only tightens wording and may append one keyword from the posting.
//! Tool names (python, sql, api, git) are always flagged `needs_confirmation`:
//! the packet never claims a tool the candidate has not confirmed using.

use crate::text::normalize;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const MAX_BULLETS: usize = 20;
pub const MAX_EDITED_BULLETS: usize = 8;
pub const MIN_BULLET_CHARS: usize = 20;
/// Sentence fallback keeps sentences strictly longer than this.
pub const MIN_SENTENCE_CHARS: usize = 40;

const FOCUS_KEYWORDS: [&str; 8] = [
    "troubleshooting",
    "automation",
    "incident",
    "sla",
    "api",
    "sql",
    "python",
    "git",
];
const TOOL_KEYWORDS: [&str; 4] = ["python", "sql", "api", "git"];

static RE_BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*•]\s+").expect("bullet regex"));
static RE_SENTENCE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]\s+").expect("sentence regex"));
static RE_FILLER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bvery\b|\breally\b|\bjust\b").expect("filler regex"));
static RE_MULTI_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").expect("multi-ws regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditTarget {
    Summary,
    Bullet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedEdit {
    pub target: EditTarget,
    pub original: String,
    pub suggestion: String,
    pub rationale: String,
    #[serde(default)]
    pub needs_confirmation: bool,
}

/// Marker-prefixed lines (`-`, `*`, `•`) with the marker stripped. Without any,
/// falls back to sentences longer than `MIN_SENTENCE_CHARS`. At most `MAX_BULLETS`.
pub fn split_bullets(resume_text: &str) -> Vec<String> {
    let mut bullets: Vec<String> = resume_text
        .split(is_line_break)
        .map(str::trim)
        .filter(|ln| RE_BULLET.is_match(ln))
        .map(|ln| RE_BULLET.replace(ln, "").trim().to_string())
        .collect();

    if bullets.is_empty() {
        bullets = split_sentences(resume_text.trim())
            .into_iter()
            .map(str::trim)
            .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
            .take(MAX_EDITED_BULLETS)
            .map(str::to_string)
            .collect();
    }

    bullets.truncate(MAX_BULLETS);
    bullets
}

/// Line separators: `\n`, `\r`, vertical tab, form feed, the C0 file/group/record
/// separators, NEL and the Unicode line/paragraph separators. `\r\n` yields an
/// empty piece in between, which never matches a bullet.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}' | '\u{2028}'
            | '\u{2029}'
    )
}

/// Split after `.`, `!` or `?` when followed by whitespace; the punctuation stays.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    for m in RE_SENTENCE_END.find_iter(text) {
        out.push(&text[start..m.start() + 1]);
        start = m.end();
    }
    out.push(&text[start..]);
    out
}

/// Drop the filler words very/really/just and collapse the gaps they leave.
pub fn tighten(bullet: &str) -> String {
    let stripped = RE_FILLER.replace_all(bullet, "");
    RE_MULTI_WS.replace_all(stripped.trim(), " ").into_owned()
}

/// First missing keyword that is a focus keyword and not already in the bullet.
pub fn pick_keyword<'a>(bullet: &str, missing_keywords: &'a [String]) -> Option<&'a str> {
    let norm = normalize(bullet);
    missing_keywords
        .iter()
        .map(String::as_str)
        .filter(|kw| !norm.contains(kw.to_lowercase().as_str()))
        .find(|kw| FOCUS_KEYWORDS.contains(&kw.to_lowercase().as_str()))
}

fn is_tool(keyword: &str) -> bool {
    TOOL_KEYWORDS.contains(&keyword.to_lowercase().as_str())
}

fn render_tool(keyword: &str) -> String {
    if keyword == "sql" {
        keyword.to_uppercase()
    } else {
        keyword.to_string()
    }
}

/// Tighten one bullet and optionally add a keyword; `None` for short or unchanged bullets.
pub fn safe_rewrite_bullet(bullet: &str, missing_keywords: &[String]) -> Option<SuggestedEdit> {
    let original = bullet.trim();
    if original.chars().count() < MIN_BULLET_CHARS {
        return None;
    }

    let mut suggestion = tighten(original);
    let mut rationale = String::from("Tightened wording for clarity.");
    let mut needs_confirmation = false;

    match pick_keyword(original, missing_keywords) {
        Some(kw) if is_tool(kw) => {
            suggestion = format!(
                "{suggestion} (Tools used where applicable: {}.)",
                render_tool(kw)
            );
            rationale.push_str(&format!(
                " Added a tool mention to align with the posting\u{2014}confirm you actually used {kw}."
            ));
            needs_confirmation = true;
        }
        Some(kw) => {
            suggestion = format!("{suggestion} (Focus: {kw}.)");
            rationale.push_str(&format!(
                " Added focus keyword '{kw}' to better match the posting."
            ));
        }
        None => {}
    }

    if suggestion == original {
        return None;
    }

    Some(SuggestedEdit {
        target: EditTarget::Bullet,
        original: original.to_string(),
        suggestion,
        rationale,
        needs_confirmation,
    })
}

/// Rewrites for the first `MAX_EDITED_BULLETS` bullets of the resume.
pub fn suggest_edits(resume_text: &str, missing_keywords: &[String]) -> Vec<SuggestedEdit> {
    split_bullets(resume_text)
        .iter()
        .take(MAX_EDITED_BULLETS)
        .filter_map(|b| safe_rewrite_bullet(b, missing_keywords))
        .collect()
}
