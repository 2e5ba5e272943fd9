// src/phrases.rs
//! Statistical phrase extraction: n-grams ranked by frequency, filtered by
//! domain signal words and reranked for diversity.
//!
//! Ranking is a strict total order (count desc, then phrase asc), so the output
//! is deterministic for a given text and bank.
//!
//! Diversity: each phrase has an *anchor* (its longest word, first one on ties).
//! Walking the ranked list, a phrase is kept only while its anchor has been seen
//! at most `max_per_anchor` times. Two caps are in use:
//! - `DEFAULT_MAX_PER_ANCHOR` (3) for standalone reranking,
//! - `TOP_K_MAX_PER_ANCHOR` (2) when selecting a text's top-K phrases.

use crate::banks::Banks;
use crate::text::tokenize;
use std::collections::HashMap;

pub const DEFAULT_NGRAM: usize = 3;
pub const DEFAULT_TOP_K: usize = 25;

pub const DEFAULT_MAX_PER_ANCHOR: usize = 3;
pub const TOP_K_MAX_PER_ANCHOR: usize = 2;

/// Below this many repeated relevant phrases, single occurrences are admitted too.
pub const MIN_REPEATED_PHRASES: usize = 10;

/// Every contiguous `n`-token window joined with a single space.
pub fn ngrams(tokens: &[String], n: usize) -> Vec<String> {
    if n == 0 || tokens.len() < n {
        return Vec::new();
    }
    tokens.windows(n).map(|w| w.join(" ")).collect()
}

/// Distinct phrases with their counts, sorted by count desc then phrase asc.
pub fn rank_by_frequency(phrases: &[String]) -> Vec<(String, usize)> {
    let mut freq: HashMap<&str, usize> = HashMap::new();
    for p in phrases {
        *freq.entry(p.as_str()).or_insert(0) += 1;
    }
    let mut items: Vec<(String, usize)> = freq
        .into_iter()
        .map(|(p, c)| (p.to_string(), c))
        .collect();
    items.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    items
}

/// True if any word of the phrase is a signal word.
pub fn is_relevant_phrase(phrase: &str, banks: &Banks) -> bool {
    phrase
        .split_whitespace()
        .any(|w| banks.is_signal_word(&w.to_lowercase()))
}

/// Longest word of the phrase; the first one wins ties. Empty phrases anchor on themselves.
pub fn anchor_word(phrase: &str) -> &str {
    let mut best: Option<(&str, usize)> = None;
    for w in phrase.split_whitespace() {
        let len = w.chars().count();
        match best {
            Some((_, l)) if l >= len => {}
            _ => best = Some((w, len)),
        }
    }
    best.map(|(w, _)| w).unwrap_or(phrase)
}

/// Keep phrases in order while their anchor count stays within `max_per_anchor`.
pub fn rerank_diverse(phrases: Vec<String>, max_per_anchor: usize) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::with_capacity(phrases.len());
    for p in phrases {
        let seen = counts.entry(anchor_word(&p).to_string()).or_insert(0);
        *seen += 1;
        if *seen <= max_per_anchor {
            out.push(p);
        }
    }
    out
}

/// Up to `top_k` ranked, relevant, diversity-capped `n`-gram phrases of `text`.
pub fn extract_phrases(text: &str, n: usize, top_k: usize, banks: &Banks) -> Vec<String> {
    let tokens = tokenize(text, banks);
    let ranked = rank_by_frequency(&ngrams(&tokens, n));

    let mut filtered: Vec<String> = ranked
        .iter()
        .filter(|(p, c)| *c > 1 && is_relevant_phrase(p, banks))
        .map(|(p, _)| p.clone())
        .collect();

    // Short postings rarely repeat a phrase; admit singletons.
    if filtered.len() < MIN_REPEATED_PHRASES {
        filtered = ranked
            .into_iter()
            .map(|(p, _)| p)
            .filter(|p| is_relevant_phrase(p, banks))
            .collect();
    }

    let mut out = rerank_diverse(filtered, TOP_K_MAX_PER_ANCHOR);
    out.truncate(top_k);
    out
}

/// `extract_phrases` with trigram windows and the default top-K.
pub fn extract_default_phrases(text: &str, banks: &Banks) -> Vec<String> {
    extract_phrases(text, DEFAULT_NGRAM, DEFAULT_TOP_K, banks)
}
