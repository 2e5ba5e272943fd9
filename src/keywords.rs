// src/keywords.rs
//! Keyword-bank matching with whole-word semantics.
//!
//! Each bank term is compiled once into `\b<term>\b` and searched in the
//! normalized text, so `incident` does not match inside `incidents` and
//! multi-word terms must appear as a contiguous phrase.

use crate::text::normalize;
use regex::Regex;
use std::collections::HashSet;

#[derive(Debug)]
struct CompiledTerm {
    term: String,
    re: Regex,
}

/// Compiled keyword bank.
#[derive(Debug)]
pub struct KeywordMatcher {
    terms: Vec<CompiledTerm>,
}

impl KeywordMatcher {
    pub fn new<S: AsRef<str>>(bank: &[S]) -> anyhow::Result<Self> {
        let terms = bank
            .iter()
            .map(|t| {
                let term = t.as_ref().to_string();
                let pattern = format!(r"\b{}\b", regex::escape(&term.to_lowercase()));
                let re = Regex::new(&pattern)
                    .map_err(|e| anyhow::anyhow!("keyword `{}` regex error: {}", term, e))?;
                Ok(CompiledTerm { term, re })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Self { terms })
    }

    /// Bank terms present in `text`, deduplicated and sorted case-insensitively.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let norm = normalize(text);
        let found = self
            .terms
            .iter()
            .filter(|t| t.re.is_match(&norm))
            .map(|t| t.term.clone());
        dedup_sorted(found)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// One-shot helper: compile `bank` and extract from `text`.
pub fn extract_keywords<S: AsRef<str>>(text: &str, bank: &[S]) -> anyhow::Result<Vec<String>> {
    Ok(KeywordMatcher::new(bank)?.extract(text))
}

/// `(resume ∩ job, job − resume)`, both sorted like `extract`.
pub fn overlap_and_missing(resume_kws: &[String], job_kws: &[String]) -> (Vec<String>, Vec<String>) {
    let resume: HashSet<&str> = resume_kws.iter().map(String::as_str).collect();
    let overlap = dedup_sorted(
        job_kws
            .iter()
            .filter(|k| resume.contains(k.as_str()))
            .cloned(),
    );
    let missing = dedup_sorted(
        job_kws
            .iter()
            .filter(|k| !resume.contains(k.as_str()))
            .cloned(),
    );
    (overlap, missing)
}

fn dedup_sorted(items: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out: Vec<String> = items.into_iter().filter(|s| seen.insert(s.clone())).collect();
    out.sort_by_cached_key(|s| s.to_lowercase());
    out
}
