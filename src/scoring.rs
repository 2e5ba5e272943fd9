// src/scoring.rs
//! Coverage scoring and red-flag detection.
//!
//! keyword_coverage = 0.35 * bank_coverage + 0.65 * phrase_coverage
//! confidence       = min(0.95, 0.45 + 0.5 * min(1, job_bank_keywords / 12))
//!
//! Confidence only depends on how much job-side vocabulary was available; it
//! never looks at the resume. Red flags are reported alongside and never feed
//! into either number.

use crate::banks::Banks;
use crate::phrases::{extract_phrases, DEFAULT_NGRAM, DEFAULT_TOP_K};
use crate::text::normalize;
use serde::{Deserialize, Serialize};

pub const BANK_WEIGHT: f64 = 0.35;
pub const PHRASE_WEIGHT: f64 = 0.65;

pub const CONFIDENCE_BASE: f64 = 0.45;
pub const CONFIDENCE_SPAN: f64 = 0.5;
pub const CONFIDENCE_CAP: f64 = 0.95;
/// Job-side bank keywords needed to reach the full confidence span.
pub const CONFIDENCE_SATURATION: f64 = 12.0;

pub const PHRASE_TAG: &str = "[PHRASE] ";
pub const MAX_TAGGED_OVERLAP: usize = 10;
pub const MAX_TAGGED_MISSING: usize = 15;

/// Scores reported for one resume/job pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScores {
    pub keyword_coverage: f64,
    pub overlap_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub red_flags: Vec<String>,
    pub confidence: f64,
}

impl MatchScores {
    /// Assemble the reported scores from bank matches, phrase coverage and red flags.
    pub fn build(
        bank_overlap: &[String],
        bank_missing: &[String],
        phrases: &PhraseCoverage,
        red_flags: Vec<String>,
    ) -> Self {
        let job_total = bank_overlap.len() + bank_missing.len();
        let bank = bank_coverage(bank_overlap.len(), job_total);
        let blended = blend(bank, phrases.coverage);

        let mut overlap_keywords = bank_overlap.to_vec();
        overlap_keywords.extend(tag_phrases(&phrases.overlap, MAX_TAGGED_OVERLAP));
        let mut missing_keywords = bank_missing.to_vec();
        missing_keywords.extend(tag_phrases(&phrases.missing, MAX_TAGGED_MISSING));

        Self {
            keyword_coverage: round3(blended),
            overlap_keywords,
            missing_keywords,
            red_flags,
            confidence: round3(confidence(job_total)),
        }
    }
}

/// Job phrases split into those found in the resume and those not found.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PhraseCoverage {
    pub coverage: f64,
    pub overlap: Vec<String>,
    pub missing: Vec<String>,
}

/// Top job trigrams checked by plain substring containment in the normalized resume.
pub fn phrase_coverage(resume_text: &str, job_text: &str, banks: &Banks) -> PhraseCoverage {
    let job_phrases = extract_phrases(job_text, DEFAULT_NGRAM, DEFAULT_TOP_K, banks);
    if job_phrases.is_empty() {
        return PhraseCoverage::default();
    }
    let resume_norm = normalize(resume_text);
    let total = job_phrases.len();
    let (overlap, missing): (Vec<String>, Vec<String>) = job_phrases
        .into_iter()
        .partition(|p| resume_norm.contains(p.as_str()));

    PhraseCoverage {
        coverage: overlap.len() as f64 / total as f64,
        overlap,
        missing,
    }
}

pub fn bank_coverage(overlap: usize, job_total: usize) -> f64 {
    if job_total == 0 {
        return 0.0;
    }
    overlap as f64 / job_total as f64
}

pub fn blend(bank: f64, phrase: f64) -> f64 {
    BANK_WEIGHT * bank + PHRASE_WEIGHT * phrase
}

pub fn confidence(job_bank_keywords: usize) -> f64 {
    let vocab = (job_bank_keywords as f64 / CONFIDENCE_SATURATION).min(1.0);
    (CONFIDENCE_BASE + CONFIDENCE_SPAN * vocab).min(CONFIDENCE_CAP)
}

/// Round to three decimals for reporting.
///
/// Goes through decimal formatting so the exact binary value is rounded,
/// not `x * 1000.0`: `0.35 + 0.65 * 0.25` is stored just below 0.5125 and
/// reports as 0.512.
pub fn round3(x: f64) -> f64 {
    format!("{x:.3}").parse().unwrap_or(x)
}

/// Red-flag phrases contained in the normalized job text, in bank order.
pub fn find_red_flags(job_text: &str, banks: &Banks) -> Vec<String> {
    let norm = normalize(job_text);
    banks
        .red_flags()
        .iter()
        .filter(|p| norm.contains(p.as_str()))
        .cloned()
        .collect()
}

fn tag_phrases(phrases: &[String], max: usize) -> impl Iterator<Item = String> + '_ {
    phrases.iter().take(max).map(|p| format!("{PHRASE_TAG}{p}"))
}
