//! Synthetic invariant suite: programmatically built resume/posting pairs from a
//! seeded RNG, checked against the properties every run must hold.

use job_copilot::banks::Banks;
use job_copilot::keywords::{extract_keywords, overlap_and_missing};
use job_copilot::phrases::{
    anchor_word, extract_default_phrases, is_relevant_phrase, rerank_diverse,
    DEFAULT_MAX_PER_ANCHOR, DEFAULT_TOP_K, TOP_K_MAX_PER_ANCHOR,
};
use job_copilot::scoring::{find_red_flags, MAX_TAGGED_MISSING, MAX_TAGGED_OVERLAP, PHRASE_TAG};
use job_copilot::text::normalize;
use job_copilot::{run_agent, OutputPacket};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::{HashMap, HashSet};

const SEED: u64 = 0x00C0_F11E;
const CASES: usize = 120;

const FILLER: &[&str] = &[
    "the", "team", "handled", "weekly", "reports", "for", "users", "very", "just", "and",
    "customers", "office", "onboarding", "really", "with", "tickets", "devices", "network",
    "printers", "documentation",
];

const PUNCT: &[&str] = &["", "", "", ",", ".", ";", "!"];

fn pick<'a>(rng: &mut StdRng, pool: &[&'a str]) -> &'a str {
    pool[rng.random_range(0..pool.len())]
}

/// Random text mixing bank keywords, red flags and filler; optionally as bullets.
fn synth_text(rng: &mut StdRng, banks: &Banks) -> String {
    let keywords: Vec<&str> = banks.keywords().iter().map(String::as_str).collect();
    let flags: Vec<&str> = banks.red_flags().iter().map(String::as_str).collect();

    let lines = rng.random_range(0..8);
    let bullets = rng.random_bool(0.5);
    let mut out = Vec::with_capacity(lines);
    for _ in 0..lines {
        let words = rng.random_range(3..16);
        let mut line = Vec::with_capacity(words);
        for _ in 0..words {
            let w = match rng.random_range(0..10) {
                0..=2 => pick(rng, &keywords),
                3 if rng.random_bool(0.2) => pick(rng, &flags),
                _ => pick(rng, FILLER),
            };
            let word = if rng.random_bool(0.3) {
                w.to_uppercase()
            } else {
                w.to_string()
            };
            line.push(format!("{word}{}", pick(rng, PUNCT)));
        }
        let line = line.join(" ");
        out.push(if bullets { format!("- {line}") } else { line });
    }
    out.join("\n")
}

fn cases() -> Vec<(String, String)> {
    let banks = Banks::embedded();
    let mut rng = StdRng::seed_from_u64(SEED);
    (0..CASES)
        .map(|_| (synth_text(&mut rng, banks), synth_text(&mut rng, banks)))
        .collect()
}

fn is_sorted_ci(v: &[String]) -> bool {
    v.windows(2).all(|w| w[0].to_lowercase() <= w[1].to_lowercase())
}

fn untagged(v: &[String]) -> Vec<String> {
    v.iter()
        .filter(|k| !k.starts_with(PHRASE_TAG))
        .cloned()
        .collect()
}

#[test]
fn overlap_and_missing_partition_the_posting_keywords() {
    let bank = Banks::embedded().keywords();
    for (resume, job) in cases() {
        let resume_kws = extract_keywords(&resume, bank).unwrap();
        let job_kws = extract_keywords(&job, bank).unwrap();
        let (overlap, missing) = overlap_and_missing(&resume_kws, &job_kws);

        assert!(is_sorted_ci(&overlap) && is_sorted_ci(&missing));
        let o: HashSet<_> = overlap.iter().collect();
        let m: HashSet<_> = missing.iter().collect();
        assert!(o.is_disjoint(&m), "job: {job}");
        let union: HashSet<_> = o.union(&m).copied().collect();
        let expected: HashSet<_> = job_kws.iter().collect();
        assert_eq!(union, expected, "job: {job}");
        assert!(overlap.iter().all(|k| resume_kws.contains(k)));
    }
}

#[test]
fn default_phrases_respect_top_k_relevance_and_anchor_cap() {
    let banks = Banks::embedded();
    for (_, job) in cases() {
        let phrases = extract_default_phrases(&job, banks);
        assert!(phrases.len() <= DEFAULT_TOP_K);

        let mut per_anchor: HashMap<&str, usize> = HashMap::new();
        for p in &phrases {
            assert!(is_relevant_phrase(p, banks), "irrelevant phrase {p:?}");
            *per_anchor.entry(anchor_word(p)).or_default() += 1;
        }
        assert!(
            per_anchor.values().all(|&n| n <= TOP_K_MAX_PER_ANCHOR),
            "{per_anchor:?}"
        );
    }
}

#[test]
fn rerank_keeps_order_and_caps_anchors() {
    let mut rng = StdRng::seed_from_u64(SEED ^ 0xFF);
    for _ in 0..50 {
        let phrases: Vec<String> = (0..rng.random_range(0..30))
            .map(|_| {
                (0..3)
                    .map(|_| pick(&mut rng, FILLER))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        let kept = rerank_diverse(phrases.clone(), DEFAULT_MAX_PER_ANCHOR);

        let mut per_anchor: HashMap<&str, usize> = HashMap::new();
        for p in &kept {
            *per_anchor.entry(anchor_word(p)).or_default() += 1;
        }
        assert!(per_anchor.values().all(|&n| n <= DEFAULT_MAX_PER_ANCHOR));

        // kept is a subsequence of the input
        let mut it = phrases.iter();
        assert!(kept.iter().all(|k| it.any(|p| p == k)));
    }
}

#[test]
fn packets_are_bounded_and_deterministic() {
    let banks = Banks::embedded();
    for (resume, job) in cases() {
        let a: OutputPacket = run_agent(&resume, &job);
        let b = run_agent(&resume, &job);
        assert_eq!(a, b);

        let ms = &a.match_scores;
        assert!((0.0..=1.0).contains(&ms.keyword_coverage), "{ms:?}");
        assert!((0.45..=0.95).contains(&ms.confidence), "{ms:?}");

        let tagged_overlap = ms.overlap_keywords.len() - untagged(&ms.overlap_keywords).len();
        let tagged_missing = ms.missing_keywords.len() - untagged(&ms.missing_keywords).len();
        assert!(tagged_overlap <= MAX_TAGGED_OVERLAP);
        assert!(tagged_missing <= MAX_TAGGED_MISSING);

        // red flags come from the bank, in bank order, posting only
        assert_eq!(ms.red_flags, find_red_flags(&job, banks));
        let positions: Vec<usize> = ms
            .red_flags
            .iter()
            .map(|f| banks.red_flags().iter().position(|b| b == f).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        assert!(a.suggested_edits.len() <= 8);
        for e in &a.suggested_edits {
            assert_ne!(e.original, e.suggestion);
            assert_eq!(
                e.needs_confirmation,
                e.suggestion.contains("(Tools used where applicable:")
            );
        }
        assert_eq!(a.interview_questions.len(), 10);
    }
}

#[test]
fn normalize_is_idempotent_on_synthetic_text() {
    for (resume, job) in cases() {
        for t in [resume, job] {
            let once = normalize(&t);
            assert_eq!(normalize(&once), once);
        }
    }
}
