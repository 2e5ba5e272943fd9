//! # Co-Pilot Engine
//! Pure pipeline that maps `(resume_text, job_text)` → `OutputPacket`.
//! No I/O, suitable for unit tests and repeated offline runs.
//!
//! Order: keyword bank match on both sides → phrase coverage of the posting →
//! blended scores + red flags → bullet rewrites → interview pack.

use crate::banks::Banks;
use crate::debug::{dev_log_run, RunDiagnostics};
use crate::edits::{suggest_edits, SuggestedEdit};
use crate::interview::build_interview_pack;
use crate::keywords::{overlap_and_missing, KeywordMatcher};
use crate::scoring::{find_red_flags, phrase_coverage, MatchScores};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const ROLE_SUMMARY: &str = "This agent compares your resume text to the job posting, \
identifies keyword overlap/gaps, and suggests safe, honest edits \
that improve alignment without inventing experience.";

static DEFAULT_COPILOT: Lazy<Copilot> =
    Lazy::new(|| Copilot::new(Banks::default()).expect("embedded keyword bank compiles"));

/// Everything one run produces; handed to the report writer as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputPacket {
    pub role_summary: String,
    pub match_scores: MatchScores,
    pub suggested_edits: Vec<SuggestedEdit>,
    pub interview_questions: Vec<String>,
    pub talking_points: Vec<String>,
}

/// Banks plus the keyword matcher compiled from them.
#[derive(Debug)]
pub struct Copilot {
    banks: Banks,
    matcher: KeywordMatcher,
}

impl Copilot {
    pub fn new(banks: Banks) -> anyhow::Result<Self> {
        let matcher = KeywordMatcher::new(banks.keywords())?;
        debug!(keywords = matcher.len(), red_flags = banks.red_flags().len(), "copilot ready");
        Ok(Self { banks, matcher })
    }

    pub fn banks(&self) -> &Banks {
        &self.banks
    }

    pub fn run(&self, resume_text: &str, job_text: &str) -> OutputPacket {
        // 1) Bank keywords on both sides
        let resume_kws = self.matcher.extract(resume_text);
        let job_kws = self.matcher.extract(job_text);
        let (overlap, missing) = overlap_and_missing(&resume_kws, &job_kws);

        // 2) Phrase coverage + red flags
        let phrases = phrase_coverage(resume_text, job_text, &self.banks);
        let red_flags = find_red_flags(job_text, &self.banks);
        debug!(
            job_keywords = job_kws.len(),
            overlap = overlap.len(),
            job_phrases = phrases.overlap.len() + phrases.missing.len(),
            phrase_coverage = phrases.coverage,
            "scored keyword banks and phrases"
        );

        let match_scores = MatchScores::build(&overlap, &missing, &phrases, red_flags);

        // 3) Edits only ever pull from the bank keywords the resume lacks
        let suggested_edits = suggest_edits(resume_text, &missing);

        // 4) Interview pack
        let pack = build_interview_pack(&overlap, &missing);

        dev_log_run(&RunDiagnostics {
            resume_text,
            job_text,
            keyword_coverage: match_scores.keyword_coverage,
            confidence: match_scores.confidence,
            overlap: &overlap,
            missing: &missing,
            red_flags: &match_scores.red_flags,
            edits: suggested_edits.len(),
        });

        OutputPacket {
            role_summary: ROLE_SUMMARY.to_string(),
            match_scores,
            suggested_edits,
            interview_questions: pack.questions,
            talking_points: pack.talking_points,
        }
    }
}

/// Run the pipeline with the embedded banks.
pub fn run_agent(resume_text: &str, job_text: &str) -> OutputPacket {
    DEFAULT_COPILOT.run(resume_text, job_text)
}
